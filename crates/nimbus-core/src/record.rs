//! Observation rows handed to the delivery side.
//!
//! The logging endpoint takes one GET request per observation with the
//! readings and descriptors as query parameters. Building the request is
//! done here; sending it is not.

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Placeholder the endpoint receives for a reading the sensor failed to give.
pub const MISSING_READING: &str = "None";

/// Ambient readings taken alongside the photograph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    /// Raw analog rain sensor value.
    pub rain: Option<u16>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl SensorReadings {
    /// Temperature and humidity are kept to two decimals.
    pub fn new(temperature_c: Option<f64>, humidity_pct: Option<f64>, rain: Option<u16>) -> Self {
        Self {
            temperature_c: temperature_c.map(round2),
            humidity_pct: humidity_pct.map(round2),
            rain,
        }
    }
}

/// Shortest round-trip text for `v`, in the float notation the endpoint
/// script has always received: integral values keep a `.0`, and magnitudes
/// below 1e-4 or from 1e16 up switch to a signed two-digit exponent.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        let text = if v > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{v:e}");
        return match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
            Some((mantissa, Ok(exp))) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            _ => sci,
        };
    }
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

fn reading(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING_READING.to_string(), format_float)
}

/// One logged observation: a frame label, its readings and descriptors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub label: String,
    pub readings: SensorReadings,
    pub features: FeatureVector,
}

impl ObservationRecord {
    pub fn new(label: impl Into<String>, readings: SensorReadings, features: FeatureVector) -> Self {
        Self {
            label: label.into(),
            readings,
            features,
        }
    }

    /// Query parameters in the order the endpoint script expects.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let f = &self.features;
        vec![
            ("TEMP", reading(self.readings.temperature_c)),
            ("HUM", reading(self.readings.humidity_pct)),
            ("EDGE", f.edge_count.to_string()),
            ("LBPMEAN", format_float(f.lbp_mean)),
            ("LBPSTDDEV", format_float(f.lbp_stddev)),
            ("LBPSTDENT", format_float(f.lbp_entropy)),
            ("HUE", format_float(f.hue_mean)),
            ("SAT", format_float(f.saturation_mean)),
            ("VAL", format_float(f.value_mean)),
            ("CLOUD", format_float(f.cloud_percentage)),
            ("RAIN", self.readings.rain.map_or_else(|| MISSING_READING.to_string(), |r| r.to_string())),
            ("ID", self.label.clone()),
        ]
    }

    /// Percent-encoded `key=value&...` string.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full GET URL for `endpoint`, extending any query it already has.
    pub fn request_url(&self, endpoint: &str) -> String {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{sep}{}", self.query_string())
    }
}
