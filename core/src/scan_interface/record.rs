use crate::prelude::{RadarError, RadarResult};
use crate::scan_interface::address::normalize_address;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signal assigned to observations whose level cannot be parsed.
pub const WEAK_SIGNAL_DBM: i32 = -100;

const SSID_KEYS: &[&str] = &["ssid", "SSID", "name"];
const ADDRESS_KEYS: &[&str] = &["bssid", "BSSID", "mac", "address"];
const SIGNAL_KEYS: &[&str] = &["signal_level", "signalLevel", "signal", "level", "rssi"];
const CHANNEL_KEYS: &[&str] = &["channel", "chan"];
const SECURITY_KEYS: &[&str] = &["security", "encryption", "auth"];
const FREQUENCY_KEYS: &[&str] = &["frequency", "freq"];
const CONTAINER_KEYS: &[&str] = &["networks", "wifi", "results"];

/// Canonical access-point observation consumed by the grouping engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ssid: String,
    pub bssid: String,
    pub signal_level: i32,
    pub channel: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
}

impl ScanRecord {
    pub fn new(ssid: &str, bssid: &str, signal_level: i32, channel: u32) -> Self {
        Self {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            signal_level,
            channel,
            security: None,
            frequency: None,
        }
    }

    pub fn with_security(mut self, security: &str) -> Self {
        self.security = Some(security.to_string());
        self
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn normalized_address(&self) -> String {
        normalize_address(&self.bssid)
    }

    pub fn normalized_ssid(&self) -> String {
        self.ssid.trim().to_lowercase()
    }

    /// Builds a canonical record from one loosely-shaped JSON object.
    ///
    /// Returns `None` only when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let ssid = lookup(object, SSID_KEYS)
            .and_then(value_as_string)
            .unwrap_or_default();
        let bssid = lookup(object, ADDRESS_KEYS)
            .and_then(value_as_string)
            .unwrap_or_default();
        let signal_level = lookup(object, SIGNAL_KEYS)
            .and_then(value_as_number)
            .map(|level| level.round() as i32)
            .unwrap_or(WEAK_SIGNAL_DBM);
        let frequency = lookup(object, FREQUENCY_KEYS)
            .and_then(value_as_number)
            .and_then(frequency_mhz);
        let channel = lookup(object, CHANNEL_KEYS)
            .and_then(value_as_number)
            .filter(|channel| *channel >= 0.0)
            .map(|channel| channel as u32)
            .or_else(|| frequency.and_then(channel_from_frequency))
            .unwrap_or(0);
        let security = lookup(object, SECURITY_KEYS)
            .and_then(value_as_string)
            .filter(|label| !label.trim().is_empty());

        Some(Self {
            ssid,
            bssid,
            signal_level,
            channel,
            security,
            frequency,
        })
    }
}

/// Parses scan output into canonical records.
///
/// Accepts a bare array or an object wrapping the array under a
/// `networks`, `wifi` or `results` key.
pub fn parse_scan_json(text: &str) -> RadarResult<Vec<ScanRecord>> {
    let value: Value = serde_json::from_str(text)?;
    records_from_value(&value)
}

pub fn records_from_value(value: &Value) -> RadarResult<Vec<ScanRecord>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(object) => lookup(object, CONTAINER_KEYS)
            .and_then(Value::as_array)
            .ok_or_else(|| RadarError::InvalidInput("no scan record array found".into()))?,
        _ => {
            return Err(RadarError::InvalidInput(
                "scan payload must be an array or object".into(),
            ))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match ScanRecord::from_value(entry) {
            Some(record) => records.push(record),
            None => warn!("skipping scan entry {} that is not an object", idx),
        }
    }
    Ok(records)
}

fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Reads a number from either a JSON number or the leading token of a string
/// such as `"-52 dBm"`.
fn value_as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            let end = trimmed
                .char_indices()
                .find(|&(idx, c)| {
                    let sign = idx == 0 && (c == '-' || c == '+');
                    !(c.is_ascii_digit() || c == '.' || sign)
                })
                .map(|(idx, _)| idx)
                .unwrap_or(trimmed.len());
            trimmed[..end].parse::<f64>().ok()
        }
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

/// Normalizes a frequency to MHz; values below 100 are taken as GHz.
fn frequency_mhz(value: f64) -> Option<u32> {
    if value <= 0.0 {
        None
    } else if value < 100.0 {
        Some((value * 1000.0).round() as u32)
    } else {
        Some(value.round() as u32)
    }
}

fn channel_from_frequency(mhz: u32) -> Option<u32> {
    match mhz {
        2484 => Some(14),
        2412..=2472 => Some((mhz - 2407) / 5),
        5000..=5900 => Some((mhz - 5000) / 5),
        5925..=7125 => Some((mhz - 5950) / 5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ingestion_accepts_naming_variants() {
        let snake = ScanRecord::from_value(&json!({
            "ssid": "Home", "bssid": "AA:BB:CC:11:22:01", "signal_level": -50, "channel": 1
        }))
        .unwrap();
        let camel = ScanRecord::from_value(&json!({
            "ssid": "Home", "mac": "AA:BB:CC:11:22:01", "signalLevel": -50, "channel": 1
        }))
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.signal_level, -50);
    }

    #[test]
    fn signal_strings_are_parsed_and_garbage_falls_back_to_weak() {
        let parsed = ScanRecord::from_value(&json!({"signal": "-63 dBm"})).unwrap();
        assert_eq!(parsed.signal_level, -63);

        let garbage = ScanRecord::from_value(&json!({"signal": "strong"})).unwrap();
        assert_eq!(garbage.signal_level, WEAK_SIGNAL_DBM);

        let missing = ScanRecord::from_value(&json!({"ssid": "x"})).unwrap();
        assert_eq!(missing.signal_level, WEAK_SIGNAL_DBM);
    }

    #[test]
    fn channel_is_inferred_from_frequency_when_missing() {
        let low = ScanRecord::from_value(&json!({"frequency": 2437})).unwrap();
        assert_eq!(low.channel, 6);
        let high = ScanRecord::from_value(&json!({"freq": "5.18 GHz"})).unwrap();
        assert_eq!(high.channel, 36);
        assert_eq!(high.frequency, Some(5180));
    }

    #[test]
    fn parse_scan_json_unwraps_containers_and_skips_non_objects() {
        let records =
            parse_scan_json(r#"{"networks": [{"ssid": "a", "channel": "11"}, 7, null]}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel, 11);

        assert!(parse_scan_json("\"nope\"").is_err());
        assert!(parse_scan_json("{not json").is_err());
    }

    #[test]
    fn blank_security_is_dropped() {
        let record = ScanRecord::from_value(&json!({"security": "  "})).unwrap();
        assert_eq!(record.security, None);
    }
}
