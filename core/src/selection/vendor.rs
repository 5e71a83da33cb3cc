use crate::prelude::{RadarError, RadarResult};
use crate::scan_interface::{normalize_address, oui_prefix};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN: &[(&str, &str)] = &[
    ("000c29", "VMware"),
    ("00146c", "Netgear"),
    ("001788", "Philips Lighting"),
    ("00180a", "Cisco Meraki"),
    ("001a11", "Google"),
    ("001b63", "Apple"),
    ("0050f2", "Microsoft"),
    ("b827eb", "Raspberry Pi Foundation"),
    ("dca632", "Raspberry Pi Trading"),
    ("f09fc2", "Ubiquiti"),
];

/// OUI (first three octets) to vendor name.
#[derive(Debug, Clone)]
pub struct VendorTable {
    entries: HashMap<String, String>,
}

impl VendorTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(oui, name)| (oui.to_string(), name.to_string()))
            .collect();
        Self { entries }
    }

    /// Reads a JSON object of `"OUI": "Vendor"` pairs; OUIs may use separators.
    pub fn from_json_str(text: &str) -> RadarResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(text)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (oui, name) in raw {
            let key = normalize_address(&oui);
            if key.len() != 6 {
                return Err(RadarError::InvalidInput(format!(
                    "vendor prefix {:?} is not three octets",
                    oui
                )));
            }
            entries.insert(key, name);
        }
        Ok(Self { entries })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> RadarResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, address: &str) -> Option<&str> {
        let normalized = normalize_address(address);
        oui_prefix(&normalized)
            .and_then(|oui| self.entries.get(oui))
            .map(String::as_str)
    }

    /// Vendor name, else `OUI: XXXXXX`, else `Unknown vendor` for short addresses.
    pub fn describe(&self, address: &str) -> String {
        if let Some(name) = self.lookup(address) {
            return name.to_string();
        }
        let normalized = normalize_address(address);
        match oui_prefix(&normalized) {
            Some(oui) => format!("OUI: {}", oui.to_ascii_uppercase()),
            None => "Unknown vendor".to_string(),
        }
    }
}

impl Default for VendorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
