use crate::processing::AccessPointGroup;
use crate::selection::vendor::VendorTable;
use serde::Serialize;
use std::fmt;

pub const QUALITY_SEGMENTS: usize = 5;

/// Frequency band inferred from a group's channel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandClass {
    TwoPointFourGhz,
    FiveGhz,
    Mixed,
    Unknown,
}

impl BandClass {
    pub fn from_channels(channels: &[u32]) -> Self {
        if channels.is_empty() {
            Self::Unknown
        } else if channels.iter().all(|&channel| channel <= 14) {
            Self::TwoPointFourGhz
        } else if channels.iter().all(|&channel| channel > 14) {
            Self::FiveGhz
        } else {
            Self::Mixed
        }
    }
}

impl fmt::Display for BandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoPointFourGhz => write!(f, "2.4GHz"),
            Self::FiveGhz => write!(f, "5GHz"),
            Self::Mixed => write!(f, "2.4GHz + 5GHz"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Quality percentage for the five-segment bar.
pub fn signal_quality(signal_dbm: i32) -> u8 {
    match signal_dbm {
        s if s >= -50 => 100,
        s if s >= -60 => 80,
        s if s >= -70 => 60,
        s if s >= -80 => 40,
        _ => 20,
    }
}

/// One merged observation listed under a multi-variant group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantLine {
    pub channel: u32,
    pub signal_dbm: i32,
    /// Present only when it differs from the group's primary address.
    pub address: Option<String>,
}

/// Detail panel content for the selected access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub vendor: String,
    pub signal_dbm: i32,
    pub quality_percent: u8,
    pub channels: Vec<u32>,
    pub band: BandClass,
    pub security: String,
    pub address: String,
    pub variants: Vec<VariantLine>,
}

impl DetailView {
    pub fn for_group(group: &AccessPointGroup, vendors: &VendorTable) -> Self {
        let primary = group.representative.normalized_address();
        let channels: Vec<u32> = group.channels.iter().copied().collect();
        let security = group
            .variants
            .iter()
            .find_map(|variant| variant.security.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let variants = if group.variants.len() > 1 {
            group
                .variants
                .iter()
                .map(|variant| VariantLine {
                    channel: variant.channel,
                    signal_dbm: variant.signal_level,
                    address: (variant.normalized_address() != primary)
                        .then(|| variant.bssid.clone()),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            name: if group.ssid().trim().is_empty() {
                "(hidden network)".to_string()
            } else {
                group.ssid().trim().to_string()
            },
            vendor: vendors.describe(group.address()),
            signal_dbm: group.signal_level,
            quality_percent: signal_quality(group.signal_level),
            band: BandClass::from_channels(&channels),
            channels,
            security,
            address: group.address().to_string(),
            variants,
        }
    }

    /// Filled segments of the quality bar.
    pub fn quality_segments(&self) -> usize {
        usize::from(self.quality_percent) * QUALITY_SEGMENTS / 100
    }

    pub fn quality_bar(&self) -> String {
        let filled = self.quality_segments();
        format!(
            "{}{}",
            "#".repeat(filled),
            "-".repeat(QUALITY_SEGMENTS - filled)
        )
    }

    /// Panel text, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let channels = self
            .channels
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let mut lines = vec![
            self.name.clone(),
            format!("Vendor: {}", self.vendor),
            format!(
                "Signal: {} dBm [{}] {}%",
                self.signal_dbm,
                self.quality_bar(),
                self.quality_percent
            ),
            format!("Channels: {} ({})", channels, self.band),
            format!("Security: {}", self.security),
            format!("Address: {}", self.address),
        ];
        if !self.variants.is_empty() {
            lines.push(format!("Variants ({}):", self.variants.len()));
            for variant in &self.variants {
                let mut line = format!("  ch {} @ {} dBm", variant.channel, variant.signal_dbm);
                if let Some(address) = &variant.address {
                    line.push_str(&format!(" - {}", address));
                }
                lines.push(line);
            }
        }
        lines
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::GroupingEngine;
    use crate::scan_interface::ScanRecord;

    fn detail(records: &[ScanRecord]) -> DetailView {
        let group = GroupingEngine::with_seed(5).group(records).remove(0);
        DetailView::for_group(&group, &VendorTable::builtin())
    }

    #[test]
    fn quality_thresholds() {
        assert_eq!(signal_quality(-50), 100);
        assert_eq!(signal_quality(-51), 80);
        assert_eq!(signal_quality(-60), 80);
        assert_eq!(signal_quality(-70), 60);
        assert_eq!(signal_quality(-80), 40);
        assert_eq!(signal_quality(-81), 20);
        assert_eq!(signal_quality(-100), 20);
    }

    #[test]
    fn band_classification() {
        assert_eq!(BandClass::from_channels(&[1, 6, 11]), BandClass::TwoPointFourGhz);
        assert_eq!(BandClass::from_channels(&[36, 149]), BandClass::FiveGhz);
        assert_eq!(BandClass::from_channels(&[6, 36]), BandClass::Mixed);
        assert_eq!(BandClass::from_channels(&[]), BandClass::Unknown);
    }

    #[test]
    fn merged_group_lists_variants_and_differing_addresses() {
        let view = detail(&[
            ScanRecord::new("Home", "AA:BB:CC:11:22:01", -50, 6).with_security("WPA2"),
            ScanRecord::new("Home", "AA:BB:CC:11:22:02", -65, 36),
            ScanRecord::new("Home", "aa-bb-cc-11-22-01", -58, 1),
        ]);
        assert_eq!(view.name, "Home");
        assert_eq!(view.vendor, "OUI: AABBCC");
        assert_eq!(view.channels, vec![1, 6, 36]);
        assert_eq!(view.band, BandClass::Mixed);
        assert_eq!(view.security, "WPA2");
        assert_eq!(view.quality_percent, 100);
        assert_eq!(view.variants.len(), 3);
        assert_eq!(view.variants[0].address, None);
        assert_eq!(view.variants[1].address.as_deref(), Some("AA:BB:CC:11:22:02"));
        assert_eq!(view.variants[2].address, None);
    }

    #[test]
    fn single_variant_group_has_no_variant_list() {
        let view = detail(&[ScanRecord::new("", "b8:27:eb:00:00:01", -72, 11)]);
        assert_eq!(view.name, "(hidden network)");
        assert_eq!(view.vendor, "Raspberry Pi Foundation");
        assert_eq!(view.security, "Unknown");
        assert!(view.variants.is_empty());
        assert_eq!(view.quality_bar(), "##---");
    }

    #[test]
    fn lines_render_every_section() {
        let view = detail(&[
            ScanRecord::new("Office", "00:1a:11:00:00:01", -45, 1),
            ScanRecord::new("Office", "00:1a:11:00:00:02", -55, 6),
        ]);
        let text = view.to_string();
        assert!(text.contains("Vendor: Google"));
        assert!(text.contains("Channels: 1, 6 (2.4GHz)"));
        assert!(text.contains("Variants (2):"));
        assert!(text.contains("00:1a:11:00:00:02"));
    }
}
