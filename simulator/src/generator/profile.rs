use crate::generator::template::{
    format_address, high_band_channel, low_band_channel, security_for, ssid_for, VENDOR_PREFIXES,
};
use anyhow::ensure;
use rand::{rngs::StdRng, Rng, SeedableRng};
use scanradar::ScanRecord;
use serde::{Deserialize, Serialize};

/// Upper bound keeps every synthetic radio on a distinct address.
const MAX_ACCESS_POINTS: usize = 4096;

/// Configuration for generating a synthetic scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub access_points: usize,
    pub seed: u64,
    /// Share of radios that also advertise on 5 GHz under a sibling address.
    pub dual_band_ratio: f64,
    /// Share of observations reported twice.
    pub duplicate_ratio: f64,
    pub hidden_ratio: f64,
    /// Share of observations whose address is missing or unreadable.
    pub malformed_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            access_points: 12,
            seed: 0,
            dual_band_ratio: 0.4,
            duplicate_ratio: 0.2,
            hidden_ratio: 0.1,
            malformed_ratio: 0.05,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.access_points <= MAX_ACCESS_POINTS,
            "at most {} access points can be generated, got {}",
            MAX_ACCESS_POINTS,
            self.access_points
        );
        for (name, ratio) in [
            ("dual_band_ratio", self.dual_band_ratio),
            ("duplicate_ratio", self.duplicate_ratio),
            ("hidden_ratio", self.hidden_ratio),
            ("malformed_ratio", self.malformed_ratio),
        ] {
            ensure!(
                (0.0..=1.0).contains(&ratio),
                "{} must be within [0, 1], got {}",
                name,
                ratio
            );
        }
        Ok(())
    }
}

/// Builds a scan that exercises every grouping path: sibling addresses,
/// exact duplicates, hidden SSIDs and unreadable addresses.
pub fn build_scan_records(config: &GeneratorConfig) -> anyhow::Result<Vec<ScanRecord>> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.access_points * 2);

    for index in 0..config.access_points {
        let prefix = VENDOR_PREFIXES[index % VENDOR_PREFIXES.len()];
        let octets = [
            prefix[0],
            prefix[1],
            prefix[2],
            (index >> 8) as u8,
            (index & 0xff) as u8,
            0x10,
        ];
        let ssid = if rng.gen_bool(config.hidden_ratio) {
            String::new()
        } else {
            ssid_for(index, &mut rng)
        };
        let security = security_for(&mut rng);
        let signal = rng.gen_range(-90..=-30);

        let bssid = if rng.gen_bool(config.malformed_ratio) {
            if rng.gen_bool(0.5) {
                String::new()
            } else {
                "N/A".to_string()
            }
        } else {
            format_address(octets)
        };

        let primary =
            ScanRecord::new(&ssid, &bssid, signal, low_band_channel(&mut rng)).with_security(&security);
        if rng.gen_bool(config.duplicate_ratio) {
            let mut echo = primary.clone();
            echo.signal_level = (signal + rng.gen_range(-4..=4)).clamp(-95, -25);
            records.push(echo);
        }
        records.push(primary);

        if !bssid.is_empty() && bssid != "N/A" && rng.gen_bool(config.dual_band_ratio) {
            let mut sibling = octets;
            sibling[5] = sibling[5].wrapping_add(1);
            let signal = (signal - rng.gen_range(3..=10)).max(-95);
            records.push(
                ScanRecord::new(
                    &ssid,
                    &format_address(sibling),
                    signal,
                    high_band_channel(&mut rng),
                )
                .with_security(&security),
            );
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanradar::processing::GroupingEngine;

    #[test]
    fn generator_is_deterministic_per_seed() {
        let config = GeneratorConfig {
            seed: 42,
            ..Default::default()
        };
        let first = build_scan_records(&config).unwrap();
        let second = build_scan_records(&config).unwrap();
        assert_eq!(first, second);
        assert!(first.len() >= config.access_points);
    }

    #[test]
    fn dual_band_siblings_collapse_into_one_group() {
        let config = GeneratorConfig {
            access_points: 8,
            seed: 3,
            dual_band_ratio: 1.0,
            duplicate_ratio: 0.0,
            hidden_ratio: 0.0,
            malformed_ratio: 0.0,
        };
        let records = build_scan_records(&config).unwrap();
        assert_eq!(records.len(), 16);
        let groups = GroupingEngine::with_seed(1).group(&records);
        assert_eq!(groups.len(), 8);
        assert!(groups.iter().all(|group| group.channel_count() == 2));
    }

    #[test]
    fn ratios_outside_unit_interval_are_rejected() {
        let config = GeneratorConfig {
            hidden_ratio: 1.5,
            ..Default::default()
        };
        assert!(build_scan_records(&config).is_err());
    }
}
