use rand::{seq::SliceRandom, Rng};

const NETWORK_NAMES: &[&str] = &[
    "Home", "Office", "Guest", "Lab", "Studio", "Cafe", "Warehouse", "Library", "Mesh",
];
const SECURITY_LABELS: &[&str] = &["WPA2", "WPA3", "WPA2/WPA3", "Open"];
const LOW_BAND_CHANNELS: &[u32] = &[1, 6, 11];
const HIGH_BAND_CHANNELS: &[u32] = &[36, 40, 44, 48, 149, 153, 157, 161];

/// Vendor prefixes handed out to synthetic radios.
pub const VENDOR_PREFIXES: &[[u8; 3]] = &[
    [0x00, 0x1a, 0x11],
    [0xb8, 0x27, 0xeb],
    [0xf0, 0x9f, 0xc2],
    [0x00, 0x14, 0x6c],
    [0x3a, 0x7c, 0x42],
];

/// Human-looking SSID for the `index`-th synthetic access point.
pub fn ssid_for<R: Rng>(index: usize, rng: &mut R) -> String {
    let base = NETWORK_NAMES.choose(rng).copied().unwrap_or("Net");
    format!("{}-{}", base, index + 1)
}

pub fn security_for<R: Rng>(rng: &mut R) -> String {
    SECURITY_LABELS
        .choose(rng)
        .copied()
        .unwrap_or("Open")
        .to_string()
}

pub fn low_band_channel<R: Rng>(rng: &mut R) -> u32 {
    LOW_BAND_CHANNELS.choose(rng).copied().unwrap_or(1)
}

pub fn high_band_channel<R: Rng>(rng: &mut R) -> u32 {
    HIGH_BAND_CHANNELS.choose(rng).copied().unwrap_or(36)
}

pub fn format_address(octets: [u8; 6]) -> String {
    octets
        .iter()
        .map(|octet| format!("{:02X}", octet))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_formatting_is_colon_separated_upper_hex() {
        assert_eq!(
            format_address([0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x0f]),
            "AA:BB:CC:01:02:0F"
        );
    }
}
