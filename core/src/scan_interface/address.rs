/// Number of leading hex characters two addresses must share to be related.
pub const RELATED_PREFIX_LEN: usize = 10;

/// Minimum normalized length for an address to take part in relatedness.
pub const RELATED_MIN_LEN: usize = 12;

/// Length of the vendor (OUI) prefix in hex characters.
pub const OUI_LEN: usize = 6;

/// Canonicalizes a hardware address: lowercase hex characters only.
///
/// Separators and any other non-hex characters are dropped, so
/// `"AA:BB-cc.11"` becomes `"aabbcc11"`. An empty result means "no address".
pub fn normalize_address(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Two normalized addresses are related when they differ only in the last octet.
pub fn is_related(lhs: &str, rhs: &str) -> bool {
    lhs.len() >= RELATED_MIN_LEN
        && rhs.len() >= RELATED_MIN_LEN
        && lhs[..RELATED_PREFIX_LEN] == rhs[..RELATED_PREFIX_LEN]
}

/// Vendor prefix of a normalized address, if it is long enough to carry one.
pub fn oui_prefix(normalized: &str) -> Option<&str> {
    normalized.get(..OUI_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_separators_and_lowercases() {
        assert_eq!(normalize_address("AA:BB:CC:11:22:01"), "aabbcc112201");
        assert_eq!(normalize_address("aa-bb.cc 11:22:0F"), "aabbcc11220f");
    }

    #[test]
    fn normalize_empty_and_garbage_yield_empty() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_address("--:--"), "");
        assert_eq!(normalize_address("unknown"), "");
    }

    #[test]
    fn related_requires_full_length_and_shared_prefix() {
        assert!(is_related("aabbcc112201", "aabbcc112202"));
        assert!(!is_related("aabbcc112201", "aabbcc113301"));
        assert!(!is_related("aabbcc1122", "aabbcc1122"));
    }

    #[test]
    fn oui_prefix_needs_six_characters() {
        assert_eq!(oui_prefix("001a11ffeedd"), Some("001a11"));
        assert_eq!(oui_prefix("001a"), None);
    }
}
