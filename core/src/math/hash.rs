/// Order-dependent 32-bit string hash (`h = h * 31 + unit`, wrapping).
///
/// Iterates UTF-16 code units so identifiers hash identically to the
/// dashboard's browser-side renderer.
pub fn string_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Angle in degrees, `[0, 360)`, derived from [`string_hash`].
pub fn hash_degrees(input: &str) -> u32 {
    string_hash(input).unsigned_abs() % 360
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn hash_is_order_dependent() {
        assert_ne!(string_hash("ab"), string_hash("ba"));
    }

    #[test]
    fn hash_wraps_instead_of_overflowing() {
        let long = "aabbcc112201".repeat(16);
        assert!(hash_degrees(&long) < 360);
    }
}
