//! Polynomial rolling string hash.

/// Hash a string to 32 bits: `hash = hash * 31 + unit` over its UTF-16 code units,
/// wrapping modulo 2^32.
///
/// Stable across platforms and process restarts. Every seed-derived integer in the
/// crate goes through this function; never substitute `std::hash`.
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32))
}

/// Hash the concatenation `prefix + suffix` without allocating.
pub fn string_hash_concat(prefix: &str, suffix: &str) -> u32 {
    prefix
        .encode_utf16()
        .chain(suffix.encode_utf16())
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_hashes_to_zero() {
        assert_eq!(string_hash(""), 0);
    }

    #[test]
    fn matches_reference_values() {
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("2024-01-01"), 3_681_625_664);
        assert_eq!(string_hash("2024-06-01"), 3_681_774_619);
        assert_eq!(string_hash("2024-01-01-suggested"), 832_627_670);
    }

    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(string_hash("é"), 233);
        assert_eq!(string_hash("日本"), 835_047);
    }

    #[test]
    fn concat_matches_joined_string() {
        assert_eq!(
            string_hash_concat("2024-01-01", "work-3"),
            string_hash("2024-01-01work-3")
        );
        assert_eq!(string_hash_concat("", "abc"), string_hash("abc"));
    }
}
