//! Player identity type

use std::fmt;

/// 128-bit globally unique player identifier.
///
/// Supplied by the host when a player is addressed; permbridge never
/// generates ids. The inner value is opaque - backends are free to
/// interpret it as a UUID or any other 128-bit scheme.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u128);

impl PlayerId {
    /// Create an id from a raw 128-bit value
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Create an id from two 64-bit halves (high, low)
    pub const fn from_parts(hi: u64, lo: u64) -> Self {
        Self(((hi as u128) << 64) | lo as u128)
    }

    /// Raw 128-bit value
    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    /// Canonical 8-4-4-4-12 hex grouping, for logs and diagnostics
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xffff_ffff_ffff
        )
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_round_trip() {
        let id = PlayerId::from_parts(0xdead_beef_0000_0001, 0x0000_0000_cafe_f00d);
        assert_eq!(id.as_u128() >> 64, 0xdead_beef_0000_0001);
        assert_eq!(id.as_u128() as u64, 0x0000_0000_cafe_f00d);
    }

    #[test]
    fn test_display_grouping() {
        let id = PlayerId::new(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        assert_eq!(id.to_string(), "01234567-89ab-cdef-0123-456789abcdef");
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(PlayerId::new(42), PlayerId::new(42));
        assert_ne!(PlayerId::new(42), PlayerId::new(43));
    }
}
