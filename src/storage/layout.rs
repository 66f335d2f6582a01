//! Sentinel layout configuration
//!
//! The sentinel region is four bytes at a reserved base address: two marker
//! bytes followed by the little-endian score.
//!
//! The base address defaults to [`DEFAULT_SENTINEL_BASE`] and can be moved at
//! build time through the `EEPROM_SENTINEL_BASE` environment variable
//! (decimal or `0x`-prefixed hex). Unparsable values fall back to the default.

/// Marker bytes identifying an initialized region ('S', 'T')
pub const SENTINEL_MARKER: [u8; 2] = *b"ST";

/// Base address used when `EEPROM_SENTINEL_BASE` is unset
pub const DEFAULT_SENTINEL_BASE: u16 = 200;

/// Offset of the score field from the sentinel base
pub const SCORE_OFFSET: u16 = 2;

/// Bytes covered by the sentinel region (marker + score)
pub const LAYOUT_SIZE: u16 = 4;

/// Sentinel base address (from build-time environment variable)
pub const SENTINEL_BASE: u16 = {
    // build.rs always defines the variable, empty when unset
    const S: &str = env!("EEPROM_SENTINEL_BASE");
    const_parse_u16(S, DEFAULT_SENTINEL_BASE)
};

/// Parse a u16 from a decimal or `0x` hex string at compile time
const fn const_parse_u16(s: &str, fallback: u16) -> u16 {
    let bytes = s.as_bytes();
    let hex = bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X');
    let (radix, mut i): (u32, usize) = if hex {
        (16, 2)
    } else {
        (10, 0)
    };

    if i >= bytes.len() {
        return fallback;
    }

    let mut value: u32 = 0;
    while i < bytes.len() {
        let digit = match bytes[i] {
            b'0'..=b'9' => (bytes[i] - b'0') as u32,
            b'a'..=b'f' if radix == 16 => (bytes[i] - b'a' + 10) as u32,
            b'A'..=b'F' if radix == 16 => (bytes[i] - b'A' + 10) as u32,
            _ => return fallback,
        };
        value = value * radix + digit;
        if value > u16::MAX as u32 {
            return fallback;
        }
        i += 1;
    }

    value as u16
}

/// Placement of the sentinel and score fields
///
/// # Example
///
/// ```
/// use eeprom_store::storage::SentinelLayout;
///
/// let layout = SentinelLayout::new(200);
/// assert_eq!(layout.marker(), *b"ST");
/// assert_eq!(layout.score_address(), 202);
/// assert_eq!(layout.end(), 204);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SentinelLayout {
    base: u16,
    marker: [u8; 2],
}

impl SentinelLayout {
    /// Layout at `base` with the standard 'S', 'T' marker
    pub const fn new(base: u16) -> Self {
        Self {
            base,
            marker: SENTINEL_MARKER,
        }
    }

    /// Replace the marker bytes
    pub const fn with_marker(self, marker: [u8; 2]) -> Self {
        Self { marker, ..self }
    }

    /// Address of the first marker byte
    pub const fn base(&self) -> u16 {
        self.base
    }

    /// Expected marker bytes
    pub const fn marker(&self) -> [u8; 2] {
        self.marker
    }

    /// Address of the second marker byte
    pub const fn second_marker_address(&self) -> u16 {
        self.base.wrapping_add(1)
    }

    /// Address of the score field
    pub const fn score_address(&self) -> u16 {
        self.base.wrapping_add(SCORE_OFFSET)
    }

    /// One past the last byte of the region
    pub const fn end(&self) -> u32 {
        self.base as u32 + LAYOUT_SIZE as u32
    }
}

impl Default for SentinelLayout {
    fn default() -> Self {
        Self::new(SENTINEL_BASE)
    }
}
