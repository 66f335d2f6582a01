//! Store error types
//!
//! Only construction can fail. Once an [`EepromStore`](super::EepromStore)
//! exists, its operations report no errors.

use core::fmt;

/// Errors from store construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Sentinel region does not fit in the device
    LayoutOutOfRange {
        /// One past the last byte of the sentinel region
        end: u32,
        /// Device capacity in bytes
        capacity: u32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LayoutOutOfRange { end, capacity } => write!(
                f,
                "sentinel region ends at {} but EEPROM holds {} bytes",
                end, capacity
            ),
        }
    }
}
