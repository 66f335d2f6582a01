//! Mock platform implementation for testing
//!
//! This module provides in-memory storage devices that can be used for
//! unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use eeprom_store::platform::mock::MockEeprom;
//! use eeprom_store::platform::traits::EepromInterface;
//!
//! let mut eeprom = MockEeprom::new();
//! eeprom.update_byte(200, b'S');
//! assert_eq!(eeprom.get_write_count(200), 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod eeprom;
mod flash;

pub use eeprom::MockEeprom;
pub use flash::MockFlash;
