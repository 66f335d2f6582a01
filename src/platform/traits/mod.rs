//! Platform abstraction traits
//!
//! This module defines the traits that storage backends must provide.

pub mod eeprom;
pub mod flash;

// Re-export trait interfaces
pub use eeprom::EepromInterface;
pub use flash::FlashInterface;
