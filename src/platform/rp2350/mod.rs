//! RP2350 platform implementation
//!
//! Only Flash is needed: the RP2350 has no EEPROM, so
//! [`FlashEeprom`](crate::platform::FlashEeprom) emulates one on top of
//! [`Rp2350Flash`].

mod flash;

pub use flash::{Rp2350Flash, EEPROM_REGION};
