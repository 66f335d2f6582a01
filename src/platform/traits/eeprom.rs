//! EEPROM interface trait
//!
//! This module defines the byte-addressable non-volatile storage interface
//! that the store accessor is built on.

/// Byte-addressable non-volatile storage
///
/// The device is externally owned hardware (or an emulation of it). All
/// operations complete synchronously and report no errors: out-of-range
/// addresses behave however the underlying device behaves.
///
/// # Write vs. Update
///
/// - [`write_byte`](Self::write_byte) always performs a physical write cycle
/// - [`update_byte`](Self::update_byte) skips the cycle when the cell already
///   holds the value, which saves wear on EEPROM and Flash media
///
/// Both leave the cell holding `value`; callers cannot tell them apart by
/// reading back.
///
/// # Test Doubles
///
/// Fixed-size byte arrays implement this trait directly, so `[0xFF; N]` can
/// stand in for a freshly erased part:
///
/// ```
/// use eeprom_store::platform::traits::EepromInterface;
///
/// let mut eeprom = [0xFFu8; 64];
/// eeprom.write_byte(10, 0x53);
/// assert_eq!(eeprom.read_byte(10), 0x53);
/// assert_eq!(eeprom.capacity(), 64);
/// ```
pub trait EepromInterface {
    /// Read the byte stored at `address`
    fn read_byte(&mut self, address: u16) -> u8;

    /// Write `value` to `address`, always performing the physical write
    fn write_byte(&mut self, address: u16, value: u8);

    /// Write `value` to `address` only if the stored byte differs
    fn update_byte(&mut self, address: u16, value: u8) {
        if self.read_byte(address) != value {
            self.write_byte(address, value);
        }
    }

    /// Number of addressable bytes
    fn capacity(&self) -> u32;
}

impl<E: EepromInterface + ?Sized> EepromInterface for &mut E {
    fn read_byte(&mut self, address: u16) -> u8 {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        (**self).write_byte(address, value)
    }

    fn update_byte(&mut self, address: u16, value: u8) {
        (**self).update_byte(address, value)
    }

    fn capacity(&self) -> u32 {
        (**self).capacity()
    }
}

impl<const N: usize> EepromInterface for [u8; N] {
    fn read_byte(&mut self, address: u16) -> u8 {
        self[address as usize]
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self[address as usize] = value;
    }

    fn capacity(&self) -> u32 {
        N as u32
    }
}
