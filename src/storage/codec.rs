//! 16-bit integer codec
//!
//! Values are stored as two consecutive bytes, low byte first
//! (little-endian). Each byte goes through `write_byte`, so both cells see a
//! physical write on every call.

use crate::platform::traits::EepromInterface;

/// Write `value` as two bytes at `address` (low) and `address + 1` (high)
///
/// # Example
///
/// ```
/// use eeprom_store::storage::{read_u16, write_u16};
///
/// let mut eeprom = [0xFFu8; 16];
/// write_u16(&mut eeprom, 4, 0x1234);
/// assert_eq!(eeprom[4..6], [0x34, 0x12]);
/// assert_eq!(read_u16(&mut eeprom, 4), 0x1234);
/// ```
pub fn write_u16<E: EepromInterface + ?Sized>(eeprom: &mut E, address: u16, value: u16) {
    debug_assert_in_range(eeprom, address);

    let [low, high] = value.to_le_bytes();
    eeprom.write_byte(address, low);
    eeprom.write_byte(address.wrapping_add(1), high);
}

/// Write the low 16 bits of `value`; higher bits are discarded
///
/// Negative values wrap, so the stored result is always `value mod 65536`.
pub fn write_int<E: EepromInterface + ?Sized>(eeprom: &mut E, address: u16, value: i32) {
    write_u16(eeprom, address, value as u16);
}

/// Read two bytes at `address` (low) and `address + 1` (high)
pub fn read_u16<E: EepromInterface + ?Sized>(eeprom: &mut E, address: u16) -> u16 {
    debug_assert_in_range(eeprom, address);

    let low = eeprom.read_byte(address);
    let high = eeprom.read_byte(address.wrapping_add(1));
    u16::from_le_bytes([low, high])
}

/// Both cells of the pair must exist; the high cell wraps to 0 after 0xFFFF
#[inline]
fn debug_assert_in_range<E: EepromInterface + ?Sized>(eeprom: &E, address: u16) {
    debug_assert!(
        (address as u32) < eeprom.capacity()
            && (address.wrapping_add(1) as u32) < eeprom.capacity(),
        "16-bit value at {} exceeds EEPROM capacity {}",
        address,
        eeprom.capacity()
    );
}
