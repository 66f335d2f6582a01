//! Flash interface trait
//!
//! This module defines the Flash storage interface used to emulate an
//! EEPROM on parts that only have NOR Flash (RP2350).

use crate::platform::Result;

/// Flash interface trait
///
/// Platform implementations must provide this interface for Flash read/write/erase operations.
///
/// # Flash Characteristics
///
/// - Flash is organized in blocks (4 KB on RP2350) split into program pages (256 bytes)
/// - Erase operations set a whole block to 0xFF
/// - Program operations cover whole pages and can only change bits from 1→0
/// - Programming 0xFF leaves a byte unchanged, so a single byte is programmed
///   by writing its page with every other byte set to 0xFF
/// - Flash operations are blocking
///
/// # Safety Invariants
///
/// - Only one owner per Flash instance (no concurrent access)
/// - Must not erase/write firmware region (implementations must validate addresses)
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// Reads have no alignment requirement.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the range is out of bounds.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Program `data` starting at `address`
    ///
    /// `address` and `data.len()` must be multiples of [`page_size`](Self::page_size).
    /// Programming can only clear bits; the caller erases first when a bit
    /// has to go from 0 back to 1.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the range is
    /// protected, out of bounds, or not page-aligned.
    /// Returns `PlatformError::Flash(FlashError::WriteFailed)` if a bit that should
    /// have been cleared still reads back as 1.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address` to 0xFF
    ///
    /// Both `address` and `size` must be multiples of [`block_size`](Self::block_size).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if the region is
    /// protected or misaligned.
    /// Returns `PlatformError::Flash(FlashError::EraseFailed)` if the region does
    /// not read back as 0xFF.
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Program granularity in bytes
    fn page_size(&self) -> u32;

    /// Minimum erasable unit size in bytes
    fn block_size(&self) -> u32;

    /// Total Flash capacity in bytes
    fn capacity(&self) -> u32;
}
