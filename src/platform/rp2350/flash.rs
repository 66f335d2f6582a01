//! RP2350 Flash backend for EEPROM emulation
//!
//! Serves a single purpose: the 4 KB block right after the firmware image
//! that [`FlashEeprom`](crate::platform::FlashEeprom) turns into emulated
//! EEPROM. The boot ROM only programs whole 256-byte pages, so this backend
//! rejects anything smaller instead of handing it to the ROM.
//!
//! ```text
//! [Firmware]           0x000000 - 0x040000 (256 KB) - PROTECTED
//! [EEPROM Emulation]   0x040000 - 0x041000 (4 KB)   - EEPROM_REGION
//! ```
//!
//! Erases and programs are verified by reading back through the XIP window.
//!
//! # Safety
//!
//! Erase/program run the ROM routines with XIP disabled inside a critical
//! section. Code executing from Flash on the other core will fault meanwhile.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use rp235x_hal::rom_data;

/// Protected firmware image size
const FIRMWARE_SIZE: u32 = 0x40000;

/// ROM program granularity
const PAGE_SIZE: u32 = 256;

/// Sector erase granularity
const BLOCK_SIZE: u32 = 4096;

/// 4 KB sector erase command
const SECTOR_ERASE_CMD: u8 = 0x20;

/// Pico 2 W Flash size
const FLASH_CAPACITY: u32 = 4 * 1024 * 1024;

/// XIP window base; Flash offset 0 is mapped here
const XIP_BASE: usize = 0x1000_0000;

/// Flash offset of the emulated EEPROM
pub const EEPROM_REGION: u32 = FIRMWARE_SIZE;

/// RP2350 on-board QSPI Flash
pub struct Rp2350Flash;

impl Rp2350Flash {
    /// Create a new RP2350 Flash instance
    pub fn new() -> Self {
        Self
    }

    fn is_writable(address: u32, len: usize) -> bool {
        address >= FIRMWARE_SIZE && address as usize + len <= FLASH_CAPACITY as usize
    }

    /// Borrow `len` bytes at `address` through the XIP window
    fn xip_slice(address: u32, len: usize) -> &'static [u8] {
        // SAFETY: callers validate the range against FLASH_CAPACITY; XIP is
        // re-enabled before any erase/program returns
        unsafe { core::slice::from_raw_parts((XIP_BASE + address as usize) as *const u8, len) }
    }

    /// Run a ROM erase/program routine with XIP disabled
    ///
    /// # Safety
    ///
    /// `f` must not touch XIP memory.
    unsafe fn with_xip_disabled<F: FnOnce()>(&mut self, f: F) {
        cortex_m::interrupt::free(|_cs| {
            rom_data::connect_internal_flash();
            rom_data::flash_exit_xip();

            f();

            // Stale cache lines would hide the new contents from read-back
            rom_data::flash_flush_cache();
            rom_data::flash_enter_cmd_xip();
        })
    }
}

impl Default for Rp2350Flash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for Rp2350Flash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if address as usize + buf.len() > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }

        buf.copy_from_slice(Self::xip_slice(address, buf.len()));
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !Self::is_writable(address, data.len())
            || !address.is_multiple_of(PAGE_SIZE)
            || !(data.len() as u32).is_multiple_of(PAGE_SIZE)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        // SAFETY: page-aligned range outside firmware; `data` lives in RAM
        unsafe {
            self.with_xip_disabled(|| {
                rom_data::flash_range_program(address, data.as_ptr(), data.len());
            });
        }

        // Every 0 bit in `data` must now read back as 0
        let programmed = Self::xip_slice(address, data.len());
        if programmed.iter().zip(data).any(|(actual, wanted)| actual & !wanted != 0) {
            return Err(FlashError::WriteFailed.into());
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !Self::is_writable(address, size as usize)
            || !address.is_multiple_of(BLOCK_SIZE)
            || !size.is_multiple_of(BLOCK_SIZE)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        // SAFETY: block-aligned range outside firmware
        unsafe {
            self.with_xip_disabled(|| {
                rom_data::flash_range_erase(address, size as usize, BLOCK_SIZE, SECTOR_ERASE_CMD);
            });
        }

        if Self::xip_slice(address, size as usize).iter().any(|&b| b != 0xFF) {
            return Err(FlashError::EraseFailed.into());
        }

        Ok(())
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}
