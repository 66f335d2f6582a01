//! Mock Flash implementation for testing
//!
//! Provides in-memory Flash simulation for the EEPROM emulation tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Program page size (256 bytes, same as RP2350)
const PAGE_SIZE: u32 = 256;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Flash capacity (64 KB is plenty for an emulated EEPROM region)
const FLASH_CAPACITY: u32 = 64 * 1024;

/// Protected firmware size (first 16 KB)
const FIRMWARE_SIZE: u32 = 0x4000;

/// Mock Flash implementation
///
/// Simulates NOR Flash in memory:
/// - Programs cover whole 256-byte pages and only clear bits (1→0)
/// - Erase restores whole blocks to 0xFF
/// - The firmware region is write/erase protected
/// - Erase and program counts are tracked for wear assertions
/// - A single program can be made to fail before touching the array
#[derive(Debug)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Number of successful program operations
    program_count: u32,
    /// Fail the next program with `WriteFailed`
    write_fault_armed: bool,
}

impl MockFlash {
    /// Create a new mock Flash instance
    pub fn new() -> Self {
        let block_count = (FLASH_CAPACITY / BLOCK_SIZE) as usize;

        Self {
            storage: vec![0xFF; FLASH_CAPACITY as usize],
            erase_counts: vec![0; block_count],
            program_count: 0,
            write_fault_armed: false,
        }
    }

    /// Start of the first writable block
    pub const fn first_writable_block() -> u32 {
        FIRMWARE_SIZE
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        let start = address as usize;
        self.storage[start..start + len].to_vec()
    }

    /// Get erase count for the block containing `address`
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Get number of program (write) operations
    pub fn get_program_count(&self) -> u32 {
        self.program_count
    }

    /// Make the next program operation fail without changing any byte
    ///
    /// Models a supply drop between an erase and the reprogram that follows it.
    pub fn fail_next_write(&mut self) {
        self.write_fault_armed = true;
    }

    fn is_writable(&self, address: u32) -> bool {
        (FIRMWARE_SIZE..FLASH_CAPACITY).contains(&address)
    }

    fn fits(&self, address: u32, len: usize) -> bool {
        address as usize + len <= FLASH_CAPACITY as usize
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if !self.fits(address, buf.len()) {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.is_writable(address)
            || !self.fits(address, data.len())
            || !address.is_multiple_of(PAGE_SIZE)
            || !(data.len() as u32).is_multiple_of(PAGE_SIZE)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        if self.write_fault_armed {
            self.write_fault_armed = false;
            return Err(FlashError::WriteFailed.into());
        }

        // Programming can only clear bits
        let start = address as usize;
        for (cell, byte) in self.storage[start..start + data.len()].iter_mut().zip(data) {
            *cell &= *byte;
        }
        self.program_count += 1;

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !self.is_writable(address)
            || !address.is_multiple_of(BLOCK_SIZE)
            || !size.is_multiple_of(BLOCK_SIZE)
            || !self.fits(address, size as usize)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / BLOCK_SIZE) as usize;
        let blocks = (size / BLOCK_SIZE) as usize;
        for count in &mut self.erase_counts[first_block..first_block + blocks] {
            *count += 1;
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
