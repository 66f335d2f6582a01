//! Mock EEPROM implementation for testing
//!
//! Provides an in-memory EEPROM with wear tracking and power-loss simulation.

use crate::platform::traits::EepromInterface;
use alloc::vec;
use alloc::vec::Vec;

/// Default EEPROM size (1 KB, ATmega32u4)
const DEFAULT_CAPACITY: usize = 1024;

/// Value held by a never-written EEPROM cell
const ERASED: u8 = 0xFF;

/// Pattern written by [`MockEeprom::inject_corruption`]
const CORRUPT_PATTERN: u8 = 0xAA;

/// Mock EEPROM implementation
///
/// Simulates EEPROM storage in memory for testing. Supports:
/// - Physical write counting per cell (wear observation)
/// - Preloading and corruption injection
/// - Power-loss simulation (writes after a cut-off are silently lost)
#[derive(Debug, Clone)]
pub struct MockEeprom {
    /// Cell contents (initialized to 0xFF - erased state)
    storage: Vec<u8>,
    /// Physical write count per cell
    write_counts: Vec<u32>,
    /// Remaining writes before power is lost (`None` = powered)
    writes_until_power_loss: Option<u32>,
}

impl MockEeprom {
    /// Create a 1 KB mock EEPROM in the erased state
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a mock EEPROM with `capacity` cells in the erased state
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![ERASED; capacity],
            write_counts: vec![0; capacity],
            writes_until_power_loss: None,
        }
    }

    /// Get EEPROM contents (for test verification)
    pub fn get_contents(&self, address: u16, len: usize) -> Vec<u8> {
        let start = address as usize;
        self.storage[start..start + len].to_vec()
    }

    /// Preload cells without counting wear
    pub fn set_contents(&mut self, address: u16, data: &[u8]) {
        let start = address as usize;
        self.storage[start..start + data.len()].copy_from_slice(data);
    }

    /// Inject corruption at address (for testing first-boot detection)
    pub fn inject_corruption(&mut self, address: u16, len: usize) {
        let start = address as usize;
        self.storage[start..start + len].fill(CORRUPT_PATTERN);
    }

    /// Number of physical writes that reached the cell at `address`
    pub fn get_write_count(&self, address: u16) -> u32 {
        self.write_counts[address as usize]
    }

    /// Total physical writes across all cells
    pub fn get_total_write_count(&self) -> u32 {
        self.write_counts.iter().sum()
    }

    /// Simulate power loss after `writes` more physical writes
    ///
    /// Writes beyond the cut-off are dropped without any indication, as on
    /// real hardware losing supply mid-sequence.
    pub fn simulate_power_loss(&mut self, writes: u32) {
        self.writes_until_power_loss = Some(writes);
    }

    /// Restore power (subsequent writes land again)
    pub fn restore_power(&mut self) {
        self.writes_until_power_loss = None;
    }

    /// Whether writes are currently being dropped
    pub fn is_powered_down(&self) -> bool {
        self.writes_until_power_loss == Some(0)
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromInterface for MockEeprom {
    fn read_byte(&mut self, address: u16) -> u8 {
        self.storage[address as usize]
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        if let Some(remaining) = self.writes_until_power_loss.as_mut() {
            if *remaining == 0 {
                return;
            }
            *remaining -= 1;
        }

        let cell = address as usize;
        self.storage[cell] = value;
        self.write_counts[cell] += 1;
    }

    fn capacity(&self) -> u32 {
        self.storage.len() as u32
    }
}
