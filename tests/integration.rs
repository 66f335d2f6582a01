//! Host integration tests: store lifecycle across simulated power cycles

use eeprom_store::platform::traits::EepromInterface;
use eeprom_store::storage::{
    read_u16, write_int, write_u16, EepromStore, InitOutcome, SentinelLayout, SENTINEL_BASE,
};

const CAPACITY: usize = 1024;

/// Board EEPROM that survives "reboots" (store dropped and rebuilt)
struct BoardEeprom {
    cells: [u8; CAPACITY],
    physical_writes: usize,
}

impl BoardEeprom {
    fn erased() -> Self {
        Self {
            cells: [0xFF; CAPACITY],
            physical_writes: 0,
        }
    }
}

impl EepromInterface for BoardEeprom {
    fn read_byte(&mut self, address: u16) -> u8 {
        self.cells[address as usize]
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self.physical_writes += 1;
        self.cells[address as usize] = value;
    }

    fn capacity(&self) -> u32 {
        CAPACITY as u32
    }
}

/// Run one boot: initialize, play a round, and power off
fn boot(eeprom: BoardEeprom, round_score: u16) -> (BoardEeprom, InitOutcome, u16) {
    let mut store = EepromStore::new(eeprom, SentinelLayout::new(200)).unwrap();
    let outcome = store.ensure_initialized();
    store.submit_score(round_score);
    let best = store.score();
    (store.into_inner(), outcome, best)
}

#[test]
fn test_high_score_survives_power_cycles() {
    let eeprom = BoardEeprom::erased();

    let (eeprom, outcome, best) = boot(eeprom, 120);
    assert_eq!(outcome, InitOutcome::Reset);
    assert_eq!(best, 120);

    let (eeprom, outcome, best) = boot(eeprom, 80);
    assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    assert_eq!(best, 120);

    let (eeprom, outcome, best) = boot(eeprom, 300);
    assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    assert_eq!(best, 300);

    assert_eq!(&eeprom.cells[200..204], &[b'S', b'T', 0x2C, 0x01]);
}

#[test]
fn test_region_stamped_by_numeric_marker_is_recognized() {
    let mut eeprom = BoardEeprom::erased();
    eeprom.cells[200..204].copy_from_slice(&[83, 84, 0xE8, 0x03]);

    let (eeprom, outcome, best) = boot(eeprom, 0);

    assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    assert_eq!(best, 1000);
    assert_eq!(eeprom.physical_writes, 0);
}

#[test]
fn test_garbage_region_is_factory_reset() {
    let mut eeprom = BoardEeprom::erased();
    eeprom.cells[200..204].copy_from_slice(&[0x00, 0x54, 0xFF, 0xFF]);

    let (eeprom, outcome, best) = boot(eeprom, 0);

    assert_eq!(outcome, InitOutcome::Reset);
    assert_eq!(best, 0);
    assert_eq!(&eeprom.cells[200..204], &[b'S', b'T', 0, 0]);
}

#[test]
fn test_default_layout_uses_build_time_base() {
    let store = EepromStore::with_default_layout(BoardEeprom::erased()).unwrap();
    assert_eq!(store.layout().base(), SENTINEL_BASE);
}

#[test]
fn test_round_trip_across_address_space() {
    let mut eeprom = BoardEeprom::erased();

    for address in (0..CAPACITY as u16 - 1).step_by(37) {
        for value in [0u16, 1, 0x00FF, 0x0100, 0x1234, 0x8000, u16::MAX] {
            write_u16(&mut eeprom, address, value);
            assert_eq!(read_u16(&mut eeprom, address), value);
        }
    }
}

#[test]
fn test_truncation_outside_u16_range() {
    let mut eeprom = BoardEeprom::erased();

    for value in [65_536, 65_537, 131_071, 1 << 20, -1, -2, i32::MAX, i32::MIN] {
        write_int(&mut eeprom, 512, value);
        assert_eq!(
            read_u16(&mut eeprom, 512),
            value.rem_euclid(65_536) as u16,
            "value {}",
            value
        );
    }
}
