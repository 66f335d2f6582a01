//! Persistent store accessor
//!
//! [`EepromStore`] owns an injected EEPROM device and the sentinel layout.
//! It holds no cached state: every call reads or writes the device directly.

use super::codec;
use super::error::StoreError;
use super::layout::SentinelLayout;
use crate::platform::traits::EepromInterface;
use crate::{log_debug, log_info};

/// Result of [`EepromStore::ensure_initialized`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitOutcome {
    /// Marker already present; nothing was written
    AlreadyInitialized,
    /// Marker was missing or damaged; marker and score were rewritten
    Reset,
}

/// Accessor for the sentinel-guarded score region
///
/// # Example
///
/// ```
/// use eeprom_store::storage::{EepromStore, InitOutcome, SentinelLayout};
///
/// let mut store = EepromStore::new([0u8; 256], SentinelLayout::new(16)).unwrap();
/// assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
///
/// assert!(store.submit_score(42));
/// assert!(!store.submit_score(41));
/// assert_eq!(store.score(), 42);
/// ```
#[derive(Debug)]
pub struct EepromStore<E: EepromInterface> {
    /// Storage device
    eeprom: E,
    /// Sentinel and score placement
    layout: SentinelLayout,
}

impl<E: EepromInterface> EepromStore<E> {
    /// Create an accessor over `eeprom` with the given layout
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LayoutOutOfRange` if the sentinel region extends
    /// past the device capacity.
    pub fn new(eeprom: E, layout: SentinelLayout) -> Result<Self, StoreError> {
        let capacity = eeprom.capacity();
        if layout.end() > capacity {
            return Err(StoreError::LayoutOutOfRange {
                end: layout.end(),
                capacity,
            });
        }

        Ok(Self { eeprom, layout })
    }

    /// Create an accessor using [`SentinelLayout::default`]
    pub fn with_default_layout(eeprom: E) -> Result<Self, StoreError> {
        Self::new(eeprom, SentinelLayout::default())
    }

    /// Sentinel and score placement
    pub fn layout(&self) -> SentinelLayout {
        self.layout
    }

    /// Borrow the storage device
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Mutably borrow the storage device
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Release the storage device
    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// Write a 16-bit value at `address`, low byte first
    pub fn write_u16(&mut self, address: u16, value: u16) {
        codec::write_u16(&mut self.eeprom, address, value);
    }

    /// Write the low 16 bits of `value` at `address`
    pub fn write_int(&mut self, address: u16, value: i32) {
        codec::write_int(&mut self.eeprom, address, value);
    }

    /// Read a 16-bit value stored low byte first at `address`
    pub fn read_u16(&mut self, address: u16) -> u16 {
        codec::read_u16(&mut self.eeprom, address)
    }

    /// Whether both sentinel bytes hold the expected marker
    pub fn is_initialized(&mut self) -> bool {
        let found = [
            self.eeprom.read_byte(self.layout.base()),
            self.eeprom.read_byte(self.layout.second_marker_address()),
        ];
        found == self.layout.marker()
    }

    /// Stamp the marker and zero the score unless the marker is present
    ///
    /// A matching marker leaves the device untouched, so repeated calls are
    /// idempotent. Any mismatch rewrites the whole region: both marker bytes
    /// (skipping cells that already match) and then the score.
    ///
    /// The reset is not crash-atomic. Losing power after the marker lands
    /// but before the score write completes leaves a valid marker over a
    /// stale score, and later calls will not repair it.
    ///
    /// On a [`FlashEeprom`](crate::platform::FlashEeprom) device the loss can
    /// be wider: any write that needs a Flash erase (including the score
    /// writes) can leave the whole emulated region erased if interrupted,
    /// which the next call detects and resets.
    pub fn ensure_initialized(&mut self) -> InitOutcome {
        if self.is_initialized() {
            log_debug!("EEPROM sentinel present at {}", self.layout.base());
            return InitOutcome::AlreadyInitialized;
        }

        let [first, second] = self.layout.marker();
        self.eeprom.update_byte(self.layout.base(), first);
        self.eeprom.update_byte(self.layout.second_marker_address(), second);
        codec::write_u16(&mut self.eeprom, self.layout.score_address(), 0);

        log_info!(
            "EEPROM sentinel missing at {}, region reset",
            self.layout.base()
        );
        InitOutcome::Reset
    }

    /// Stored score
    pub fn score(&mut self) -> u16 {
        codec::read_u16(&mut self.eeprom, self.layout.score_address())
    }

    /// Overwrite the stored score
    pub fn set_score(&mut self, score: u16) {
        codec::write_u16(&mut self.eeprom, self.layout.score_address(), score);
    }

    /// Store `candidate` if it beats the stored score
    ///
    /// Returns `true` when the score was replaced. Equal scores are not
    /// rewritten.
    pub fn submit_score(&mut self, candidate: u16) -> bool {
        let best = self.score();
        if candidate <= best {
            return false;
        }

        log_info!("New high score {} (was {})", candidate, best);
        self.set_score(candidate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockEeprom, MockFlash};
    use crate::platform::FlashEeprom;

    const BASE: u16 = 200;

    fn store() -> EepromStore<MockEeprom> {
        EepromStore::new(MockEeprom::new(), SentinelLayout::new(BASE)).unwrap()
    }

    #[test]
    fn test_new_rejects_layout_past_capacity() {
        let result = EepromStore::new(MockEeprom::with_capacity(203), SentinelLayout::new(BASE));
        assert_eq!(
            result.err(),
            Some(StoreError::LayoutOutOfRange {
                end: 204,
                capacity: 203
            })
        );
    }

    #[test]
    fn test_new_accepts_layout_at_end_of_device() {
        let result = EepromStore::new(MockEeprom::with_capacity(204), SentinelLayout::new(BASE));
        assert!(result.is_ok());
    }

    #[test]
    fn test_reset_on_erased_device() {
        let mut store = store();

        assert!(!store.is_initialized());
        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);

        assert!(store.is_initialized());
        assert_eq!(store.eeprom().get_contents(BASE, 4), [83, 84, 0, 0]);
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn test_reset_on_partial_marker() {
        let mut store = store();
        store.eeprom_mut().set_contents(BASE, &[b'S', b'X', 0x39, 0x05]);

        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);

        assert_eq!(store.eeprom().get_contents(BASE, 4), [b'S', b'T', 0, 0]);
        // First marker byte already matched, so only the second was written
        assert_eq!(store.eeprom().get_write_count(BASE), 0);
        assert_eq!(store.eeprom().get_write_count(BASE + 1), 1);
    }

    #[test]
    fn test_reset_on_swapped_marker() {
        let mut store = store();
        store.eeprom_mut().set_contents(BASE, b"TS");

        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        assert_eq!(store.eeprom().get_contents(BASE, 2), *b"ST");
    }

    #[test]
    fn test_reset_after_corruption() {
        let mut store = store();
        store.ensure_initialized();
        store.set_score(900);

        store.eeprom_mut().inject_corruption(BASE, 1);

        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn test_no_op_on_match_keeps_score() {
        let mut store = store();
        store.eeprom_mut().set_contents(BASE, &[b'S', b'T', 0x39, 0x30]);

        assert_eq!(store.ensure_initialized(), InitOutcome::AlreadyInitialized);

        assert_eq!(store.score(), 0x3039);
        assert_eq!(store.eeprom().get_total_write_count(), 0);
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let mut store = store();

        store.ensure_initialized();
        let after_first = store.eeprom().get_contents(0, 1024);
        let writes = store.eeprom().get_total_write_count();

        assert_eq!(store.ensure_initialized(), InitOutcome::AlreadyInitialized);
        assert_eq!(store.eeprom().get_contents(0, 1024), after_first);
        assert_eq!(store.eeprom().get_total_write_count(), writes);
    }

    #[test]
    fn test_reset_leaves_other_cells_alone() {
        let mut store = store();
        store.write_u16(10, 0xBEEF);
        store.write_u16(BASE + 4, 0xCAFE);

        store.ensure_initialized();

        assert_eq!(store.read_u16(10), 0xBEEF);
        assert_eq!(store.read_u16(BASE + 4), 0xCAFE);
    }

    #[test]
    fn test_power_loss_between_marker_and_score_leaves_stale_score() {
        let mut store = store();
        store.eeprom_mut().set_contents(BASE + 2, &[0x34, 0x12]);

        // Both marker writes land, the score write is lost
        store.eeprom_mut().simulate_power_loss(2);
        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        store.eeprom_mut().restore_power();

        assert_eq!(store.ensure_initialized(), InitOutcome::AlreadyInitialized);
        assert_eq!(store.score(), 0x1234);
    }

    #[test]
    fn test_power_loss_between_marker_bytes_self_heals() {
        let mut store = store();
        store.eeprom_mut().set_contents(BASE + 2, &[0x34, 0x12]);

        store.eeprom_mut().simulate_power_loss(1);
        store.ensure_initialized();
        store.eeprom_mut().restore_power();

        assert!(!store.is_initialized());
        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn test_score_round_trip() {
        let mut store = store();
        store.ensure_initialized();

        store.set_score(0x1234);

        assert_eq!(store.score(), 0x1234);
        assert_eq!(store.read_u16(store.layout().score_address()), 0x1234);
        assert_eq!(store.eeprom().get_contents(BASE + 2, 2), [0x34, 0x12]);
    }

    #[test]
    fn test_submit_score_only_keeps_higher() {
        let mut store = store();
        store.ensure_initialized();

        assert!(store.submit_score(10));
        assert!(!store.submit_score(10));
        assert!(!store.submit_score(3));
        assert!(store.submit_score(11));
        assert_eq!(store.score(), 11);
    }

    #[test]
    fn test_write_int_truncates() {
        let mut store = store();

        store.write_int(0, 70_000);
        assert_eq!(store.read_u16(0), (70_000 % 65_536) as u16);
    }

    #[test]
    fn test_custom_marker_and_base() {
        let layout = SentinelLayout::new(0).with_marker(*b"HI");
        let mut store = EepromStore::new(MockEeprom::new(), layout).unwrap();
        store.eeprom_mut().set_contents(0, b"ST");

        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        assert_eq!(store.eeprom().get_contents(0, 4), [b'H', b'I', 0, 0]);
    }

    #[test]
    fn test_borrowed_device() {
        let mut eeprom = MockEeprom::new();
        {
            let mut store = EepromStore::new(&mut eeprom, SentinelLayout::new(BASE)).unwrap();
            store.ensure_initialized();
            store.set_score(77);
        }

        assert_eq!(eeprom.get_contents(BASE, 4), [b'S', b'T', 77, 0]);
    }

    #[test]
    fn test_over_flash_emulation() {
        let flash = MockFlash::new();
        let eeprom: FlashEeprom<MockFlash> =
            FlashEeprom::new(flash, MockFlash::first_writable_block()).unwrap();
        let mut store = EepromStore::new(eeprom, SentinelLayout::new(BASE)).unwrap();

        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        store.set_score(500);
        assert_eq!(store.ensure_initialized(), InitOutcome::AlreadyInitialized);

        let eeprom = store.into_inner();
        let region = eeprom.region();
        let flash = eeprom.into_inner();
        assert_eq!(
            flash.get_contents(region + BASE as u32, 4),
            [b'S', b'T', 0xF4, 0x01]
        );
    }

    #[test]
    fn test_flash_fault_mid_erase_cycle_forces_reset() {
        let eeprom: FlashEeprom<MockFlash> =
            FlashEeprom::new(MockFlash::new(), MockFlash::first_writable_block()).unwrap();
        let mut store = EepromStore::new(eeprom, SentinelLayout::new(BASE)).unwrap();
        store.ensure_initialized();
        store.set_score(500);

        // Raising the low byte 0xF4 -> 0xF5 needs an erase; the reprogram is lost
        store.eeprom_mut().flash_mut().fail_next_write();
        store.set_score(501);

        assert!(!store.is_initialized());
        assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
        assert_eq!(store.score(), 0);
    }
}
