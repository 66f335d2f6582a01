//! EEPROM emulation over Flash
//!
//! RP2350 and similar parts have no true EEPROM. [`FlashEeprom`] reserves one
//! or more Flash blocks and presents them as byte-addressable storage through
//! [`EepromInterface`].
//!
//! # Write Strategy
//!
//! NOR Flash can only clear bits without an erase, and programs whole pages.
//! A byte write that only clears bits programs the page holding it, with
//! 0xFF (no change) in every other position. Any write that needs a 0→1
//! transition reads the whole region into RAM, patches the byte, erases, and
//! reprograms the region.
//!
//! # Power Loss
//!
//! A completed call is durable. An erase-and-reprogram cycle is not atomic:
//! losing power (or a program fault) after the erase leaves the entire
//! region at 0xFF, including the sentinel and every unrelated cell. A real
//! EEPROM would only lose the byte being written. The next
//! `ensure_initialized` sees the missing sentinel and resets the region.
//!
//! Flash faults are logged and absorbed so the EEPROM contract stays
//! infallible. A failed read yields 0xFF (the erased value).

use crate::platform::{
    error::FlashError,
    traits::{EepromInterface, FlashInterface},
    PlatformError, Result,
};
use crate::{log_debug, log_error, log_warn};

/// Default emulated EEPROM size (one 4 KB Flash block)
pub const DEFAULT_REGION_SIZE: usize = 4096;

/// Value returned for unreadable or out-of-region cells
const ERASED: u8 = 0xFF;

/// Flash-backed EEPROM emulation
///
/// `N` is the emulated capacity in bytes and must be a whole number of Flash
/// blocks. The struct carries an `N`-byte scratch buffer for read-modify-erase
/// cycles and page programs, so keep it in a `static` or a long-lived task on
/// small targets.
///
/// # Example
///
/// ```ignore
/// use eeprom_store::platform::rp2350::Rp2350Flash;
/// use eeprom_store::platform::FlashEeprom;
/// use eeprom_store::storage::EepromStore;
///
/// let eeprom: FlashEeprom<_> = FlashEeprom::new(Rp2350Flash::new(), 0x040000)?;
/// let mut store = EepromStore::with_default_layout(eeprom)?;
/// store.ensure_initialized();
/// ```
pub struct FlashEeprom<F: FlashInterface, const N: usize = DEFAULT_REGION_SIZE> {
    /// Flash device
    flash: F,
    /// Flash offset of emulated address 0
    region: u32,
    /// Region image used when a write needs an erase
    scratch: [u8; N],
}

impl<F: FlashInterface, const N: usize> FlashEeprom<F, N> {
    /// Create an emulated EEPROM over `N` bytes of Flash starting at `region`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InvalidAddress)` if `region` is not
    /// block-aligned, `N` is not a non-zero multiple of the block size, the page
    /// size does not divide the block size, or the region runs past the end of Flash.
    /// Returns `PlatformError::InvalidConfig` if `N` exceeds the 16-bit address space.
    pub fn new(flash: F, region: u32) -> Result<Self> {
        if N > u16::MAX as usize + 1 {
            return Err(PlatformError::InvalidConfig);
        }

        let page = flash.page_size();
        let block = flash.block_size();
        let size = N as u32;
        if page == 0
            || block == 0
            || size == 0
            || !block.is_multiple_of(page)
            || !region.is_multiple_of(block)
            || !size.is_multiple_of(block)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        match region.checked_add(size) {
            Some(end) if end <= flash.capacity() => {}
            _ => return Err(FlashError::InvalidAddress.into()),
        }

        log_debug!("EEPROM emulation: {} bytes at flash offset {}", size, region);

        Ok(Self {
            flash,
            region,
            scratch: [ERASED; N],
        })
    }

    /// Flash offset of emulated address 0
    pub fn region(&self) -> u32 {
        self.region
    }

    /// Borrow the Flash device
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Mutably borrow the Flash device
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Release the Flash device
    pub fn into_inner(self) -> F {
        self.flash
    }

    fn in_region(address: u16) -> bool {
        (address as usize) < N
    }

    /// Program the page holding `address`, leaving its other bytes untouched
    fn program_in_place(&mut self, address: u16, value: u8) -> Result<()> {
        let page = self.flash.page_size() as usize;
        let offset = address as usize;
        let page_start = offset - offset % page;

        let buf = &mut self.scratch[..page];
        buf.fill(ERASED);
        buf[offset - page_start] = value;
        self.flash.write(self.region + page_start as u32, buf)
    }

    /// Read-modify-erase-write the whole region
    ///
    /// The region stays erased if the reprogram fails.
    fn rewrite(&mut self, address: u16, value: u8) -> Result<()> {
        self.flash.read(self.region, &mut self.scratch)?;
        self.scratch[address as usize] = value;
        self.flash.erase(self.region, N as u32)?;
        self.flash.write(self.region, &self.scratch)
    }
}

impl<F: FlashInterface, const N: usize> EepromInterface for FlashEeprom<F, N> {
    fn read_byte(&mut self, address: u16) -> u8 {
        if !Self::in_region(address) {
            log_warn!("EEPROM read outside emulated region: {}", address);
            return ERASED;
        }

        let mut buf = [ERASED; 1];
        match self.flash.read(self.region + address as u32, &mut buf) {
            Ok(()) => buf[0],
            Err(e) => {
                log_error!("EEPROM read at {} failed: {}", address, e);
                ERASED
            }
        }
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        if !Self::in_region(address) {
            log_warn!("EEPROM write outside emulated region: {}", address);
            return;
        }

        let current = self.read_byte(address);
        let result = if current & value == value {
            self.program_in_place(address, value)
        } else {
            self.rewrite(address, value)
        };

        if let Err(e) = result {
            log_error!("EEPROM write at {} failed: {}", address, e);
        }
    }

    fn capacity(&self) -> u32 {
        N as u32
    }
}
