#![cfg_attr(not(test), no_std)]

//! eeprom_store - Persistent storage helpers for byte-addressable EEPROM
//!
//! This library provides a small accessor over non-volatile byte storage:
//! a little-endian 16-bit integer codec and a two-byte "first boot" sentinel
//! guarding a score field.
//!
//! # Modules
//!
//! - [`platform`]: Storage device traits, Flash-backed EEPROM emulation, RP2350 and mock backends
//! - [`core`]: Logging macros shared by all modules
//! - [`storage`]: 16-bit codec, sentinel layout, and the [`storage::EepromStore`] accessor
//!
//! # Example
//!
//! ```
//! use eeprom_store::storage::{EepromStore, InitOutcome, SentinelLayout};
//!
//! // Any `[u8; N]` works as an in-memory EEPROM; fresh parts read 0xFF
//! let mut store = EepromStore::new([0xFFu8; 1024], SentinelLayout::new(200)).unwrap();
//! assert_eq!(store.ensure_initialized(), InitOutcome::Reset);
//! assert_eq!(store.score(), 0);
//!
//! store.set_score(1234);
//! assert_eq!(store.ensure_initialized(), InitOutcome::AlreadyInitialized);
//! assert_eq!(store.score(), 1234);
//! ```

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

// Ambient services (logging macros are exported at crate root)
pub mod core;

// Platform abstraction layer: storage device traits and backends
pub mod platform;

// Persistent store accessor
pub mod storage;
