//! Persistent store accessor
//!
//! Layers a 16-bit integer codec and a first-boot sentinel check over any
//! [`EepromInterface`](crate::platform::EepromInterface) device.
//!
//! # Persisted Layout
//!
//! ```text
//! [base + 0]  Sentinel byte 1   'S' (83)
//! [base + 1]  Sentinel byte 2   'T' (84)
//! [base + 2]  Score low byte
//! [base + 3]  Score high byte
//! ```

pub mod codec;
pub mod error;
pub mod layout;
pub mod store;

pub use codec::{read_u16, write_int, write_u16};
pub use error::StoreError;
pub use layout::{
    SentinelLayout, DEFAULT_SENTINEL_BASE, LAYOUT_SIZE, SCORE_OFFSET, SENTINEL_BASE,
    SENTINEL_MARKER,
};
pub use store::{EepromStore, InitOutcome};
