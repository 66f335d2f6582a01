//! Platform abstraction layer
//!
//! This module provides the storage device abstraction and its backends.
//! Hardware-specific code stays in the feature-gated platform modules.

pub mod emulated;
pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use emulated::FlashEeprom;
pub use error::{FlashError, PlatformError, Result};
pub use traits::{EepromInterface, FlashInterface};
