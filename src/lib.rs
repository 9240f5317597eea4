//! Helper kits for everyday service code: strings, arrays, files, time,
//! numbers, networking, hashing and tokens, map-to-struct decoding,
//! concurrency and process helpers.
//!
//! Each kit is an independent module. The only shared state is the
//! process-wide [`config`] (local time offset and HTTP defaults).

pub mod arrkit;
pub mod bizkit;
pub mod castkit;
pub mod config;
pub mod cronkit;
pub mod cryptokit;
pub mod filekit;
pub mod gokit;
pub mod jsonkit;
pub mod mapkit;
pub mod mathkit;
pub mod netkit;
pub mod sortkit;
pub mod strkit;
pub mod structkit;
pub mod syskit;
pub mod timekit;
pub mod urlkit;
pub mod utils;
pub mod validatekit;

pub use config::KitConfig;
pub use utils::error::{KitError, Result};
