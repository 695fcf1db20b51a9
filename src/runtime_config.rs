//! Environment variable-based configuration for the coroutine runtime.
//!
//! ## Environment Variables
//!
//! ### `TASKTRACK_STACK_SIZE`
//!
//! Sets the stack size for handler coroutines. Accepts values in:
//! - Decimal: `65536` (64 KB)
//! - Hexadecimal: `0x10000` (64 KB)
//!
//! Default: `0x10000` (64 KB)

use std::env;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`] to configure
/// the coroutine runtime behavior.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 64 KB / 0x10000)
    pub stack_size: usize,
}

const DEFAULT_STACK_SIZE: usize = 0x10000;

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let stack_size = match env::var("TASKTRACK_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_STACK_SIZE)
                } else {
                    val.parse().unwrap_or(DEFAULT_STACK_SIZE)
                }
            }
            Err(_) => DEFAULT_STACK_SIZE,
        };
        RuntimeConfig { stack_size }
    }
}
