//! Runtime error types
//!
//! Everything else an interface can get wrong (missing entries, bad
//! signatures, inline overflow, unknown names) is rejected at build time.

use core::alloc::Layout;
use thiserror::Error;

/// The allocator behind an `Owned` storage could not provide a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("allocation of {size} bytes (align {align}) failed")]
pub struct AllocError {
    pub size: usize,
    pub align: usize,
}

impl AllocError {
    #[inline]
    pub fn for_layout(layout: Layout) -> Self {
        Self { size: layout.size(), align: layout.align() }
    }
}

/// Loading a logging configuration failed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_error_reports_layout() {
        let err = AllocError::for_layout(Layout::new::<u64>());
        assert_eq!(err.size, 8);
        assert_eq!(err.to_string(), format!("allocation of 8 bytes (align {}) failed", err.align));
    }
}
