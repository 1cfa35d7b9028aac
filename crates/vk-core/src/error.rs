//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `VkError` as one
//! variant via `From`, so a configuration problem surfaces the same way no
//! matter which layer detected it.

use thiserror::Error;

/// The top-level error type for `vk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum VkError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `vk-*` crates.
pub type VkResult<T> = Result<T, VkError>;
