//! cdp-dispatch: typed Chrome DevTools Protocol event dispatch
//!
//! This library turns a raw, multiplexed stream of CDP notifications into
//! calls to strongly-typed handlers, and provides include/exclude URL
//! pattern filters to narrow down what a handler cares about.

pub mod error;
pub mod config;

pub mod cdp;
pub mod proto;
pub mod dispatch;
pub mod pattern;
pub mod tail;

// Re-exports
pub use error::{Error, Result};

/// cdp-dispatch library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
