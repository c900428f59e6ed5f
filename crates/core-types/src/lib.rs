//! # Core Types
//!
//! Layer 0 of the dashboard workspace. Plain data structures shared by the
//! loader, the analytics pipeline and the presentation surfaces. This crate
//! has no knowledge of files, CSV or HTTP.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CalendarDate, Side};
pub use error::CoreError;
pub use structs::{JoinedRecord, SentimentRecord, TradeRecord};
