//! # Dashboard Analytics
//!
//! This crate turns the two loaded tables into everything the dashboard shows:
//! the joined table and the metrics derived from it.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** `join` and `engine` are pure functions of their inputs.
//!   Only `dashboard` touches the file system, through the `dataset` loader.
//! - **Explicit Initialization:** `Dashboard::build` is run once at startup and
//!   returns an immutable value. Nothing here is a process-wide singleton.
//! - **Total on Empty Input:** every metric is defined for a zero-row table.
//!
//! ## Public API
//!
//! - `inner_join`: matches trades to the sentiment of their calendar day.
//! - `MetricsEngine`: stateless calculator producing a `DashboardReport`.
//! - `Dashboard`: the joined table, its report and the load diagnostics.

pub mod dashboard;
pub mod distribution;
pub mod engine;
pub mod format;
pub mod join;
pub mod report;

pub use dashboard::Dashboard;
pub use distribution::Distribution;
pub use engine::MetricsEngine;
pub use format::{HeadlineCards, PnlTone};
pub use join::inner_join;
pub use report::{CumulativePoint, DashboardReport, SentimentPnl, SentimentWinRate};
