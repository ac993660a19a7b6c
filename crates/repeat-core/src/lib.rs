//! # Repeat Core Library
//!
//! Recurrence engine for a task tracker: parses compact repeat rules and
//! computes when a recurring task is due next.
//!
//! ## Rule Grammar
//!
//! - `d<N>`: every N days (1..=400)
//! - `y`: every year
//! - `w<d1,d2,..>`: on ISO weekdays, 1 = Monday .. 7 = Sunday
//! - `m<d1,d2,..>[ m1,m2,..]`: on days of month (`-1` last, `-2` second-to-last),
//!   optionally limited to the listed months
//!
//! Dates cross the API boundary in the fixed `YYYYMMDD` layout.
//!
//! ## Core Modules
//!
//! - [`rule`]: rule grammar and validation
//! - [`recurrence`]: next-date calculation per rule family
//! - [`completion`]: due-date decisions on task completion and creation
//! - [`repository`]: storage seam and an in-memory implementation
//! - [`models`]: task data structures
//! - [`date`]: calendar helpers and the date layout
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use repeat_core::recurrence::compute_next;
//!
//! let next = compute_next("d3", "20240101", "20240105").unwrap();
//! assert_eq!(next.to_strings(), vec!["20240107"]);
//!
//! let next = compute_next("m15,-1", "20240101", "20240210").unwrap();
//! assert_eq!(next.to_strings(), vec!["20240215", "20240229"]);
//! ```

pub mod completion;
pub mod date;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod rule;

pub use completion::{advance_on_completion, initial_due_date, Advancement};
pub use error::CoreError;
pub use recurrence::{compute_next, NextOccurrence};
pub use rule::{parse_rule, RecurrenceRule};
