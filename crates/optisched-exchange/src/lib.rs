//! Tabular exchange and import pipeline for optisched.
//!
//! Implements CSV reading/writing of flat scheduling units, per-row
//! validation against the catalog, batch grouping into course creation
//! requests, and the paced submission loop with its partial-failure
//! summary.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod row;
pub mod tabular;

pub use batch::{build_requests, group_by_code, BatchError, LogicalCourse};
pub use catalog::Catalog;
pub use config::Config;
pub use error::{ExchangeError, ExchangeResult};
pub use import::{CourseSink, ImportOutcome, ImportProgress, ImportRunner, ImportSummary};
pub use row::{parse_row, FieldError, RawRow};
