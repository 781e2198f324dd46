//! Core domain model for optisched.
//!
//! This crate defines the course editing model (Course, Section,
//! SplitPart), duration arithmetic on decimal hours, the flat
//! scheduling-unit representation used for persistence and exchange,
//! and the reconciliation between the two shapes.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod duration;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod session;

pub use error::{Error, Result};
