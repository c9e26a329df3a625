//! # Scenario Generation Tools
//!
//! Command-line tools for content authors and integrators:
//! - Scenario generation to JSON
//! - Content validators

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod validate;
