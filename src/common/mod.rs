//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives:
//! - Configuration constants and settings
//! - Error types
//! - Frame identifiers

pub mod config;
pub mod error;
mod frame_id;

pub use error::{Error, Result};
pub use frame_id::FrameId;
