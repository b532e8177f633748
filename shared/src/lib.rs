//! Shared types for the clinic settlement engine
//!
//! Common types used across the workspace: domain models, the error
//! taxonomy, Jalali calendar conversion, and input normalization.

pub mod calendar;
pub mod digits;
pub mod error;
pub mod models;

// Re-exports
pub use calendar::JalaliDate;
pub use error::{EngineError, EngineResult};
pub use serde::{Deserialize, Serialize};
