//! # boxoffice-core
//!
//! Core crate for BoxOffice. Contains configuration schemas, the identifier
//! mint, event-log payload types, shared response types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other BoxOffice crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod token;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
