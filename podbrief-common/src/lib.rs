//! # PodBrief Common Library
//!
//! Shared code for the PodBrief service:
//! - Error and result types
//! - Bootstrap configuration (TOML + environment)
//! - Database initialization and schema
//! - Domain types shared by the API and its tests

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::InterviewStyle;
