//! # MiniBlog Core
//!
//! The domain layer of MiniBlog: posts, comments, image uploads.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{ContentStore, UploadHandler, UploadPolicy};
