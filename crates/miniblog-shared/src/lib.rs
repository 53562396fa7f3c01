//! # MiniBlog Shared
//!
//! Wire types of the JSON API, shared between server and clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
