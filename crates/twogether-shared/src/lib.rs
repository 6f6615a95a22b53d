//! # Twogether Shared
//!
//! Wire types of the HTTP API: request payloads with their validation rules,
//! response bodies and the success / problem-details envelopes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
