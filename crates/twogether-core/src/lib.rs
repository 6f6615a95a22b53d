//! # Twogether Core
//!
//! The domain layer of the Twogether backend: couples, dates, notes and the
//! shared media wish-lists, plus the ports infrastructure must implement and
//! the services that tie them together.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
