//! Lead intake for the Simetrica marketing site.
//!
//! The crate holds the client-side state of the two public forms (the multi-step
//! "trabaja con nosotros" application wizard and the contact form), the HTTP client
//! that submits them, and a local stub of the intake endpoints used during development.

pub mod api;
pub mod config;
pub mod error;
pub mod stub;
pub mod telemetry;
pub mod workflows;
