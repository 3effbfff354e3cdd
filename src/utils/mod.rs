//! Shared helpers: input limits and filename sanitization.

pub mod validation;
