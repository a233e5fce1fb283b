//! Shared helpers for argument validation.

pub mod validation;
