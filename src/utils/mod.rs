//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `priorelay` application.
//!
//! This module centralizes the crate's error types and the logging setup so
//! the other modules can stay focused on queue mechanics.

pub mod error;
pub mod logging;
