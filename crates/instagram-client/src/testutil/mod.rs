//! Test utilities for the Instagram client
//!
//! This module provides fixtures and mocks for testing.

pub mod fixtures;
pub mod mocks;

pub use mocks::*;
