//! Mock implementations for testing
//!
//! This module re-exports mock implementations from their respective modules
//! for convenient access in tests.

pub use crate::instagram::http::mock::MockHttpClient;
