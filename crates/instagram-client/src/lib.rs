//! Typed client for the Instagram v1 REST API
//!
//! Every operation builds an authenticated request, sends it through an
//! [`instagram::HttpClient`] and decodes the JSON body into a typed result.

pub mod auth;
pub mod config;
pub mod instagram;

#[cfg(test)]
mod testutil;

pub use auth::AccessToken;
pub use instagram::{ApiError, InstagramClient};
