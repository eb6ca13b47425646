pub mod store;
mod token;

pub use store::{FileTokenStore, StoreError, TokenStorage};
pub use token::AccessToken;

/// Query parameter that carries the access token on every request
pub const ACCESS_TOKEN_PARAM: &str = "access_token";
