mod client;
mod decode;
pub mod endpoints;
mod error;
pub mod http;
mod request;
mod types;

pub use client::InstagramClient;
pub use decode::{decode, decode_object};
pub use endpoints::Endpoint;
pub use error::{ApiError, DecodeError, TransportError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use request::{ApiRequest, QueryParams, Verb};
pub use types::*;
