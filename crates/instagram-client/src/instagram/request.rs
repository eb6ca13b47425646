//! Outbound request construction
//!
//! Pure data transformation: no I/O happens here. Every parameter, including
//! the access token, travels in the query string regardless of verb.

use std::collections::BTreeMap;
use std::fmt;

use super::error::ApiError;
use crate::auth::{AccessToken, ACCESS_TOKEN_PARAM};

/// Caller-supplied query parameters, iterated in key order
pub type QueryParams = BTreeMap<String, String>;

/// HTTP verb of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
    Put,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
            Verb::Put => "PUT",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Delete => reqwest::Method::DELETE,
            Verb::Put => reqwest::Method::PUT,
        }
    }
}

/// A fully built, authenticated request
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub verb: Verb,
    /// Resource URL without the query string
    pub url: String,
    /// Query parameters in send order; the access token is always last
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Builds a request for `base_url + path`
    ///
    /// `params` is copied, never modified. A caller parameter named
    /// `access_token` is rejected so the held token is the only credential
    /// ever sent.
    pub fn build(
        verb: Verb,
        base_url: &str,
        path: &str,
        params: &QueryParams,
        token: &AccessToken,
    ) -> Result<Self, ApiError> {
        if params.contains_key(ACCESS_TOKEN_PARAM) {
            return Err(ApiError::invalid(format!(
                "`{ACCESS_TOKEN_PARAM}` is reserved and cannot be passed as a parameter"
            )));
        }

        let mut query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.push((ACCESS_TOKEN_PARAM.to_string(), token.as_str().to_string()));

        Ok(Self {
            verb,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
            query,
        })
    }

    /// Returns the value of a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the URL with its percent-encoded query string
    pub fn full_url(&self) -> String {
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url, query)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| {
                if k == ACCESS_TOKEN_PARAM {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        f.debug_struct("ApiRequest")
            .field("verb", &self.verb)
            .field("url", &self.url)
            .field("query", &query)
            .finish()
    }
}
