use anyhow::Context;
use serde::de::DeserializeOwned;

use super::decode::decode_object;
use super::endpoints::{self, Endpoint};
use super::error::ApiError;
use super::http::{HttpClient, HttpResponse, ReqwestClient};
use super::request::{ApiRequest, QueryParams};
use super::types::*;
use crate::auth::AccessToken;
use crate::config::{ClientConfig, API_URL};

const PARAM_QUERY: &str = "q";
const PARAM_LATITUDE: &str = "lat";
const PARAM_LONGITUDE: &str = "lng";
const PARAM_TEXT: &str = "text";
const PARAM_ACTION: &str = "action";

/// Instagram v1 API client
///
/// Generic over the HTTP client implementation for testability. Holds no
/// mutable state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct InstagramClient<H: HttpClient = ReqwestClient> {
    http: H,
    base_url: String,
    token: AccessToken,
}

impl InstagramClient<ReqwestClient> {
    /// Creates a client for the public API with the default HTTP implementation
    pub fn new(token: AccessToken) -> Self {
        Self::with_http_client(token, API_URL, ReqwestClient::new())
    }

    /// Creates a client using the base URL and timeout from `config`
    pub fn from_config(token: AccessToken, config: &ClientConfig) -> anyhow::Result<Self> {
        let http = match config.timeout() {
            Some(timeout) => {
                ReqwestClient::with_timeout(timeout).context("Failed to create HTTP client")?
            }
            None => ReqwestClient::new(),
        };

        Ok(Self::with_http_client(token, &config.api_url, http))
    }
}

impl<H: HttpClient> InstagramClient<H> {
    /// Creates a client with a custom HTTP implementation
    pub fn with_http_client(token: AccessToken, base_url: &str, http: H) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Returns the base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the request for an endpoint without sending it
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        params: &QueryParams,
    ) -> Result<ApiRequest, ApiError> {
        if !self.token.is_valid() {
            return Err(ApiError::invalid("access token is empty"));
        }

        let path = endpoint.resolve(args)?;
        ApiRequest::build(endpoint.verb, &self.base_url, &path, params, &self.token)
    }

    /// Sends an authenticated request and decodes the response body
    ///
    /// Non-2xx responses become `ApiError::Unauthorized` or `ApiError::Api`;
    /// nothing is retried.
    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let request = self.build_request(endpoint, args, params)?;

        tracing::debug!("{} {}", request.verb, request.url);

        let response = self.http.send(&request).await.inspect_err(|e| {
            tracing::warn!("{} {} failed: {}", request.verb, request.url, e);
        })?;

        if !response.is_success() {
            return Err(Self::error_from_response(&response));
        }

        Ok(decode_object(&response.body)?)
    }

    /// Maps a non-2xx response onto the error taxonomy
    fn error_from_response(response: &HttpResponse) -> ApiError {
        let meta = serde_json::from_str::<ErrorEnvelope>(&response.body)
            .map(|envelope| envelope.meta)
            .unwrap_or_default();

        tracing::warn!(
            "API error {}: {}",
            response.status,
            meta.error_message.as_deref().unwrap_or(&response.body)
        );

        if response.is_unauthorized() || meta.is_oauth_error() {
            return ApiError::Unauthorized(meta.error_message.unwrap_or_else(|| {
                format!("HTTP {}", response.status)
            }));
        }

        ApiError::Api {
            code: if meta.code == 0 { response.status } else { meta.code },
            error_type: meta.error_type.unwrap_or_default(),
            message: meta.error_message.unwrap_or_else(|| {
                if response.body.trim().is_empty() {
                    format!("HTTP {}", response.status)
                } else {
                    response.body.clone()
                }
            }),
        }
    }
}

/// Rejects blank string arguments before any request is built
fn require(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Builds `lat`/`lng` parameters, rejecting NaN and infinities
fn coordinates(latitude: f64, longitude: f64) -> Result<QueryParams, ApiError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(ApiError::invalid(format!(
            "coordinates must be finite, got ({latitude}, {longitude})"
        )));
    }

    Ok(QueryParams::from([
        (PARAM_LATITUDE.to_string(), latitude.to_string()),
        (PARAM_LONGITUDE.to_string(), longitude.to_string()),
    ]))
}

fn single_param(key: &str, value: &str) -> QueryParams {
    QueryParams::from([(key.to_string(), value.to_string())])
}

// User-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets basic information about a user
    pub async fn get_user_info(&self, user_id: u64) -> Result<UserInfo, ApiError> {
        let id = user_id.to_string();
        self.call(&endpoints::USER, &[&id], &QueryParams::new()).await
    }

    /// Gets the authenticated user's feed
    pub async fn get_user_feed(&self) -> Result<MediaFeed, ApiError> {
        self.call(&endpoints::USER_SELF_FEED, &[], &QueryParams::new())
            .await
    }

    /// Gets the most recent media published by a user
    pub async fn get_recent_media_feed(&self, user_id: u64) -> Result<MediaFeed, ApiError> {
        let id = user_id.to_string();
        self.call(&endpoints::USER_RECENT_MEDIA, &[&id], &QueryParams::new())
            .await
    }

    /// Gets the media the authenticated user has liked
    pub async fn get_user_liked_media_feed(&self) -> Result<MediaFeed, ApiError> {
        self.call(&endpoints::USER_SELF_LIKED_MEDIA, &[], &QueryParams::new())
            .await
    }

    /// Searches for users by name
    pub async fn search_user(&self, query: &str) -> Result<UserFeed, ApiError> {
        require(query, "search query")?;
        self.call(&endpoints::USER_SEARCH, &[], &single_param(PARAM_QUERY, query))
            .await
    }
}

// Relationship-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets the users a user follows
    pub async fn get_user_follow_list(&self, user_id: u64) -> Result<UserFeed, ApiError> {
        let id = user_id.to_string();
        self.call(&endpoints::USER_FOLLOWS, &[&id], &QueryParams::new())
            .await
    }

    /// Gets the users who follow a user
    pub async fn get_user_followed_by_list(&self, user_id: u64) -> Result<UserFeed, ApiError> {
        let id = user_id.to_string();
        self.call(&endpoints::USER_FOLLOWED_BY, &[&id], &QueryParams::new())
            .await
    }

    /// Gets the users who have requested to follow the authenticated user
    pub async fn get_user_requested_by(&self) -> Result<UserFeed, ApiError> {
        self.call(&endpoints::USER_SELF_REQUESTED_BY, &[], &QueryParams::new())
            .await
    }

    /// Gets the relationship between the authenticated user and another user
    pub async fn get_user_relationship(&self, user_id: u64) -> Result<RelationshipFeed, ApiError> {
        let id = user_id.to_string();
        self.call(&endpoints::USER_RELATIONSHIP, &[&id], &QueryParams::new())
            .await
    }

    /// Changes the relationship with another user
    pub async fn set_user_relationship(
        &self,
        user_id: u64,
        relationship: Relationship,
    ) -> Result<RelationshipFeed, ApiError> {
        let id = user_id.to_string();
        let params = single_param(PARAM_ACTION, relationship.as_str());
        self.call(&endpoints::USER_RELATIONSHIP_UPDATE, &[&id], &params)
            .await
    }
}

// Media-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets information about a media object
    pub async fn get_media_info(&self, media_id: u64) -> Result<MediaInfoFeed, ApiError> {
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA, &[&id], &QueryParams::new()).await
    }

    /// Searches for media around a point
    pub async fn search_media(&self, latitude: f64, longitude: f64) -> Result<MediaFeed, ApiError> {
        let params = coordinates(latitude, longitude)?;
        self.call(&endpoints::MEDIA_SEARCH, &[], &params).await
    }

    /// Gets currently popular media
    pub async fn get_popular_media(&self) -> Result<MediaFeed, ApiError> {
        self.call(&endpoints::MEDIA_POPULAR, &[], &QueryParams::new())
            .await
    }
}

// Comment-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets the comments on a media object
    pub async fn get_media_comments(&self, media_id: u64) -> Result<MediaCommentsFeed, ApiError> {
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA_COMMENTS, &[&id], &QueryParams::new())
            .await
    }

    /// Posts a comment on a media object
    pub async fn set_media_comment(
        &self,
        media_id: u64,
        text: &str,
    ) -> Result<MediaCommentsFeed, ApiError> {
        require(text, "comment text")?;
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA_COMMENT_ADD, &[&id], &single_param(PARAM_TEXT, text))
            .await
    }

    /// Deletes a comment from a media object
    pub async fn delete_media_comment(
        &self,
        media_id: u64,
        comment_id: u64,
    ) -> Result<MediaCommentsFeed, ApiError> {
        let media = media_id.to_string();
        let comment = comment_id.to_string();
        self.call(
            &endpoints::MEDIA_COMMENT_DELETE,
            &[&media, &comment],
            &QueryParams::new(),
        )
        .await
    }
}

// Like-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets the users who liked a media object
    pub async fn get_user_likes(&self, media_id: u64) -> Result<LikesFeed, ApiError> {
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA_LIKES, &[&id], &QueryParams::new())
            .await
    }

    /// Likes a media object as the authenticated user
    pub async fn set_user_like(&self, media_id: u64) -> Result<LikesFeed, ApiError> {
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA_LIKE_ADD, &[&id], &QueryParams::new())
            .await
    }

    /// Removes the authenticated user's like from a media object
    pub async fn delete_user_like(&self, media_id: u64) -> Result<LikesFeed, ApiError> {
        let id = media_id.to_string();
        self.call(&endpoints::MEDIA_LIKE_DELETE, &[&id], &QueryParams::new())
            .await
    }
}

// Tag-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets information about a tag
    pub async fn get_tag_info(&self, tag_name: &str) -> Result<TagInfoFeed, ApiError> {
        require(tag_name, "tag name")?;
        self.call(&endpoints::TAG, &[tag_name], &QueryParams::new())
            .await
    }

    /// Gets recent media carrying a tag
    pub async fn get_recent_media_tags(&self, tag_name: &str) -> Result<TagMediaFeed, ApiError> {
        require(tag_name, "tag name")?;
        self.call(&endpoints::TAG_RECENT_MEDIA, &[tag_name], &QueryParams::new())
            .await
    }

    /// Searches for tags by name
    pub async fn search_tags(&self, query: &str) -> Result<TagSearchFeed, ApiError> {
        require(query, "search query")?;
        self.call(&endpoints::TAG_SEARCH, &[], &single_param(PARAM_QUERY, query))
            .await
    }
}

// Location-related methods
impl<H: HttpClient> InstagramClient<H> {
    /// Gets information about a location
    pub async fn get_location_info(&self, location_id: u64) -> Result<LocationInfo, ApiError> {
        let id = location_id.to_string();
        self.call(&endpoints::LOCATION, &[&id], &QueryParams::new())
            .await
    }

    /// Gets recent media tagged at a location
    pub async fn get_recent_media_by_location(
        &self,
        location_id: u64,
    ) -> Result<MediaFeed, ApiError> {
        let id = location_id.to_string();
        self.call(&endpoints::LOCATION_RECENT_MEDIA, &[&id], &QueryParams::new())
            .await
    }

    /// Searches for locations around a point
    pub async fn search_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationSearchFeed, ApiError> {
        let params = coordinates(latitude, longitude)?;
        self.call(&endpoints::LOCATION_SEARCH, &[], &params).await
    }
}
