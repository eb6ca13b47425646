//! Response types for the Instagram v1 API
//!
//! Every type defaults missing fields and ignores unknown ones, matching the
//! permissive way the API is consumed. An explicit `null` in any field
//! decodes to that field's default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ApiError;

/// Treats an explicit `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts ids sent either as JSON strings or as numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
        Id::Null(()) => String::new(),
    })
}

/// Parses the API's `created_time` (unix seconds as a string)
fn parse_created_time(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// Envelope metadata present on every response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "nullable")]
    pub code: u16,
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl Meta {
    /// Returns true if the error is a token problem (`OAuth*` error types)
    pub fn is_oauth_error(&self) -> bool {
        self.error_type
            .as_deref()
            .is_some_and(|t| t.starts_with("OAuth"))
    }
}

/// Compact user reference embedded in media, likes and comments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub profile_picture: String,
}

/// Profile counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counts {
    #[serde(deserialize_with = "nullable")]
    pub media: u64,
    #[serde(deserialize_with = "nullable")]
    pub follows: u64,
    #[serde(deserialize_with = "nullable")]
    pub followed_by: u64,
}

/// Full user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfoData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub profile_picture: String,
    #[serde(deserialize_with = "nullable")]
    pub bio: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
    #[serde(deserialize_with = "nullable")]
    pub counts: Counts,
}

/// Response of `GET /users/{user_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: UserInfoData,
}

/// Entry of a user listing (search, follows, followed-by, requested-by)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFeedData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub profile_picture: String,
    #[serde(deserialize_with = "nullable")]
    pub bio: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
}

/// Response of the user listing endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<UserFeedData>,
}

/// Single rendition of an image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageData {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub width: u32,
    #[serde(deserialize_with = "nullable")]
    pub height: u32,
}

/// All renditions of a media image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    #[serde(deserialize_with = "nullable")]
    pub low_resolution: ImageData,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail: ImageData,
    #[serde(deserialize_with = "nullable")]
    pub standard_resolution: ImageData,
}

/// A comment; also used for media captions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub created_time: String,
    #[serde(deserialize_with = "nullable")]
    pub from: User,
}

impl CommentData {
    /// Returns the creation time, if `created_time` is a valid timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_created_time(&self.created_time)
    }
}

/// Comment summary embedded in media
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comments {
    #[serde(deserialize_with = "nullable")]
    pub count: u64,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<CommentData>,
}

/// Like summary embedded in media
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Likes {
    #[serde(deserialize_with = "nullable")]
    pub count: u64,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<User>,
}

/// A named place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub latitude: f64,
    #[serde(deserialize_with = "nullable")]
    pub longitude: f64,
}

/// A photo or video post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFeedData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub created_time: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub filter: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    pub caption: Option<CommentData>,
    #[serde(deserialize_with = "nullable")]
    pub images: Images,
    #[serde(deserialize_with = "nullable")]
    pub user: User,
    #[serde(deserialize_with = "nullable")]
    pub user_has_liked: bool,
    #[serde(deserialize_with = "nullable")]
    pub likes: Likes,
    #[serde(deserialize_with = "nullable")]
    pub comments: Comments,
    pub location: Option<Location>,
}

impl MediaFeedData {
    /// Returns the creation time, if `created_time` is a valid timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_created_time(&self.created_time)
    }
}

/// Response of the media listing endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<MediaFeedData>,
}

/// Response of `GET /media/{media_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaInfoFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: MediaFeedData,
}

/// Response of the comment endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaCommentsFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<CommentData>,
}

/// Response of the like endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<User>,
}

/// Relationship between the token owner and another user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipData {
    #[serde(deserialize_with = "nullable")]
    pub outgoing_status: String,
    #[serde(deserialize_with = "nullable")]
    pub incoming_status: String,
    #[serde(deserialize_with = "nullable")]
    pub target_user_is_private: bool,
}

/// Response of the relationship endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: RelationshipData,
}

/// Tag name and usage count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInfoData {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub media_count: u64,
}

/// Response of `GET /tags/{tag_name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInfoFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: TagInfoData,
}

/// Response of `GET /tags/{tag_name}/media/recent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagMediaFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<MediaFeedData>,
}

/// Response of `GET /tags/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSearchFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<TagInfoData>,
}

/// Response of `GET /locations/{location_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInfo {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Location,
}

/// Response of `GET /locations/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSearchFeed {
    pub meta: Meta,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<Location>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorEnvelope {
    pub meta: Meta,
}

/// Action sent to `POST /users/{user_id}/relationship`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Follow,
    Unfollow,
    Block,
    Unblock,
    Approve,
    Deny,
}

impl Relationship {
    pub const ALL: [Relationship; 6] = [
        Relationship::Follow,
        Relationship::Unfollow,
        Relationship::Block,
        Relationship::Unblock,
        Relationship::Approve,
        Relationship::Deny,
    ];

    /// Wire value of the `action` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::Follow => "follow",
            Relationship::Unfollow => "unfollow",
            Relationship::Block => "block",
            Relationship::Unblock => "unblock",
            Relationship::Approve => "approve",
            Relationship::Deny => "deny",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Relationship::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ApiError::invalid(format!("unknown relationship action `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instagram::decode::decode_object;
    use crate::testutil::fixtures;

    #[test]
    fn media_feed_roundtrip() {
        let original = fixtures::sample_media_feed();

        let json = serde_json::to_string(&original).unwrap();
        let decoded: MediaFeed = decode_object(&json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn user_info_roundtrip() {
        let original = fixtures::sample_user_info();

        let json = serde_json::to_string(&original).unwrap();
        let decoded: UserInfo = decode_object(&json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn media_decodes_api_sample() {
        let feed: MediaFeed = serde_json::from_str(fixtures::MEDIA_FEED_JSON).unwrap();

        assert_eq!(feed.meta.code, 200);
        assert_eq!(feed.data.len(), 1);

        let media = &feed.data[0];
        assert_eq!(media.media_type, "image");
        assert_eq!(media.tags, vec!["expobar".to_string()]);
        assert_eq!(media.user.username, "kevin");
        assert_eq!(media.likes.count, 15);
        assert_eq!(media.comments.data[0].from.username, "mikeyk");
        assert_eq!(media.images.standard_resolution.width, 612);
        assert!(media.caption.is_none());
        assert_eq!(media.location.as_ref().unwrap().id, "833");
    }

    #[test]
    fn null_collections_decode_as_empty() {
        let json = r#"{"meta":{"code":200},"data":null}"#;

        let likes: LikesFeed = serde_json::from_str(json).unwrap();
        let info: UserInfo = serde_json::from_str(json).unwrap();

        assert!(likes.data.is_empty());
        assert_eq!(info.data, UserInfoData::default());
    }

    #[test]
    fn location_id_accepts_number_or_string() {
        let numeric: Location = serde_json::from_str(r#"{"id": 514276, "name": "Pier"}"#).unwrap();
        let text: Location = serde_json::from_str(r#"{"id": "514276"}"#).unwrap();
        let null: Location = serde_json::from_str(r#"{"id": null}"#).unwrap();

        assert_eq!(numeric.id, "514276");
        assert_eq!(text.id, "514276");
        assert_eq!(null.id, "");
    }

    #[test]
    fn created_at_parses_unix_seconds() {
        let comment = CommentData {
            created_time: "1279332030".to_string(),
            ..CommentData::default()
        };

        let created = comment.created_at().unwrap();
        assert_eq!(created.to_rfc3339(), "2010-07-17T02:00:30+00:00");
    }

    #[test]
    fn created_at_rejects_garbage() {
        let media = MediaFeedData {
            created_time: "yesterday".to_string(),
            ..MediaFeedData::default()
        };
        assert!(media.created_at().is_none());
        assert!(MediaFeedData::default().created_at().is_none());
    }

    #[test]
    fn meta_detects_oauth_errors() {
        let meta = Meta {
            code: 400,
            error_type: Some("OAuthAccessTokenException".to_string()),
            error_message: Some("The access_token provided is invalid.".to_string()),
        };
        assert!(meta.is_oauth_error());

        let meta = Meta {
            code: 400,
            error_type: Some("APINotFoundError".to_string()),
            error_message: None,
        };
        assert!(!meta.is_oauth_error());
        assert!(!Meta::default().is_oauth_error());
    }

    #[test]
    fn relationship_wire_values() {
        assert_eq!(Relationship::Follow.to_string(), "follow");
        assert_eq!(Relationship::Deny.as_str(), "deny");
        assert_eq!(
            serde_json::to_string(&Relationship::Unblock).unwrap(),
            r#""unblock""#
        );
    }

    #[test]
    fn relationship_from_str() {
        assert_eq!("follow".parse::<Relationship>().unwrap(), Relationship::Follow);
        assert_eq!(" Approve ".parse::<Relationship>().unwrap(), Relationship::Approve);

        let err = "befriend".parse::<Relationship>().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
