//! Static catalog of Instagram v1 endpoints
//!
//! Each entry pairs a verb with a path template. Placeholders are written as
//! `{name}` and are filled positionally by [`Endpoint::resolve`].

use super::error::ApiError;
use super::request::Verb;

/// A single API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub template: &'static str,
}

impl Endpoint {
    const fn new(verb: Verb, template: &'static str) -> Self {
        Self { verb, template }
    }

    /// Number of `{placeholder}` slots in the template
    pub fn arity(&self) -> usize {
        self.template.matches('{').count()
    }

    /// Substitutes `args` into the template, in order
    ///
    /// Each argument is percent-encoded as a path segment. Fails with
    /// `ApiError::InvalidArgument` on an arity mismatch or an empty argument.
    pub fn resolve(&self, args: &[&str]) -> Result<String, ApiError> {
        if args.len() != self.arity() {
            return Err(ApiError::invalid(format!(
                "{} expects {} argument(s), got {}",
                self.template,
                self.arity(),
                args.len()
            )));
        }

        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template;
        for arg in args {
            if arg.trim().is_empty() {
                return Err(ApiError::invalid(format!(
                    "{} requires a non-empty argument",
                    self.template
                )));
            }

            // arity() guarantees a placeholder is left for every argument
            let (Some(open), Some(close)) = (rest.find('{'), rest.find('}')) else {
                break;
            };
            path.push_str(&rest[..open]);
            path.push_str(&urlencoding::encode(arg));
            rest = &rest[close + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}

// Users
pub const USER: Endpoint = Endpoint::new(Verb::Get, "/users/{user_id}");
pub const USER_SELF_FEED: Endpoint = Endpoint::new(Verb::Get, "/users/self/feed");
pub const USER_RECENT_MEDIA: Endpoint = Endpoint::new(Verb::Get, "/users/{user_id}/media/recent");
pub const USER_SELF_LIKED_MEDIA: Endpoint = Endpoint::new(Verb::Get, "/users/self/media/liked");
pub const USER_SEARCH: Endpoint = Endpoint::new(Verb::Get, "/users/search");

// Relationships
pub const USER_FOLLOWS: Endpoint = Endpoint::new(Verb::Get, "/users/{user_id}/follows");
pub const USER_FOLLOWED_BY: Endpoint = Endpoint::new(Verb::Get, "/users/{user_id}/followed-by");
pub const USER_SELF_REQUESTED_BY: Endpoint = Endpoint::new(Verb::Get, "/users/self/requested-by");
pub const USER_RELATIONSHIP: Endpoint = Endpoint::new(Verb::Get, "/users/{user_id}/relationship");
pub const USER_RELATIONSHIP_UPDATE: Endpoint =
    Endpoint::new(Verb::Post, "/users/{user_id}/relationship");

// Media
pub const MEDIA: Endpoint = Endpoint::new(Verb::Get, "/media/{media_id}");
pub const MEDIA_SEARCH: Endpoint = Endpoint::new(Verb::Get, "/media/search");
pub const MEDIA_POPULAR: Endpoint = Endpoint::new(Verb::Get, "/media/popular");

// Comments
pub const MEDIA_COMMENTS: Endpoint = Endpoint::new(Verb::Get, "/media/{media_id}/comments");
pub const MEDIA_COMMENT_ADD: Endpoint = Endpoint::new(Verb::Post, "/media/{media_id}/comments");
pub const MEDIA_COMMENT_DELETE: Endpoint =
    Endpoint::new(Verb::Delete, "/media/{media_id}/comments/{comment_id}");

// Likes
pub const MEDIA_LIKES: Endpoint = Endpoint::new(Verb::Get, "/media/{media_id}/likes");
pub const MEDIA_LIKE_ADD: Endpoint = Endpoint::new(Verb::Post, "/media/{media_id}/likes");
pub const MEDIA_LIKE_DELETE: Endpoint = Endpoint::new(Verb::Delete, "/media/{media_id}/likes");

// Tags
pub const TAG: Endpoint = Endpoint::new(Verb::Get, "/tags/{tag_name}");
pub const TAG_RECENT_MEDIA: Endpoint = Endpoint::new(Verb::Get, "/tags/{tag_name}/media/recent");
pub const TAG_SEARCH: Endpoint = Endpoint::new(Verb::Get, "/tags/search");

// Locations
pub const LOCATION: Endpoint = Endpoint::new(Verb::Get, "/locations/{location_id}");
pub const LOCATION_RECENT_MEDIA: Endpoint =
    Endpoint::new(Verb::Get, "/locations/{location_id}/media/recent");
pub const LOCATION_SEARCH: Endpoint = Endpoint::new(Verb::Get, "/locations/search");
