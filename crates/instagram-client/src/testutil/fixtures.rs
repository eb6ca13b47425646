//! Test fixtures
//!
//! Response bodies shaped like the ones the API returns, plus pre-built
//! values for round-trip tests.

use crate::instagram::{
    CommentData, Comments, Counts, ImageData, Images, Likes, Location, MediaFeed, MediaFeedData,
    Meta, User, UserInfo, UserInfoData,
};

/// A one-item media feed with no caption and a numeric location id
pub const MEDIA_FEED_JSON: &str = r#"{
    "meta": {"code": 200},
    "data": [{
        "id": "22699663",
        "type": "image",
        "created_time": "1296656006",
        "link": "http://instagr.am/p/BWrVZ/",
        "filter": "Earlybird",
        "tags": ["expobar"],
        "caption": null,
        "user_has_liked": false,
        "attribution": null,
        "images": {
            "low_resolution": {"url": "http://example.com/low.jpg", "width": 306, "height": 306},
            "thumbnail": {"url": "http://example.com/thumb.jpg", "width": 150, "height": 150},
            "standard_resolution": {"url": "http://example.com/std.jpg", "width": 612, "height": 612}
        },
        "likes": {"count": 15, "data": [{"id": "4", "username": "mikeyk"}]},
        "comments": {
            "count": 1,
            "data": [{
                "id": "26589964",
                "text": "Expobar!",
                "created_time": "1296656008",
                "from": {"id": "4", "username": "mikeyk", "full_name": "Mike Krieger"}
            }]
        },
        "user": {"id": "3", "username": "kevin", "full_name": "Kevin S", "profile_picture": ""},
        "location": {"id": 833, "name": "Dogpatch Labs", "latitude": 37.77, "longitude": -122.39}
    }]
}"#;

/// Comments feed with two entries
pub const COMMENTS_JSON: &str = r#"{
    "meta": {"code": 200},
    "data": [
        {
            "id": "420",
            "text": "Really amazing photo!",
            "created_time": "1280780324",
            "from": {"id": "3", "username": "snoopdogg", "full_name": "Snoop Dogg"}
        },
        {
            "id": "421",
            "text": "Agreed",
            "created_time": "1280780400",
            "from": {"id": "5", "username": "chrisbrown", "full_name": "Chris Brown"}
        }
    ]
}"#;

/// Error envelope returned for a revoked or invalid token
pub const OAUTH_ERROR_JSON: &str = r#"{
    "meta": {
        "error_type": "OAuthAccessTokenException",
        "code": 400,
        "error_message": "The access_token provided is invalid."
    }
}"#;

pub fn sample_user_info() -> UserInfo {
    UserInfo {
        meta: Meta {
            code: 200,
            ..Meta::default()
        },
        data: UserInfoData {
            id: "1574083".to_string(),
            username: "snoopdogg".to_string(),
            full_name: "Snoop Dogg".to_string(),
            profile_picture: "http://example.com/snoop.jpg".to_string(),
            bio: "This is my bio".to_string(),
            website: "http://snoopdogg.com".to_string(),
            counts: Counts {
                media: 1320,
                follows: 420,
                followed_by: 3_410_000,
            },
        },
    }
}

pub fn sample_media_feed() -> MediaFeed {
    let kevin = User {
        id: "3".to_string(),
        username: "kevin".to_string(),
        full_name: "Kevin S".to_string(),
        profile_picture: String::new(),
    };
    let image = |size: u32| ImageData {
        url: format!("http://example.com/{size}.jpg"),
        width: size,
        height: size,
    };

    MediaFeed {
        meta: Meta {
            code: 200,
            ..Meta::default()
        },
        data: vec![MediaFeedData {
            id: "22699663".to_string(),
            media_type: "image".to_string(),
            created_time: "1296656006".to_string(),
            link: "http://instagr.am/p/BWrVZ/".to_string(),
            filter: "Earlybird".to_string(),
            tags: vec!["expobar".to_string(), "coffee".to_string()],
            caption: Some(CommentData {
                id: "26589963".to_string(),
                text: "Morning espresso".to_string(),
                created_time: "1296656007".to_string(),
                from: kevin.clone(),
            }),
            images: Images {
                low_resolution: image(306),
                thumbnail: image(150),
                standard_resolution: image(612),
            },
            user: kevin.clone(),
            user_has_liked: true,
            likes: Likes {
                count: 1,
                data: vec![kevin],
            },
            comments: Comments::default(),
            location: Some(Location {
                id: "833".to_string(),
                name: "Dogpatch Labs".to_string(),
                latitude: 37.782,
                longitude: -122.387,
            }),
        }],
    }
}
