use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use instagram_client::auth::{FileTokenStore, TokenStorage};
use instagram_client::config::ConfigManager;
use instagram_client::instagram::Relationship;
use instagram_client::{AccessToken, InstagramClient};

#[derive(Parser)]
#[command(name = "instagram", version, about = "Query the Instagram API from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store an access token obtained elsewhere
    Login { token: String },
    /// Forget the stored access token
    Logout,
    #[command(flatten)]
    Api(ApiCommand),
}

/// Subcommands that call the API with the stored token
#[derive(Subcommand)]
enum ApiCommand {
    /// Show a user's profile
    User { user_id: u64 },
    /// Show your own feed
    Feed,
    /// Show a user's recent media
    RecentMedia { user_id: u64 },
    /// Show media you have liked
    LikedMedia,
    /// Search users by name
    SearchUsers { query: String },
    /// List the users a user follows
    Follows { user_id: u64 },
    /// List the users following a user
    FollowedBy { user_id: u64 },
    /// List pending follow requests
    RequestedBy,
    /// Show or change your relationship with a user
    Relationship {
        user_id: u64,
        /// follow, unfollow, block, unblock, approve or deny
        action: Option<String>,
    },
    /// Show a media object
    Media { media_id: u64 },
    /// Search media around a point
    SearchMedia {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Show popular media
    Popular,
    /// List comments on a media object
    Comments { media_id: u64 },
    /// Comment on a media object
    Comment { media_id: u64, text: String },
    /// Delete a comment
    DeleteComment { media_id: u64, comment_id: u64 },
    /// List the users who liked a media object
    Likes { media_id: u64 },
    /// Like a media object
    Like { media_id: u64 },
    /// Remove your like from a media object
    Unlike { media_id: u64 },
    /// Show a tag
    Tag { name: String },
    /// Show recent media for a tag
    TagMedia { name: String },
    /// Search tags by name
    SearchTags { query: String },
    /// Show a location
    Location { location_id: u64 },
    /// Show recent media at a location
    LocationMedia { location_id: u64 },
    /// Search locations around a point
    SearchLocations {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let store = FileTokenStore::new()?;

    match cli.command {
        Command::Login { token } => {
            let token = AccessToken::new(token);
            anyhow::ensure!(token.is_valid(), "Token cannot be empty");
            store.save(&token).await?;
            tracing::info!("Token saved");
            return Ok(());
        }
        Command::Logout => {
            store.delete().await?;
            tracing::info!("Token removed");
            return Ok(());
        }
        Command::Api(command) => {
            let token = store
                .load()
                .await
                .context("No usable token, run `instagram login <token>` first")?;
            let config = ConfigManager::new()?;
            let client = InstagramClient::from_config(token, config.get())?;
            run(&client, command).await?;
        }
    }

    Ok(())
}

async fn run(client: &InstagramClient, command: ApiCommand) -> Result<()> {
    match command {
        ApiCommand::User { user_id } => print(&client.get_user_info(user_id).await?),
        ApiCommand::Feed => print(&client.get_user_feed().await?),
        ApiCommand::RecentMedia { user_id } => print(&client.get_recent_media_feed(user_id).await?),
        ApiCommand::LikedMedia => print(&client.get_user_liked_media_feed().await?),
        ApiCommand::SearchUsers { query } => print(&client.search_user(&query).await?),
        ApiCommand::Follows { user_id } => print(&client.get_user_follow_list(user_id).await?),
        ApiCommand::FollowedBy { user_id } => {
            print(&client.get_user_followed_by_list(user_id).await?)
        }
        ApiCommand::RequestedBy => print(&client.get_user_requested_by().await?),
        ApiCommand::Relationship { user_id, action } => match action {
            Some(action) => {
                let relationship: Relationship = action.parse()?;
                print(&client.set_user_relationship(user_id, relationship).await?)
            }
            None => print(&client.get_user_relationship(user_id).await?),
        },
        ApiCommand::Media { media_id } => print(&client.get_media_info(media_id).await?),
        ApiCommand::SearchMedia { lat, lng } => print(&client.search_media(lat, lng).await?),
        ApiCommand::Popular => print(&client.get_popular_media().await?),
        ApiCommand::Comments { media_id } => print(&client.get_media_comments(media_id).await?),
        ApiCommand::Comment { media_id, text } => {
            print(&client.set_media_comment(media_id, &text).await?)
        }
        ApiCommand::DeleteComment {
            media_id,
            comment_id,
        } => print(&client.delete_media_comment(media_id, comment_id).await?),
        ApiCommand::Likes { media_id } => print(&client.get_user_likes(media_id).await?),
        ApiCommand::Like { media_id } => print(&client.set_user_like(media_id).await?),
        ApiCommand::Unlike { media_id } => print(&client.delete_user_like(media_id).await?),
        ApiCommand::Tag { name } => print(&client.get_tag_info(&name).await?),
        ApiCommand::TagMedia { name } => print(&client.get_recent_media_tags(&name).await?),
        ApiCommand::SearchTags { query } => print(&client.search_tags(&query).await?),
        ApiCommand::Location { location_id } => print(&client.get_location_info(location_id).await?),
        ApiCommand::LocationMedia { location_id } => {
            print(&client.get_recent_media_by_location(location_id).await?)
        }
        ApiCommand::SearchLocations { lat, lng } => print(&client.search_location(lat, lng).await?),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{json}");
    Ok(())
}
