//! Domain records exchanged with the backend

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub posts_count: u64,
}

impl User {
    /// Minimal record for a user known only by name
    pub fn named(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            display_name: username.clone(),
            username,
            bio: String::new(),
            followers: 0,
            following: 0,
            posts_count: 0,
        }
    }
}

/// A post. Field aliases accept the shapes different servers send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(alias = "username", alias = "user")]
    pub author: String,
    #[serde(default, alias = "text")]
    pub content: String,
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub reposts: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default, alias = "liked")]
    pub liked_by_user: bool,
    #[serde(default, alias = "reposted")]
    pub reposted_by_user: bool,
    /// Set on the local copy shown at the top of the timeline after a repost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reposted_by: Option<String>,
}

impl Post {
    pub fn toggle_like(&mut self) {
        if self.liked_by_user {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.liked_by_user = !self.liked_by_user;
    }

    pub fn toggle_repost(&mut self) {
        if self.reposted_by_user {
            self.reposts = self.reposts.saturating_sub(1);
        } else {
            self.reposts += 1;
        }
        self.reposted_by_user = !self.reposted_by_user;
    }

    /// Case-insensitive match on author or content; `needle` must be lowercase
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.author.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub sender: String,
    pub content: String,
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// mention, like, repost, follow, comment
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub related_post: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(alias = "author", alias = "username")]
    pub user: String,
    #[serde(alias = "content")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub show_online_status: bool,
    #[serde(default)]
    pub private_account: bool,
    #[serde(default)]
    pub github_connected: bool,
    #[serde(default)]
    pub gitlab_connected: bool,
    #[serde(default)]
    pub google_connected: bool,
    #[serde(default)]
    pub discord_connected: bool,
}

/// Accept numeric or string ids
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
