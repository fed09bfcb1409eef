//! In-memory backend seeded with fixture data

use std::collections::HashMap;

use chrono::{Duration, Local};

use super::model::{Comment, Conversation, Message, Notification, Post, User, UserSettings};
use super::Backend;
use crate::error::{Result, TuitterError};

const PREVIEW_LEN: usize = 30;

/// Backend that never leaves the process
pub struct FakeBackend {
    user: User,
    timeline: Vec<Post>,
    discover: Vec<Post>,
    conversations: Vec<Conversation>,
    messages: HashMap<String, Vec<Message>>,
    notifications: Vec<Notification>,
    settings: UserSettings,
    comments: HashMap<String, Vec<Comment>>,
    next_id: u64,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn post(id: &str, author: &str, content: &str, age: Duration, counts: (u64, u64, u64)) -> Post {
    Post {
        id: id.to_string(),
        author: author.to_string(),
        content: content.to_string(),
        timestamp: Local::now() - age,
        likes: counts.0,
        reposts: counts.1,
        comments: counts.2,
        liked_by_user: false,
        reposted_by_user: false,
        reposted_by: None,
    }
}

fn message(id: &str, sender: &str, content: &str, age: Duration) -> Message {
    Message {
        id: id.to_string(),
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp: Local::now() - age,
        is_read: true,
    }
}

fn comment(user: &str, text: &str) -> Comment {
    Comment {
        user: user.to_string(),
        text: text.to_string(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let now = Local::now();
        let user = User {
            username: "yourname".to_string(),
            display_name: "Your Name".to_string(),
            bio: "Building cool stuff with TUIs | vim enthusiast | developer".to_string(),
            followers: 891,
            following: 328,
            posts_count: 142,
        };

        let mut first = post(
            "1",
            "yourname",
            "Just shipped a new feature! The TUI is looking amazing",
            Duration::minutes(5),
            (12, 3, 5),
        );
        first.liked_by_user = true;
        let timeline = vec![
            first,
            post(
                "2",
                "alice",
                "Working on a new CLI tool for developers. Any testers?",
                Duration::minutes(15),
                (45, 12, 28),
            ),
            post(
                "3",
                "bob",
                "Refactoring is like cleaning your room. You know where everything is in the mess, but it's still better to organize it.",
                Duration::hours(1),
                (234, 67, 45),
            ),
        ];

        let discover = vec![
            post(
                "10",
                "techwriter",
                "Just discovered this amazing TUI framework! The vim-style navigation is incredible. #vim #tui #opensource",
                Duration::hours(2),
                (234, 45, 18),
            ),
            post(
                "11",
                "cliexpert",
                "Hot take: TUIs are making a comeback and I'm here for it! Terminal > GUI any day #cli #terminal",
                Duration::hours(4),
                (189, 52, 34),
            ),
            post(
                "12",
                "vimfan",
                "Finally got my custom vim config working with this social network. The hjkl navigation feels so natural! #vim",
                Duration::hours(5),
                (156, 28, 12),
            ),
        ];

        let conversation = |id: &str, username: &str, last: &str, age: Duration, unread: bool| {
            Conversation {
                id: id.to_string(),
                username: username.to_string(),
                last_message: last.to_string(),
                timestamp: now - age,
                unread,
            }
        };
        let conversations = vec![
            conversation(
                "c1",
                "alice",
                "Thanks! Let me know if you need...",
                Duration::minutes(2),
                true,
            ),
            conversation("c2", "charlie", "That sounds perfect!", Duration::hours(1), true),
            conversation(
                "c3",
                "bob",
                "Working on a new CLI tool...",
                Duration::hours(3),
                false,
            ),
        ];

        let mut messages = HashMap::new();
        messages.insert(
            "c1".to_string(),
            vec![
                message(
                    "m1",
                    "alice",
                    "Hey! Did you see the new feature I pushed?",
                    Duration::minutes(15),
                ),
                message("m2", "yourname", "Yes! It looks amazing!", Duration::minutes(13)),
                message(
                    "m3",
                    "yourname",
                    "The TUI design is so clean. How did you implement the navigation system?",
                    Duration::minutes(12),
                ),
                message(
                    "m4",
                    "alice",
                    "Thanks! I used a state machine for the navigation. Want me to share the code?",
                    Duration::minutes(8),
                ),
                message(
                    "m5",
                    "yourname",
                    "That would be great! Thanks! Let me know if you need any help with testing.",
                    Duration::seconds(30),
                ),
            ],
        );

        let notification = |id: &str,
                            kind: &str,
                            actor: &str,
                            content: &str,
                            age: Duration,
                            related: Option<String>| {
            Notification {
                id: id.to_string(),
                kind: kind.to_string(),
                actor: actor.to_string(),
                content: content.to_string(),
                timestamp: now - age,
                read: false,
                related_post: related,
            }
        };
        let notifications = vec![
            notification(
                "n1",
                "mention",
                "charlie",
                "@yourname what do you think about this?",
                Duration::minutes(5),
                None,
            ),
            notification(
                "n2",
                "like",
                "alice",
                "Just shipped a new feature! The TUI is looking amazing",
                Duration::minutes(15),
                Some("1".to_string()),
            ),
        ];

        let settings = UserSettings {
            username: "yourname".to_string(),
            display_name: "Your Name".to_string(),
            bio: user.bio.clone(),
            email_notifications: true,
            show_online_status: true,
            private_account: false,
            github_connected: true,
            gitlab_connected: false,
            google_connected: false,
            discord_connected: false,
        };

        let mut comments = HashMap::new();
        comments.insert(
            "1".to_string(),
            vec![comment("alice", "Looks awesome!"), comment("bob", "Nice one")],
        );
        comments.insert("2".to_string(), vec![comment("charlie", "Count me in")]);

        Self {
            user,
            timeline,
            discover,
            conversations,
            messages,
            notifications,
            settings,
            comments,
            next_id: 1000,
        }
    }

    /// Add `count` generated discover posts (used to exercise pagination)
    pub fn with_generated_discover(mut self, count: usize) -> Self {
        for i in 0..count {
            let id = format!("g{}", i);
            let author = format!("user{}", i % 7);
            let content = format!("Generated post number {}", i);
            self.discover.push(post(
                &id,
                &author,
                &content,
                Duration::minutes(i as i64 + 360),
                (0, 0, 0),
            ));
        }
        self
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn find_post(&mut self, post_id: &str) -> Result<&mut Post> {
        self.timeline
            .iter_mut()
            .chain(self.discover.iter_mut())
            .find(|p| p.id == post_id)
            .ok_or_else(|| TuitterError::backend(format!("post {} not found", post_id)))
    }
}

impl Backend for FakeBackend {
    fn current_user(&mut self) -> Result<User> {
        Ok(self.user.clone())
    }

    fn timeline(&mut self, limit: usize) -> Result<Vec<Post>> {
        Ok(self.timeline.iter().take(limit).cloned().collect())
    }

    fn discover(&mut self, limit: usize) -> Result<Vec<Post>> {
        Ok(self.discover.iter().take(limit).cloned().collect())
    }

    fn conversations(&mut self) -> Result<Vec<Conversation>> {
        Ok(self.conversations.clone())
    }

    fn messages(&mut self, conversation_id: &str) -> Result<Vec<Message>> {
        Ok(self
            .messages
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    fn send_message(&mut self, conversation_id: &str, content: &str) -> Result<Message> {
        let id = self.next_id("m");
        let sent = Message {
            id,
            sender: self.user.username.clone(),
            content: content.to_string(),
            timestamp: Local::now(),
            is_read: true,
        };
        self.messages
            .entry(conversation_id.to_string())
            .or_default()
            .push(sent.clone());
        if let Some(conv) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        {
            conv.last_message = preview(content);
            conv.timestamp = sent.timestamp;
        }
        Ok(sent)
    }

    fn notifications(&mut self, unread_only: bool) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| !unread_only || !n.read)
            .cloned()
            .collect())
    }

    fn mark_notification_read(&mut self, notification_id: &str) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| {
                TuitterError::backend(format!("notification {} not found", notification_id))
            })?;
        notification.read = true;
        Ok(())
    }

    fn settings(&mut self) -> Result<UserSettings> {
        Ok(self.settings.clone())
    }

    fn update_settings(&mut self, settings: &UserSettings) -> Result<()> {
        self.settings = settings.clone();
        Ok(())
    }

    fn create_post(&mut self, content: &str) -> Result<Post> {
        let id = self.next_id("p");
        let created = Post {
            id,
            author: self.user.username.clone(),
            content: content.to_string(),
            timestamp: Local::now(),
            likes: 0,
            reposts: 0,
            comments: 0,
            liked_by_user: false,
            reposted_by_user: false,
            reposted_by: None,
        };
        self.timeline.insert(0, created.clone());
        self.user.posts_count += 1;
        Ok(created)
    }

    fn toggle_like(&mut self, post_id: &str) -> Result<()> {
        self.find_post(post_id)?.toggle_like();
        Ok(())
    }

    fn toggle_repost(&mut self, post_id: &str) -> Result<()> {
        self.find_post(post_id)?.toggle_repost();
        Ok(())
    }

    fn comments(&mut self, post_id: &str) -> Result<Vec<Comment>> {
        Ok(self.comments.get(post_id).cloned().unwrap_or_default())
    }

    fn add_comment(&mut self, post_id: &str, text: &str) -> Result<Comment> {
        let added = comment(&self.user.username, text);
        self.comments
            .entry(post_id.to_string())
            .or_default()
            .push(added.clone());
        if let Ok(post) = self.find_post(post_id) {
            post.comments += 1;
        }
        Ok(added)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_LEN {
        let cut: String = content.chars().take(PREVIEW_LEN).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}
