//! Data-access contract and its implementations
//!
//! The UI only talks to `dyn Backend`. [`FakeBackend`] serves fixture data
//! from memory; [`HttpBackend`] talks to a REST server.

mod fake;
mod http;
pub mod model;

pub use fake::FakeBackend;
pub use http::HttpBackend;
pub use model::{Comment, Conversation, Message, Notification, Post, User, UserSettings};

use crate::error::Result;

/// Everything the client needs from a server.
///
/// Calls block until they complete or fail; retry policy belongs to the
/// implementation.
pub trait Backend {
    fn current_user(&mut self) -> Result<User>;
    fn timeline(&mut self, limit: usize) -> Result<Vec<Post>>;
    fn discover(&mut self, limit: usize) -> Result<Vec<Post>>;
    fn conversations(&mut self) -> Result<Vec<Conversation>>;
    fn messages(&mut self, conversation_id: &str) -> Result<Vec<Message>>;
    fn send_message(&mut self, conversation_id: &str, content: &str) -> Result<Message>;
    fn notifications(&mut self, unread_only: bool) -> Result<Vec<Notification>>;
    fn mark_notification_read(&mut self, notification_id: &str) -> Result<()>;
    fn settings(&mut self) -> Result<UserSettings>;
    fn update_settings(&mut self, settings: &UserSettings) -> Result<()>;
    fn create_post(&mut self, content: &str) -> Result<Post>;
    fn toggle_like(&mut self, post_id: &str) -> Result<()>;
    fn toggle_repost(&mut self, post_id: &str) -> Result<()>;
    fn comments(&mut self, post_id: &str) -> Result<Vec<Comment>>;
    fn add_comment(&mut self, post_id: &str, text: &str) -> Result<Comment>;

    /// Short name for logs and the status line
    fn name(&self) -> &'static str;
}
