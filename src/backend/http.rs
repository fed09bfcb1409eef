//! REST backend over blocking reqwest

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::model::{Comment, Conversation, Message, Notification, Post, User, UserSettings};
use super::Backend;
use crate::error::Result;

/// Client for a server exposing the tuitter REST endpoints
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        tracing::debug!(path, "GET");
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        Ok(request.send()?.error_for_status()?.json()?)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!(path, "POST");
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        Ok(request.send()?.error_for_status()?.json()?)
    }

    /// POST whose response body is ignored
    fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "POST");
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        request.send()?.error_for_status()?;
        Ok(())
    }
}

impl Backend for HttpBackend {
    fn current_user(&mut self) -> Result<User> {
        self.get("/me", &[])
    }

    fn timeline(&mut self, limit: usize) -> Result<Vec<Post>> {
        self.get("/timeline", &[("limit", limit.to_string())])
    }

    fn discover(&mut self, limit: usize) -> Result<Vec<Post>> {
        self.get("/discover", &[("limit", limit.to_string())])
    }

    fn conversations(&mut self) -> Result<Vec<Conversation>> {
        self.get("/conversations", &[])
    }

    fn messages(&mut self, conversation_id: &str) -> Result<Vec<Message>> {
        self.get(&format!("/conversations/{}/messages", conversation_id), &[])
    }

    fn send_message(&mut self, conversation_id: &str, content: &str) -> Result<Message> {
        self.post(
            &format!("/conversations/{}/messages", conversation_id),
            &json!({ "content": content }),
        )
    }

    fn notifications(&mut self, unread_only: bool) -> Result<Vec<Notification>> {
        if unread_only {
            self.get("/notifications", &[("unread_only", "true".to_string())])
        } else {
            self.get("/notifications", &[])
        }
    }

    fn mark_notification_read(&mut self, notification_id: &str) -> Result<()> {
        self.post_unit(
            &format!("/notifications/{}/read", notification_id),
            &json!({}),
        )
    }

    fn settings(&mut self) -> Result<UserSettings> {
        self.get("/settings", &[])
    }

    fn update_settings(&mut self, settings: &UserSettings) -> Result<()> {
        self.post_unit("/settings", settings)
    }

    fn create_post(&mut self, content: &str) -> Result<Post> {
        self.post("/posts", &json!({ "content": content }))
    }

    fn toggle_like(&mut self, post_id: &str) -> Result<()> {
        self.post_unit(&format!("/posts/{}/like", post_id), &json!({}))
    }

    fn toggle_repost(&mut self, post_id: &str) -> Result<()> {
        self.post_unit(&format!("/posts/{}/repost", post_id), &json!({}))
    }

    fn comments(&mut self, post_id: &str) -> Result<Vec<Comment>> {
        self.get(&format!("/posts/{}/comments", post_id), &[])
    }

    fn add_comment(&mut self, post_id: &str, text: &str) -> Result<Comment> {
        self.post(
            &format!("/posts/{}/comments", post_id),
            &json!({ "text": text }),
        )
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
