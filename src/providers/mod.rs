mod briq;
mod slack;

pub use briq::*;
pub use slack::*;

use std::collections::HashMap;

/// A chat-platform identity: opaque user id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Workspace the bot is installed in; `name` doubles as the Briq
/// organization context.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub email_domain: String,
}

/// A Briq transfer from loser to winner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Transaction {
    pub amount: u32,
    pub comment: String,
    pub app: String,
    pub from: String,
    pub to: String,
}

/// The chat platform as the game sees it: direct messages in, user
/// directory and team info out. Implementations are transport-bound
/// (HTTP to Slack in production, in-memory doubles in tests); futures
/// are `?Send` because they run on single-threaded actix workers.
#[async_trait::async_trait(?Send)]
pub trait Chat: Send + Sync {
    /// Full id → display-name directory of the workspace.
    async fn directory(&self) -> anyhow::Result<HashMap<String, String>>;

    /// Direct-messages one user, with optional interactive attachments.
    async fn post(
        &self,
        text: &str,
        user: &str,
        attachments: Option<&serde_json::Value>,
    ) -> anyhow::Result<()>;

    /// Direct-messages several users concurrently.
    async fn post_many(
        &self,
        text: &str,
        users: &[String],
        attachments: Option<&serde_json::Value>,
    ) -> anyhow::Result<()> {
        futures::future::try_join_all(users.iter().map(|user| self.post(text, user, attachments)))
            .await
            .map(|_| ())
    }

    async fn team(&self) -> anyhow::Result<Team>;
}

/// The payment provider: fire a transfer within an organization.
#[async_trait::async_trait(?Send)]
pub trait Bank: Send + Sync {
    async fn transfer(&self, transaction: &Transaction, organization: &str) -> anyhow::Result<()>;
}
