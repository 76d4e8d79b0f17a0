use super::*;
use crate::config::Config;
use std::time::Duration;

#[derive(serde::Deserialize)]
struct Member {
    id: String,
    name: String,
}
#[derive(serde::Deserialize)]
struct Members {
    #[serde(default)]
    members: Vec<Member>,
}
#[derive(serde::Deserialize)]
struct Channel {
    id: String,
}
#[derive(serde::Deserialize)]
struct Opened {
    channel: Channel,
}
#[derive(serde::Deserialize)]
struct TeamInfo {
    id: String,
    name: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    email_domain: String,
}
#[derive(serde::Deserialize)]
struct Info {
    team: TeamInfo,
}

/// Slack Web API client. Bot messages go through per-user app
/// channels, so every post is an open-conversation then post-message
/// pair. The token rides along as a query parameter on every call.
pub struct Slack {
    base: String,
    token: String,
}

impl From<&Config> for Slack {
    fn from(config: &Config) -> Self {
        Self {
            base: config.slack_base_url.clone(),
            token: config.slack_token.clone(),
        }
    }
}

impl Slack {
    const LIST_USERS: &'static str = "/users.list";
    const OPEN_CONV: &'static str = "/conversations.open";
    const POST_MESSAGE: &'static str = "/chat.postMessage";
    const TEAM_INFO: &'static str = "/team.info";

    fn client() -> awc::Client {
        awc::Client::builder()
            .timeout(Duration::from_secs(10))
            .finish()
    }

    async fn call(&self, command: &str, params: &[(&str, &str)]) -> anyhow::Result<serde_json::Value> {
        let mut query = vec![("token", self.token.as_str())];
        query.extend_from_slice(params);
        let mut response = Self::client()
            .post(format!("{}{}", self.base, command))
            .query(&query)
            .map_err(|e| anyhow::anyhow!("bad query for {}: {}", command, e))?
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{} request failed: {}", command, e))?;
        match response.status().is_success() {
            false => Err(anyhow::anyhow!("{} rejected: {}", command, response.status())),
            true => response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| anyhow::anyhow!("{} response unreadable: {}", command, e)),
        }
    }

    async fn channel(&self, user: &str) -> anyhow::Result<String> {
        let opened = self.call(Self::OPEN_CONV, &[("users", user)]).await?;
        let opened = serde_json::from_value::<Opened>(opened)
            .map_err(|e| anyhow::anyhow!("no app channel for {}: {}", user, e))?;
        Ok(opened.channel.id)
    }
}

#[async_trait::async_trait(?Send)]
impl Chat for Slack {
    async fn directory(&self) -> anyhow::Result<HashMap<String, String>> {
        let listed = self.call(Self::LIST_USERS, &[]).await?;
        let listed = serde_json::from_value::<Members>(listed)?;
        Ok(listed
            .members
            .into_iter()
            .map(|member| (member.id, member.name))
            .collect())
    }

    async fn post(
        &self,
        text: &str,
        user: &str,
        attachments: Option<&serde_json::Value>,
    ) -> anyhow::Result<()> {
        let channel = self.channel(user).await?;
        let mut params = vec![("channel", channel.clone()), ("text", text.to_string())];
        if let Some(attachments) = attachments {
            params.push(("attachments", serde_json::to_string(attachments)?));
        }
        let params = params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect::<Vec<_>>();
        self.call(Self::POST_MESSAGE, &params).await.map(|_| ())
    }

    async fn team(&self) -> anyhow::Result<Team> {
        let info = self.call(Self::TEAM_INFO, &[]).await?;
        let info = serde_json::from_value::<Info>(info)?;
        Ok(Team {
            id: info.team.id,
            name: info.team.name,
            domain: info.team.domain,
            email_domain: info.team.email_domain,
        })
    }
}
