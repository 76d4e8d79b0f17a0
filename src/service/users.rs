use crate::providers::Chat;

/// Resolves display names for a batch of user ids against the full
/// workspace directory. Any unknown id fails the whole resolution.
pub async fn names(chat: &dyn Chat, ids: &[&str]) -> anyhow::Result<Vec<String>> {
    let directory = chat.directory().await?;
    ids.iter()
        .map(|id| {
            directory
                .get(*id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no username found for {}", id))
        })
        .collect()
}
