use crate::config::Stake;
use crate::game::Move;
use crate::providers::Chat;
use crate::providers::User;
use std::time::Duration;

/// Pause between the "Shi… Fu… Briq!" build-up messages.
const BEAT: Duration = Duration::from_millis(500);

fn mention(user: &User) -> String {
    format!("<@{}|{}>", user.id, user.name)
}

/// Tells the opponent they were challenged and the initiator to hold on.
pub async fn game_created(chat: &dyn Chat, initiator: &User, opponent: &User) -> anyhow::Result<()> {
    futures::future::try_join(
        chat.post(
            &format!(
                "Hey! {} just launched a Shifubriq! {}, join the game by typing `/shifubriq {}`",
                mention(initiator),
                mention(opponent),
                mention(initiator),
            ),
            &opponent.id,
            None,
        ),
        chat.post(
            &format!("Waiting for {} to accept the Shifubriq", mention(opponent)),
            &initiator.id,
            None,
        ),
    )
    .await
    .map(|_| ())
}

/// The dramatic build-up, ending with the move buttons. Each stage is
/// best-effort: a failed send is logged and the next stage still goes
/// out on schedule.
pub async fn prompts(chat: &dyn Chat, users: &[String], game_id: &str) {
    for text in ["Shi…", "Fu…"] {
        chat.post_many(text, users, None)
            .await
            .unwrap_or_else(|e| log::warn!("prompt send failed: {}", e));
        tokio::time::sleep(BEAT).await;
    }
    chat.post_many("Briq!", users, Some(&buttons(game_id)))
        .await
        .unwrap_or_else(|e| log::warn!("prompt send failed: {}", e));
}

fn buttons(game_id: &str) -> serde_json::Value {
    serde_json::json!([{
        "text": "What's your move?",
        "fallback": "You are unable to choose a game",
        "callback_id": game_id,
        "color": "#3AA3E3",
        "attachment_type": "default",
        "actions": [
            { "name": "game", "text": "✊", "type": "button", "value": Move::Rock.to_string() },
            { "name": "game", "text": "✋", "type": "button", "value": Move::Paper.to_string() },
            { "name": "game", "text": "✌️", "type": "button", "value": Move::Scissors.to_string() },
        ],
    }])
}

pub async fn tie(chat: &dyn Chat, users: &[String]) -> anyhow::Result<()> {
    chat.post_many("It's a tie ! Play again ! 😂🤣🙃", users, None).await
}

/// Gloats at the winner, consoles the loser, quoting the stake.
pub async fn victory(chat: &dyn Chat, stake: &Stake, winner: &User, loser: &User) -> anyhow::Result<()> {
    futures::future::try_join(
        chat.post(
            &format!(
                "You won 🤗🎉! You just stole {}{} to {}",
                stake.amount,
                stake.currency,
                mention(loser),
            ),
            &winner.id,
            None,
        ),
        chat.post(
            &format!(
                "Sorry, you lose 😕… {} just stole you {}{}!",
                mention(winner),
                stake.amount,
                stake.currency,
            ),
            &loser.id,
            None,
        ),
    )
    .await
    .map(|_| ())
}
