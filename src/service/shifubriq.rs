use super::*;
use crate::config::Config;
use crate::game::Handle;
use crate::game::Move;
use crate::game::Registry;
use crate::game::Resolution;
use crate::game::Victory;
use crate::providers::Bank;
use crate::providers::Chat;
use crate::providers::User;
use std::sync::Arc;

/// Outcome of a slash-command invocation. `Initiated` covers both a
/// freshly created challenge and a successful join by the opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initiation {
    Initiated,
    StillWaiting,
    Rejected(MentionError),
}

/// Outcome of a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Played {
    Unknown,
    Pending,
    Tie,
    Win { winner: String, loser: String },
}

/// One interactive-message action: the button's name and value.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Action {
    pub name: String,
    pub value: String,
}

/// Coordinates games end to end: interprets Registry/Game outcomes to
/// decide when to create, join, prompt, resolve, and tear down, and
/// fires the notification and payout side effects exactly once per
/// finished game. Side effects that must not delay the response to
/// Slack are spawned fire-and-forget; their failures are logged.
pub struct Shifubriq {
    registry: Registry,
    chat: Arc<dyn Chat>,
    bank: Arc<dyn Bank>,
    config: Config,
}

impl Shifubriq {
    pub fn new(chat: Arc<dyn Chat>, bank: Arc<dyn Bank>, config: Config) -> Self {
        Self {
            registry: Registry::default(),
            chat,
            bank,
            config,
        }
    }

    /// Shared-secret check for inbound requests.
    pub fn verify(&self, token: &str) -> bool {
        token == self.config.verification_token
    }

    /// Slash-command flow: parse the opponent mention, then either
    /// open a fresh game or treat the call as the opponent accepting.
    pub async fn initiate(&self, initiator: &str, text: &str) -> anyhow::Result<Initiation> {
        let opponent = match mention::opponent(text) {
            Ok(user) => user,
            Err(reason) => return Ok(Initiation::Rejected(reason)),
        };
        let id = Registry::id(initiator, &opponent.id);
        match self.registry.lookup(&id).await {
            None => self
                .open(initiator, &opponent, &id)
                .await
                .map(|_| Initiation::Initiated),
            Some(game) => self.accept(game, initiator, &id).await,
        }
    }

    /// Creates the game and tells both parties. Display names resolve
    /// before any state changes, so a resolution failure aborts the
    /// creation cleanly.
    async fn open(&self, initiator: &str, opponent: &User, id: &str) -> anyhow::Result<()> {
        let names = users::names(&*self.chat, &[initiator, &opponent.id]).await?;
        let initiator = User {
            id: initiator.to_string(),
            name: names[0].clone(),
        };
        let opponent = User {
            id: opponent.id.clone(),
            name: names[1].clone(),
        };
        self.registry.create(id, &initiator.id).await?;
        messaging::game_created(&*self.chat, &initiator, &opponent).await
    }

    /// Re-invocation on an existing game: either the initiator is
    /// pestering while the opponent dawdles, or the opponent accepts.
    /// A join refused here means an unreachable state was reached and
    /// is surfaced as a fatal error, not a chat response.
    async fn accept(&self, game: Handle, joiner: &str, id: &str) -> anyhow::Result<Initiation> {
        let users = {
            let mut game = game.lock().await;
            if game.users()[0] == joiner {
                return Ok(Initiation::StillWaiting);
            }
            game.join(joiner)
                .map_err(|e| anyhow::anyhow!("user not added: {}", e))?;
            game.users().to_vec()
        };
        let chat = self.chat.clone();
        let id = id.to_string();
        actix_web::rt::spawn(async move { messaging::prompts(&*chat, &users, &id).await });
        Ok(Initiation::Initiated)
    }

    /// Button-press flow. The game lock spans the play and resolve so
    /// racing submissions serialize; it is released before teardown.
    pub async fn play(&self, game_id: &str, user: &str, action: &Action) -> anyhow::Result<Played> {
        if action.name != "game" {
            return Ok(Played::Unknown);
        }
        let Ok(choice) = action.value.parse::<Move>() else {
            return Ok(Played::Unknown);
        };
        let game = self
            .registry
            .lookup(game_id)
            .await
            .ok_or_else(|| anyhow::anyhow!("no game found for id: {}", game_id))?;
        let resolution = {
            let mut game = game.lock().await;
            let played = game
                .play(user, choice)
                .map_err(|e| anyhow::anyhow!("move not played: {}", e))?
                .len();
            match played {
                1 => None,
                _ => Some((
                    game.resolve()
                        .map_err(|e| anyhow::anyhow!("game not resolved: {}", e))?,
                    game.users().to_vec(),
                )),
            }
        };
        match resolution {
            None => Ok(Played::Pending),
            Some((Resolution::Tie, users)) => {
                self.registry.remove(game_id).await;
                let chat = self.chat.clone();
                actix_web::rt::spawn(async move {
                    messaging::tie(&*chat, &users)
                        .await
                        .unwrap_or_else(|e| log::warn!("tie notification failed: {}", e));
                });
                Ok(Played::Tie)
            }
            Some((Resolution::Winner(victory), _)) => {
                self.registry.remove(game_id).await;
                self.reward(victory).await
            }
        }
    }

    /// Decisive finish: resolve names, fire the payout (production
    /// runtime only) and the win/lose notifications.
    async fn reward(&self, victory: Victory) -> anyhow::Result<Played> {
        let names = users::names(&*self.chat, &[&victory.winner, &victory.loser]).await?;
        let winner = User {
            id: victory.winner.clone(),
            name: names[0].clone(),
        };
        let loser = User {
            id: victory.loser.clone(),
            name: names[1].clone(),
        };
        if self.config.production {
            let chat = self.chat.clone();
            let bank = self.bank.clone();
            let amount = self.config.stake.amount;
            let from = loser.name.clone();
            let to = winner.name.clone();
            actix_web::rt::spawn(async move {
                payout::transfer(&*chat, &*bank, amount, &from, &to)
                    .await
                    .unwrap_or_else(|e| log::warn!("payout failed: {}", e));
            });
        }
        let chat = self.chat.clone();
        let stake = self.config.stake.clone();
        let gloat = winner.clone();
        let console = loser.clone();
        actix_web::rt::spawn(async move {
            messaging::victory(&*chat, &stake, &gloat, &console)
                .await
                .unwrap_or_else(|e| log::warn!("result notification failed: {}", e));
        });
        log::info!(
            "{} beat {} with {}",
            winner.name,
            loser.name,
            victory.winning_move
        );
        Ok(Played::Win {
            winner: winner.name,
            loser: loser.name,
        })
    }
}
