use super::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Shared handle to a single game. The mutex serializes every
/// mutation on that game across concurrently arriving requests.
pub type Handle = Arc<Mutex<Game>>;

/// Process-wide table of active games, keyed by the deterministic id
/// of the participant pair. One instance exists per running system;
/// it is constructed once at startup and injected wherever needed.
///
/// A game is present exactly while it is ongoing: insertion requires
/// the id to be absent, and [`Registry::remove`] is the only path out,
/// ending the game as it leaves. Check-and-insert is atomic under the
/// table's write lock.
pub struct Registry {
    games: RwLock<HashMap<String, Handle>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }
}

impl Registry {
    /// Deterministic, order-independent id for a pair of users.
    pub fn id(a: &str, b: &str) -> String {
        let mut pair = [a, b];
        pair.sort();
        pair.join("-")
    }

    /// Looks up the game for an id. A miss is not an error; absent
    /// and ended-and-removed look the same to the caller.
    pub async fn lookup(&self, id: &str) -> Option<Handle> {
        self.games.read().await.get(id).cloned()
    }

    /// Opens a new game with the initiator as sole participant.
    /// An occupied id is a programming-invariant violation, since
    /// callers always look up before creating.
    pub async fn create(&self, id: &str, initiator: &str) -> anyhow::Result<Handle> {
        match self.games.write().await.entry(id.to_string()) {
            Entry::Occupied(_) => Err(anyhow::anyhow!("a game already exists for this id: {}", id)),
            Entry::Vacant(slot) => Ok(slot
                .insert(Arc::new(Mutex::new(Game::new(id, initiator))))
                .clone())
            .inspect(|_| log::info!("opened game {}", id)),
        }
    }

    /// Ends a game and deletes its entry, freeing the id for a fresh
    /// create. The entry is taken out under the write lock; the game
    /// itself is ended after the lock is released, so a caller never
    /// holds the registry and a game lock at once.
    pub async fn remove(&self, id: &str) {
        let game = self.games.write().await.remove(id);
        match game {
            Some(game) => {
                game.lock().await.end();
                log::info!("closed game {}", id);
            }
            None => log::warn!("no game to close for id {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_order_independent() {
        assert!(Registry::id("def", "abc") == "abc-def");
        assert!(Registry::id("abc", "def") == Registry::id("def", "abc"));
    }

    #[tokio::test]
    async fn create_then_lookup_finds_the_game() {
        let registry = Registry::default();
        let created = registry.create("gameId", "userId").await.unwrap();
        let found = registry.lookup("gameId").await.unwrap();
        assert!(Arc::ptr_eq(&created, &found));
    }

    #[tokio::test]
    async fn create_refuses_an_occupied_id() {
        let registry = Registry::default();
        let first = registry.create("gameId", "userId").await.unwrap();
        assert!(registry.create("gameId", "otherUserId").await.is_err());
        let found = registry.lookup("gameId").await.unwrap();
        assert!(Arc::ptr_eq(&first, &found));
        assert!(found.lock().await.users() == ["userId".to_string()]);
    }

    #[tokio::test]
    async fn remove_ends_the_game_and_frees_the_id() {
        let registry = Registry::default();
        let game = registry.create("gameId", "userId").await.unwrap();
        registry.remove("gameId").await;
        assert!(registry.lookup("gameId").await.is_none());
        assert!(game.lock().await.status() == Status::Ended);
        assert!(registry.create("gameId", "otherUserId").await.is_ok());
    }

    #[tokio::test]
    async fn lookup_misses_unknown_ids() {
        let registry = Registry::default();
        assert!(registry.lookup("nowhere").await.is_none());
    }
}
