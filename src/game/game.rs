use std::collections::HashMap;

/// A move in rock-paper-scissors. Wire representation is the
/// lowercase name, which is what the Slack button values carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Cyclic dominance: paper beats rock, rock beats scissors,
    /// scissors beats paper.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Paper, Move::Rock) | (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper)
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

impl std::str::FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(anyhow::anyhow!("unknown move: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Started,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("game ended")]
    GameEnded,
    #[error("no user in game")]
    NoUserInGame,
    #[error("game full")]
    GameFull,
    #[error("user already in game")]
    UserAlreadyInGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("game ended")]
    GameEnded,
    #[error("user already played move")]
    UserAlreadyPlayed,
    #[error("all players played")]
    AllPlayersPlayed,
    #[error("user not added")]
    UserNotAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("game ended")]
    GameEnded,
    #[error("not all users played")]
    NotAllUsersPlayed,
}

/// Winner, loser, and the move that decided it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    pub winner: String,
    pub loser: String,
    pub winning_move: Move,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Winner(Victory),
    Tie,
}

/// One rock-paper-scissors challenge between two users.
///
/// Created with the initiator as sole participant. The second user
/// joins, both submit a move, and the game resolves to a winner or a
/// tie. Ending the game is a separate explicit step so the caller can
/// notify and pay out before tearing it down; once ended, every
/// mutation is refused.
#[derive(Debug)]
pub struct Game {
    id: String,
    users: Vec<String>,
    moves: HashMap<String, Move>,
    status: Status,
}

impl Game {
    pub fn new(id: &str, initiator: &str) -> Self {
        Self {
            id: id.to_string(),
            users: vec![initiator.to_string()],
            moves: HashMap::new(),
            status: Status::Started,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn users(&self) -> &[String] {
        &self.users
    }
    pub fn status(&self) -> Status {
        self.status
    }
    fn is_ongoing(&self) -> bool {
        self.status == Status::Started
    }

    /// Adds the second participant.
    pub fn join(&mut self, user: &str) -> Result<(), JoinError> {
        if !self.is_ongoing() {
            return Err(JoinError::GameEnded);
        }
        if self.users.is_empty() {
            return Err(JoinError::NoUserInGame);
        }
        if self.users.len() > 1 {
            return Err(JoinError::GameFull);
        }
        if self.users[0] == user {
            return Err(JoinError::UserAlreadyInGame);
        }
        self.users.push(user.to_string());
        Ok(())
    }

    /// Records a participant's move. Exposes the full moves map on
    /// success; the caller counts entries to tell the first mover
    /// (keep waiting) from the second (resolve now).
    pub fn play(&mut self, user: &str, choice: Move) -> Result<&HashMap<String, Move>, PlayError> {
        if !self.is_ongoing() {
            return Err(PlayError::GameEnded);
        }
        if self.moves.contains_key(user) {
            return Err(PlayError::UserAlreadyPlayed);
        }
        if self.moves.len() > 1 {
            return Err(PlayError::AllPlayersPlayed);
        }
        if !self.users.iter().any(|u| u == user) {
            return Err(PlayError::UserNotAdded);
        }
        self.moves.insert(user.to_string(), choice);
        Ok(&self.moves)
    }

    /// Compares the two moves in participant order. Does not mutate
    /// status; ending the game is the caller's call.
    pub fn resolve(&self) -> Result<Resolution, ResolveError> {
        if !self.is_ongoing() {
            return Err(ResolveError::GameEnded);
        }
        if self.moves.len() < 2 {
            return Err(ResolveError::NotAllUsersPlayed);
        }
        let first = &self.users[0];
        let second = &self.users[1];
        let a = *self.moves.get(first).expect("both moves present");
        let b = *self.moves.get(second).expect("both moves present");
        if a == b {
            Ok(Resolution::Tie)
        } else if a.beats(b) {
            Ok(Resolution::Winner(Victory {
                winner: first.clone(),
                loser: second.clone(),
                winning_move: a,
            }))
        } else {
            Ok(Resolution::Winner(Victory {
                winner: second.clone(),
                loser: first.clone(),
                winning_move: b,
            }))
        }
    }

    /// Terminal and absorbing. No error on double-end.
    pub fn end(&mut self) {
        self.status = Status::Ended;
    }
}
