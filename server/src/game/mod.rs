//! The game-engine collaborator: gameplay rules, roles, rounds and scoring
//! for a single room. The session core only consumes the player set, the
//! connection flags and the `GameState`; everything else stays behind this
//! module boundary.

mod guessing;
mod results;
mod rounds;

pub use rounds::ROUND_INTERMISSION;

use std::collections::BTreeMap;
use std::time::SystemTime;

use thiserror::Error;

use fishy_shared::{GameStateView, GameStatus, PlayerId, PlayerPublic, PlayerStats, PlayerView, Role};

/// Minimum connected players needed to start and to keep a game running.
pub const MIN_PLAYERS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Need at least 3 players to start")]
    NotEnoughPlayers,
    #[error("Game has already started")]
    AlreadyStarted,
    #[error("Game is not in progress")]
    NotInProgress,
    #[error("Only the current guesser can make a guess")]
    NotGuesser,
    #[error("Unknown player")]
    UnknownPlayer,
    #[error("You cannot guess yourself")]
    SelfGuess,
    #[error("{0} has already been guessed")]
    AlreadyGuessed(String),
}

/// A player record owned by the engine. The record outlives the transport
/// session: disconnection only flips the flag, so the identity can be
/// reclaimed by a later reconnect.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub role: Option<Role>,
    pub has_been_guessed: bool,
    pub is_disconnected: bool,
    pub disconnected_at: Option<SystemTime>,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Player {
            id,
            name,
            points: 0,
            role: None,
            has_been_guessed: false,
            is_disconnected: false,
            disconnected_at: None,
            stats: PlayerStats::default(),
        }
    }

    pub fn public(&self) -> PlayerPublic {
        PlayerPublic {
            id: self.id,
            name: self.name.clone(),
            points: self.points,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GameState {
    pub status: GameStatus,
    pub current_round: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Game {
    /// Ordered by join; ids are positions + 1 and are never reused.
    pub players: Vec<Player>,
    pub state: GameState,
    pub(crate) question: Option<&'static rounds::QuestionCard>,
}

impl Game {
    pub fn new() -> Self {
        Game::default()
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    /// The id the next joining player gets. Count-plus-one is safe only
    /// because no removal path exists; see DESIGN.md.
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId(self.players.len() + 1)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Case-insensitive name match, the room-scoped identity rule.
    pub fn find_player_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.to_lowercase();
        self.players.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn connected_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_disconnected).count()
    }

    pub fn disconnected_names(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.is_disconnected)
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn mark_disconnected(&mut self, id: PlayerId, at: SystemTime) {
        if let Some(p) = self.player_mut(id) {
            p.is_disconnected = true;
            p.disconnected_at = Some(at);
        }
    }

    pub fn mark_reconnected(&mut self, id: PlayerId) {
        if let Some(p) = self.player_mut(id) {
            p.is_disconnected = false;
            p.disconnected_at = None;
        }
    }

    pub fn current_guesser(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.role == Some(Role::Guesser))
    }

    /// Personalized snapshot: the viewer sees their own role; the answer is
    /// withheld from the guesser.
    pub fn player_state(&self, viewer: PlayerId) -> GameStateView {
        let viewer_role = self.player(viewer).and_then(|p| p.role);
        let players: BTreeMap<PlayerId, PlayerView> = self
            .players
            .iter()
            .map(|p| {
                (
                    p.id,
                    PlayerView {
                        id: p.id,
                        name: p.name.clone(),
                        points: p.points,
                        role: if p.id == viewer { p.role } else { None },
                        has_been_guessed: p.has_been_guessed,
                        is_disconnected: p.is_disconnected,
                    },
                )
            })
            .collect();
        let answer = match viewer_role {
            Some(Role::TruthTeller) | Some(Role::Liar) => {
                self.question.map(|q| q.answer.to_string())
            }
            _ => None,
        };
        GameStateView {
            player_id: viewer,
            status: self.state.status,
            current_round: self.state.current_round,
            players,
            question: self.question.map(|q| q.text.to_string()),
            answer,
            next_guesser: None,
        }
    }

    /// Keep the roster, wipe everything a finished game accumulated.
    pub fn reset_for_restart(&mut self) {
        for p in &mut self.players {
            p.points = 0;
            p.role = None;
            p.has_been_guessed = false;
            p.stats = PlayerStats::default();
        }
        self.state = GameState::default();
        self.question = None;
    }
}
