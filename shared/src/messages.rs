//! Client-server messaging protocol for the Super Fishy game.
//!
//! Events travel as `{"type": "...", "data": {...}}` envelopes; the `type`
//! names are part of the wire contract consumed by the browser client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{GameStatus, PlayerId, PlayerPublic, Role};

/// One player's entry in a state snapshot. `role` is only present for the
/// viewer's own entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub has_been_guessed: bool,
    pub is_disconnected: bool,
}

/// A personalized snapshot of a room's game state. The same payload serves
/// the waiting room (`game_state`), the in-progress view (`game_started`,
/// `game_state_update`) and round transitions (`new_round`); the event name
/// tells the client which screen to render.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameStateView {
    /// The receiving player's own id.
    pub player_id: PlayerId,
    pub status: GameStatus,
    pub current_round: u32,
    pub players: BTreeMap<PlayerId, PlayerView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Hidden from the guesser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_guesser: Option<String>,
}

/// Outcome of a single guess, broadcast to the whole room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessResult {
    pub guessed_player_id: PlayerId,
    pub guessed_player: String,
    pub was_truth_teller: bool,
    pub points_earned: u32,
    pub found_all_liars: bool,
    pub round_ended: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionSkipped {
    pub question: String,
    pub answer: String,
}

/// Cumulative per-player statistics, reported with the final results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub correct_guesses: u32,
    pub total_guesses: u32,
    pub times_as_liar: u32,
    pub times_caught: u32,
    pub times_survived: u32,
    pub rounds_played: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub rank: usize,
    pub name: String,
    pub points: u32,
    /// Guessing accuracy in percent.
    pub accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BestGuesser {
    pub name: String,
    pub correct_guesses: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BestLiar {
    pub name: String,
    pub successful_escapes: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Awards {
    pub best_guesser: BestGuesser,
    pub best_liar: BestLiar,
}

/// End-of-game summary broadcast as `game_over`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinalResults {
    pub rankings: Vec<PlayerRanking>,
    pub stats: BTreeMap<PlayerId, PlayerStats>,
    pub awards: Awards,
}

/// Messages that clients can send to the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMsg {
    JoinGame {
        room_code: String,
        name: String,
    },
    StartGame {
        room_code: String,
    },
    MakeGuess {
        room_code: String,
        guessed_player_id: PlayerId,
    },
    SkipQuestion {
        room_code: String,
    },
    RestartGame {
        room_code: String,
    },
}

/// Messages that the server can send to clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMsg {
    Connected {
        message: String,
    },
    Error {
        message: String,
    },
    PlayerJoined {
        player: PlayerPublic,
        message: String,
    },
    PlayerDisconnected {
        player_id: PlayerId,
        player_name: String,
        message: String,
    },
    PlayerReconnected {
        player_id: PlayerId,
        player_name: String,
        message: String,
    },
    GamePaused {
        message: String,
    },
    GameResumed {
        message: String,
    },
    /// Waiting-room snapshot.
    GameState(GameStateView),
    /// In-progress snapshot; tells the client to show the game interface.
    GameStarted(GameStateView),
    GameStateUpdate(GameStateView),
    NewRound(GameStateView),
    GuessResult(GuessResult),
    QuestionSkipped(QuestionSkipped),
    GameOver(FinalResults),
    GameRestarting,
    PlayerRejoined {
        player: PlayerPublic,
    },
    GameRestarted,
}
