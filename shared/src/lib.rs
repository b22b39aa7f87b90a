//! Shared wire-protocol types for the Super Fishy game server.

pub mod messages;
pub mod player;

pub use messages::{
    Awards, BestGuesser, BestLiar, ClientMsg, FinalResults, GameStateView, GuessResult,
    PlayerRanking, PlayerStats, PlayerView, QuestionSkipped, ServerMsg,
};
pub use player::{GameStatus, PlayerId, PlayerPublic, Role};
