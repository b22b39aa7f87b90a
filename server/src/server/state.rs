// Server state management: AppState, the room registry and the session
// table. The single registry write lock is what serializes the inbound
// event path; only the self-validating timers run outside it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::game::Game;
use fishy_shared::{PlayerId, ServerMsg};

/// Ephemeral identifier of one live transport connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Unreachable while the code generator honors its contract; treated as
    /// an invariant violation, not a user-facing error.
    #[error("room code {0} already registered")]
    DuplicateRoom(String),
}

/// Binds a live session to a stable player identity. At most one per
/// session id; rebinding overwrites.
#[derive(Clone, Debug)]
pub struct PlayerBinding {
    pub player_id: PlayerId,
    pub room_code: String,
    pub name: String,
}

/// One registered room: the code, the game-engine handle and bookkeeping.
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub game: Game,
    pub created_at: SystemTime,
}

impl Room {
    pub fn new(code: String) -> Self {
        Room {
            code,
            game: Game::new(),
            created_at: SystemTime::now(),
        }
    }
}

/// Bindings plus per-session outboxes. Delivery helpers live in router.rs.
#[derive(Debug, Default)]
pub struct SessionTable {
    pub(crate) bindings: HashMap<SessionId, PlayerBinding>,
    pub(crate) outboxes: HashMap<SessionId, UnboundedSender<ServerMsg>>,
}

/// The process-wide store. Owned by `AppState` and passed into handlers so
/// tests get isolated instances.
#[derive(Debug, Default)]
pub struct Registry {
    pub rooms: HashMap<String, Room>,
    pub sessions: SessionTable,
}

impl Registry {
    pub fn insert_room(&mut self, room: Room) -> Result<(), RegistryError> {
        if self.rooms.contains_key(&room.code) {
            return Err(RegistryError::DuplicateRoom(room.code.clone()));
        }
        self.rooms.insert(room.code.clone(), room);
        Ok(())
    }

    pub fn room(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    /// Idempotent: removing an absent code is a no-op.
    pub fn remove_room(&mut self, code: &str) {
        self.rooms.remove(code);
    }
}

/// Shared application state exposed to handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
    /// In-memory shared Config instance, authoritative for the running
    /// server.
    pub config: Arc<RwLock<Config>>,
    /// Path of the TOML config file, when the server was started from one.
    pub config_path: Option<PathBuf>,
    next_session: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        AppState {
            registry: Arc::new(RwLock::new(Registry::default())),
            config: Arc::new(RwLock::new(config)),
            config_path,
            next_session: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn allocate_session_id(&self) -> SessionId {
        SessionId(self.next_session.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub async fn cleanup_grace(&self) -> Duration {
        self.config.read().await.cleanup_grace()
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(Config::default(), None)
    }
}

/// Register a fresh room under a newly generated unique code.
pub async fn create_room(state: &AppState) -> Result<String> {
    let mut reg = state.registry.write().await;
    let code = super::codes::generate_room_code(&reg.rooms);
    reg.insert_room(Room::new(code.clone()))
        .context("registering freshly generated room code")?;
    tracing::info!(room = %code, "room created");
    Ok(code)
}
