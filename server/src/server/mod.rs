pub mod cleanup;
pub mod codes;
pub mod game_ops;
pub mod http;
pub mod router;
pub mod run;
pub mod session;
pub mod state;
pub mod ws;

// Export commonly used types and functions
pub use run::{build_router, run_server};
pub use session::JoinError;
pub use state::{create_room, AppState, PlayerBinding, Registry, RegistryError, Room, SessionId};
