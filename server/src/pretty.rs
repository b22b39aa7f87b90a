//! Human-readable console lines for lifecycle events. Color is applied only
//! when the caller says the output is a terminal.

use owo_colors::OwoColorize;

use crate::server::SessionId;

pub fn format_connect(session: SessionId, color: bool) -> String {
    if color {
        format!("{} session {}", "[CONNECT]".bold().green(), session.bold())
    } else {
        format!("[CONNECT] session {session}")
    }
}

pub fn format_join(name: &str, room: &str, reconnected: bool, color: bool) -> String {
    let tag = if reconnected { "[REJOIN]" } else { "[JOIN]" };
    if color {
        format!("{} {} -> {}", tag.bold().cyan(), name.bold(), room.bold())
    } else {
        format!("{tag} {name} -> {room}")
    }
}

pub fn format_disconnect(name: &str, room: &str, color: bool) -> String {
    if color {
        format!("{} {} left {}", "[LEAVE]".bold().red(), name.bold(), room.bold())
    } else {
        format!("[LEAVE] {name} left {room}")
    }
}
