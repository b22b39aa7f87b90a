//! Message delivery over the session table: unicast to one live session,
//! roomcast to every session bound to a room, and the reverse lookup from
//! player identity to live session.

use tokio::sync::mpsc::UnboundedSender;

use fishy_shared::{PlayerId, ServerMsg};

use super::state::{PlayerBinding, SessionId, SessionTable};

impl SessionTable {
    pub fn register(&mut self, session: SessionId, outbox: UnboundedSender<ServerMsg>) {
        self.outboxes.insert(session, outbox);
    }

    pub fn unregister(&mut self, session: SessionId) {
        self.outboxes.remove(&session);
    }

    /// Overwrites any previous binding for this session.
    pub fn bind(&mut self, session: SessionId, binding: PlayerBinding) {
        self.bindings.insert(session, binding);
    }

    pub fn unbind(&mut self, session: SessionId) -> Option<PlayerBinding> {
        self.bindings.remove(&session)
    }

    pub fn binding(&self, session: SessionId) -> Option<&PlayerBinding> {
        self.bindings.get(&session)
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Deliver to one session. Unresolvable or closed targets are dropped
    /// silently; the caller never learns, by design of the delivery layer.
    pub fn unicast(&self, session: SessionId, msg: ServerMsg) {
        if let Some(tx) = self.outboxes.get(&session) {
            let _ = tx.send(msg);
        }
    }

    /// Deliver to every session currently bound to `room_code`.
    pub fn roomcast(&self, room_code: &str, msg: &ServerMsg) {
        for (session, binding) in &self.bindings {
            if binding.room_code == room_code {
                if let Some(tx) = self.outboxes.get(session) {
                    let _ = tx.send(msg.clone());
                }
            }
        }
    }

    /// Reverse lookup: the live session of a player in a room, if any.
    pub fn resolve_session(&self, player_id: PlayerId, room_code: &str) -> Option<SessionId> {
        self.bindings
            .iter()
            .find(|(_, b)| b.player_id == player_id && b.room_code == room_code)
            .map(|(session, _)| *session)
    }
}
