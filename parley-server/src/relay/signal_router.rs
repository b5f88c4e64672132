use crate::relay::relay_command::TimerEvent;
use crate::relay::Relay;
use parley_core::{ConnectionId, ServerEvent, UserId};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

impl Relay {
    /// Resolves a `to` field to an open connection.
    ///
    /// Stable ids are tried first; anything else is taken as a live id. A
    /// binding whose connection already closed counts as unresolved.
    pub(crate) fn resolve(&self, to: &str) -> Option<ConnectionId> {
        self.identities
            .resolve(&UserId::from(to))
            .filter(|conn| self.open.contains(conn))
            .or_else(|| {
                to.parse::<ConnectionId>()
                    .ok()
                    .filter(|conn| self.open.contains(conn))
            })
    }

    /// Forwards an offer, answer or end-call. Unresolvable targets are dropped.
    pub(crate) async fn route(&self, from: ConnectionId, to: &str, event: ServerEvent) {
        match self.resolve(to) {
            Some(target) => {
                debug!("{} from {} -> {}", event.name(), from, target);
                self.emit(target, event).await;
            }
            None => warn!(
                "Dropping {} from {}: no live connection for '{}'",
                event.name(),
                from,
                to
            ),
        }
    }

    /// Forwards a candidate, or queues it until the target registers.
    pub(crate) async fn route_candidate(
        &mut self,
        from: ConnectionId,
        to: String,
        candidate: Value,
    ) {
        if let Some(target) = self.resolve(&to) {
            debug!("ice-candidate from {} -> {}", from, target);
            self.emit(target, ServerEvent::IceCandidate { candidate, from }).await;
            return;
        }

        let target = UserId::from(to);
        let armed = self.pending.enqueue(target.clone(), candidate, from, Instant::now());
        debug!(
            "Queued ice-candidate from {} for unregistered {} ({} waiting)",
            from,
            target,
            self.pending.queued_for(&target)
        );

        if let Some(generation) = armed {
            self.schedule(
                self.config.candidate_ttl,
                TimerEvent::PurgeCandidates { target, generation },
            );
        }
    }

    /// Fans a translation payload out to every other member of the sender's rooms.
    pub(crate) async fn broadcast_translation(&self, from: ConnectionId, payload: Value) {
        let peers = self.rooms.peers_of(&from);
        if peers.is_empty() {
            debug!("new-translation from {} has no audience", from);
            return;
        }

        self.emit_all(peers, &ServerEvent::NewTranslation(payload)).await;
    }
}
