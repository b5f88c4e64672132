use parley_core::{ConnectionId, UserId};
use serde_json::Value;
use std::collections::HashMap;
use tokio::time::Instant;

/// An ICE candidate waiting for its target to register.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCandidate {
    pub candidate: Value,
    pub from: ConnectionId,
    pub enqueued_at: Instant,
}

#[derive(Debug)]
struct CandidateQueue {
    generation: u64,
    entries: Vec<PendingCandidate>,
}

/// Buffers candidates addressed to stable ids that have no live connection yet.
///
/// Each queue carries the generation of the purge timer armed when it was
/// created. A purge only drops the queue with a matching generation, so a
/// timer left over from an already flushed queue never touches a newer one.
#[derive(Debug, Default)]
pub struct PendingCandidates {
    queues: HashMap<UserId, CandidateQueue>,
    next_generation: u64,
}

impl PendingCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the target's queue.
    ///
    /// Returns `Some(generation)` when the queue was created by this call and
    /// the caller has to arm a purge timer for it.
    pub fn enqueue(
        &mut self,
        target: UserId,
        candidate: Value,
        from: ConnectionId,
        now: Instant,
    ) -> Option<u64> {
        let entry = PendingCandidate {
            candidate,
            from,
            enqueued_at: now,
        };

        if let Some(queue) = self.queues.get_mut(&target) {
            queue.entries.push(entry);
            return None;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.queues.insert(
            target,
            CandidateQueue {
                generation,
                entries: vec![entry],
            },
        );
        Some(generation)
    }

    /// Removes and returns everything queued for `target`, oldest first.
    pub fn flush(&mut self, target: &UserId) -> Vec<PendingCandidate> {
        self.queues
            .remove(target)
            .map(|queue| queue.entries)
            .unwrap_or_default()
    }

    /// Drops the queue armed with `generation`. Returns how many entries were dropped.
    pub fn purge(&mut self, target: &UserId, generation: u64) -> usize {
        match self.queues.get(target) {
            Some(queue) if queue.generation == generation => self
                .queues
                .remove(target)
                .map(|queue| queue.entries.len())
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn queued_for(&self, target: &UserId) -> usize {
        self.queues.get(target).map_or(0, |queue| queue.entries.len())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
