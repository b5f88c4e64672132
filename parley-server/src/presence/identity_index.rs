use parley_core::{ConnectionId, UserId};
use std::collections::HashMap;

/// Stable user id -> current live connection. Last registration wins.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    bindings: HashMap<UserId, ConnectionId>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite. Returns the previous binding, if any.
    pub fn bind(&mut self, uid: UserId, conn: ConnectionId) -> Option<ConnectionId> {
        self.bindings.insert(uid, conn)
    }

    pub fn resolve(&self, uid: &UserId) -> Option<ConnectionId> {
        self.bindings.get(uid).copied()
    }

    /// Removes the binding only while it still points at `expected`.
    ///
    /// A disconnect handler for an old connection must not erase the binding
    /// a faster reconnect already created. Returns whether anything was removed.
    pub fn unbind(&mut self, uid: &UserId, expected: &ConnectionId) -> bool {
        match self.bindings.get(uid) {
            Some(current) if current == expected => {
                self.bindings.remove(uid);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
