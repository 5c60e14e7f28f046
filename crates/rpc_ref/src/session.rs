//! Session lifecycle around the reference store.
//!
//! Each connected client owns exactly one [`RefStore`]. The store is created
//! when the session connects, reset when the enclosing processing context is
//! superseded (document edited, server state rebuilt), and dropped when the
//! session disconnects. Requests reach the store through a generation guard
//! so that tokens minted against an earlier epoch fail loudly instead of
//! resolving against the wrong state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{Error, RefStore, Result};

/// Identity of one client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
	fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// One client connection's reference store plus its identity.
///
/// Created by [`SessionManager::connect`]. Handlers that receive a request
/// stamped with a generation reach the store through
/// [`guard`](Self::guard); handlers minting fresh references may use
/// [`store`](Self::store) directly.
pub struct RpcSession {
	id: SessionId,
	store: RefStore,
}

impl RpcSession {
	fn new() -> Self {
		Self {
			id: SessionId::new(),
			store: RefStore::new(),
		}
	}

	/// This session's identity.
	#[must_use]
	pub fn id(&self) -> SessionId {
		self.id
	}

	/// Direct access to the reference store.
	#[must_use]
	pub fn store(&self) -> &RefStore {
		&self.store
	}

	/// Returns the store if `generation` is still current.
	///
	/// `generation` is the epoch the client stamped on its request. A
	/// mismatch means every token in the request predates a reset, so the
	/// request fails as a whole before any handle lookup.
	///
	/// # Errors
	///
	/// [`Error::StaleGeneration`] when the store has been reset since the
	/// request was built.
	pub fn guard(&self, generation: u64) -> Result<&RefStore> {
		let current = self.store.generation();
		if generation != current {
			debug!(
				session = %self.id,
				requested = generation,
				current,
				"rejecting request against stale generation"
			);
			return Err(Error::StaleGeneration {
				requested: generation,
				current,
			});
		}
		Ok(&self.store)
	}

	/// Drops every outstanding reference and advances the generation.
	pub fn invalidate(&self) {
		self.store.reset();
	}
}

/// Tracks the live RPC sessions of one server process.
///
/// Sessions run independently; each owns its store and there is no shared
/// mutable state between them beyond this map.
pub struct SessionManager {
	sessions: RwLock<HashMap<SessionId, Arc<RpcSession>>>,
}

impl SessionManager {
	/// Creates a manager with no connected sessions.
	#[must_use]
	pub fn new() -> Self {
		Self {
			sessions: RwLock::new(HashMap::new()),
		}
	}

	/// Opens a new session with a fresh store.
	pub fn connect(&self) -> Arc<RpcSession> {
		let session = Arc::new(RpcSession::new());
		self.sessions
			.write()
			.insert(session.id, Arc::clone(&session));
		info!(session = %session.id, "RPC session connected");
		session
	}

	/// Looks up a connected session.
	///
	/// # Errors
	///
	/// [`Error::UnknownSession`] if `id` never connected or has since
	/// disconnected; the client must reconnect and re-fetch its references.
	pub fn get(&self, id: SessionId) -> Result<Arc<RpcSession>> {
		self.sessions
			.read()
			.get(&id)
			.cloned()
			.ok_or(Error::UnknownSession { session: id })
	}

	/// Closes a session, dropping its store and every value it owns.
	///
	/// Returns `false` if the session was not connected.
	pub fn disconnect(&self, id: SessionId) -> bool {
		let removed = self.sessions.write().remove(&id).is_some();
		if removed {
			info!(session = %id, "RPC session disconnected");
		}
		removed
	}

	/// Invalidates every session's store.
	///
	/// The sole external trigger for generation advancement: called by the
	/// context manager whenever the state all references point into is
	/// rebuilt.
	pub fn invalidate_all(&self) {
		let sessions = self.sessions.read();
		debug!(count = sessions.len(), "invalidating all RPC sessions");
		for session in sessions.values() {
			session.invalidate();
		}
	}

	/// Number of connected sessions.
	#[must_use]
	pub fn active_count(&self) -> usize {
		self.sessions.read().len()
	}
}

impl Default for SessionManager {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn connect_get_disconnect() {
		let manager = SessionManager::new();
		assert_eq!(manager.active_count(), 0);

		let session = manager.connect();
		assert_eq!(manager.active_count(), 1);
		let found = manager.get(session.id()).unwrap();
		assert!(Arc::ptr_eq(&session, &found));

		assert!(manager.disconnect(session.id()));
		assert!(!manager.disconnect(session.id()));
		assert_eq!(
			manager.get(session.id()).err(),
			Some(Error::UnknownSession {
				session: session.id()
			})
		);
	}

	#[test]
	fn guard_rejects_superseded_generations() {
		let manager = SessionManager::new();
		let session = manager.connect();

		let generation = session.store().generation();
		assert!(session.guard(generation).is_ok());

		session.invalidate();
		assert_eq!(
			session.guard(generation).err(),
			Some(Error::StaleGeneration {
				requested: generation,
				current: generation + 1,
			})
		);
		assert!(session.guard(generation + 1).is_ok());
	}

	#[test]
	fn invalidate_all_resets_every_store() {
		let manager = SessionManager::new();
		let a = manager.connect();
		let b = manager.connect();

		a.store().allocate("Test.Str", Arc::new("a".to_owned()));
		b.store().allocate("Test.Str", Arc::new("b".to_owned()));

		manager.invalidate_all();

		assert!(a.store().is_empty());
		assert!(b.store().is_empty());
		assert_eq!(a.store().generation(), 2);
		assert_eq!(b.store().generation(), 2);
	}

	#[test]
	fn sessions_get_distinct_identities() {
		let manager = SessionManager::new();
		assert_ne!(manager.connect().id(), manager.connect().id());
	}
}
