//! Session-scoped opaque reference registry for RPC boundaries.
//!
//! A language server holds compiler artifacts (expression trees, elaboration
//! contexts, scope tables, diagnostic message trees) that are too large or
//! too cyclic to serialize every time an editor points at one. This crate
//! lets such a value stay in server memory while the client carries a small
//! serializable token standing in for it:
//!
//! * [`RefStore`]: the per-session table mapping opaque handles to owned,
//!   type-tagged values.
//! * [`RpcPayload`] and [`RpcRef`]: the generic encode/decode pair giving any
//!   domain type pass-by-reference semantics without per-type marshalling
//!   code. Onboarding a new type is one `impl RpcPayload` block.
//! * [`RpcSession`] and [`SessionManager`]: store lifecycle, connection
//!   identity, and the generation guard that invalidates every outstanding
//!   token at once when the enclosing processing context is superseded.
//!
//! Tokens never carry payloads. A token is valid strictly between the
//! `encode` call that minted it and the next [`RefStore::reset`] of the same
//! store; after that, decoding fails instead of resolving to a wrong value.

#![warn(missing_docs)]

mod reference;
mod session;
mod store;
mod token;

pub use reference::{RpcPayload, RpcRef};
pub use session::{RpcSession, SessionId, SessionManager};
pub use store::RefStore;
pub use token::RefToken;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible failures when resolving a reference.
///
/// None of these are retried or recovered locally; they propagate to the
/// request handler, which turns them into a client-visible protocol error.
/// No variant is fatal to the server process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The handle does not exist in the current store. Either the token was
	/// minted before the store was reset, or it was fabricated or corrupted.
	#[error("unknown reference handle {handle}")]
	UnknownHandle {
		/// The handle the client presented.
		handle: u64,
	},
	/// The handle exists but was registered under a different type tag.
	#[error("reference {handle} holds a `{found}`, expected `{expected}`")]
	TypeMismatch {
		/// The handle the client presented.
		handle: u64,
		/// The tag the caller asked to decode as.
		expected: String,
		/// The tag the entry was stored under.
		found: String,
	},
	/// The request was built against a superseded store generation.
	///
	/// The client should re-fetch fresh references rather than retry the
	/// same tokens.
	#[error("stale generation {requested}, store is at generation {current}")]
	StaleGeneration {
		/// The generation stamped on the request envelope.
		requested: u64,
		/// The store's current generation.
		current: u64,
	},
	/// The session id is not, or no longer, connected.
	#[error("unknown RPC session {session}")]
	UnknownSession {
		/// The session id the client presented.
		session: SessionId,
	},
}
