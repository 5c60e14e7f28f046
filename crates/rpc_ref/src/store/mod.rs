//! The per-session reference registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{Error, Result};

/// One stored value together with the tag it was registered under.
struct Entry {
	type_tag: &'static str,
	value: Arc<dyn Any + Send + Sync>,
}

/// Store state consolidated under a single lock so that a `reset` racing an
/// in-flight `resolve` can never observe a partially cleared entry map.
struct StoreState {
	entries: HashMap<u64, Entry>,
	/// Tags already seen, with the Rust type each was first used for. One
	/// tag naming two distinct types would make tag checking blind, so the
	/// pairing is asserted in debug builds.
	tag_types: HashMap<&'static str, TypeId>,
	next_handle: u64,
	generation: u64,
}

/// Owning table mapping opaque handles to type-tagged values for one
/// session/processing context.
///
/// Handles are allocated monotonically and never rewound, not even across
/// [`reset`](Self::reset). A handle minted under a superseded generation can
/// therefore never collide with a live entry, and resolving it reports
/// [`Error::UnknownHandle`] rather than a wrong value.
///
/// All operations are in-memory and non-blocking apart from the internal
/// lock; `allocate` and `reset` take it for writing, `resolve` for reading,
/// so concurrent `allocate` calls never collide on a handle.
pub struct RefStore {
	state: RwLock<StoreState>,
}

impl RefStore {
	/// Creates an empty store at generation 1.
	#[must_use]
	pub fn new() -> Self {
		Self {
			state: RwLock::new(StoreState {
				entries: HashMap::new(),
				tag_types: HashMap::new(),
				next_handle: 0,
				generation: 1,
			}),
		}
	}

	/// Inserts `value` under a freshly allocated handle.
	///
	/// The store owns the value until the next [`reset`](Self::reset);
	/// entries are never deleted individually.
	pub fn allocate(&self, type_tag: &'static str, value: Arc<dyn Any + Send + Sync>) -> u64 {
		let type_id = (*value).type_id();
		let mut state = self.state.write();

		let prior = *state.tag_types.entry(type_tag).or_insert(type_id);
		debug_assert_eq!(
			prior, type_id,
			"type tag `{type_tag}` reused for a distinct type"
		);

		let handle = state.next_handle;
		state.next_handle += 1;
		state.entries.insert(handle, Entry { type_tag, value });
		trace!(handle, type_tag, "allocated reference");
		handle
	}

	/// Looks up `handle`, checking that it was stored under `expected_tag`.
	///
	/// The returned [`Arc`] is a shared snapshot; ownership stays with the
	/// store. Callers must resolve anew for each use rather than cache the
	/// value across a generation boundary.
	///
	/// # Errors
	///
	/// [`Error::UnknownHandle`] if the handle is absent (fabricated, or
	/// minted before a reset), [`Error::TypeMismatch`] if the stored tag
	/// differs from `expected_tag`.
	pub fn resolve(&self, handle: u64, expected_tag: &str) -> Result<Arc<dyn Any + Send + Sync>> {
		let state = self.state.read();
		let entry = state
			.entries
			.get(&handle)
			.ok_or(Error::UnknownHandle { handle })?;
		if entry.type_tag != expected_tag {
			return Err(Error::TypeMismatch {
				handle,
				expected: expected_tag.to_owned(),
				found: entry.type_tag.to_owned(),
			});
		}
		Ok(Arc::clone(&entry.value))
	}

	/// Drops every entry and advances the generation.
	///
	/// Called when the processing context this store belongs to ends or is
	/// superseded. Every token minted so far becomes permanently invalid.
	pub fn reset(&self) {
		let mut state = self.state.write();
		let dropped = state.entries.len();
		state.entries.clear();
		state.generation += 1;
		debug!(generation = state.generation, dropped, "reset reference store");
	}

	/// The current generation. Starts at 1 and increments on every
	/// [`reset`](Self::reset).
	#[must_use]
	pub fn generation(&self) -> u64 {
		self.state.read().generation
	}

	/// Number of live entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.state.read().entries.len()
	}

	/// Whether the store has no live entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.state.read().entries.is_empty()
	}
}

impl Default for RefStore {
	fn default() -> Self {
		Self::new()
	}
}
