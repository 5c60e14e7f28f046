//! Typed adapter over the erased reference store.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, RefStore, RefToken, Result};

/// Implemented by domain types that cross the RPC boundary by reference.
///
/// The tag is the only per-type code a new domain type needs. It must be a
/// fully-qualified dotted name, unique across the whole system, because the
/// store is type-erased and disambiguates entries by tag alone. The store
/// additionally asserts tag/type consistency in debug builds.
pub trait RpcPayload: Send + Sync + 'static {
	/// Globally unique qualified name for this type, e.g. `Opal.Expr`.
	const TYPE_TAG: &'static str;
}

/// Typed wire reference to a server-owned `T`.
///
/// Serializes exactly as its underlying [`RefToken`], so protocol structs
/// can declare a field as "a reference to a `T`" and let the transport
/// treat it like any other structured value.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct RpcRef<T> {
	token: RefToken,
	#[serde(skip)]
	_marker: PhantomData<fn() -> T>,
}

impl<T: RpcPayload> RpcRef<T> {
	/// Stores `value` and mints a token standing in for it.
	///
	/// The store owns the value until its next [`RefStore::reset`]; the
	/// returned reference is only meaningful against that same store.
	pub fn encode(store: &RefStore, value: Arc<T>) -> Self {
		let handle = store.allocate(T::TYPE_TAG, value);
		Self::from_token(RefToken::new(handle, T::TYPE_TAG))
	}

	/// Resolves the reference back to the value it was minted for.
	///
	/// Propagates store errors verbatim; the adapter adds no failure modes
	/// of its own.
	///
	/// # Errors
	///
	/// [`Error::TypeMismatch`] when the token does not refer to a `T`,
	/// [`Error::UnknownHandle`] when the handle is absent from the store
	/// (fabricated, or minted before a reset).
	pub fn decode(&self, store: &RefStore) -> Result<Arc<T>> {
		if self.token.type_tag != T::TYPE_TAG {
			return Err(self.mismatch());
		}
		let value = store.resolve(self.token.handle, T::TYPE_TAG)?;
		// Only reachable if two Rust types share a tag; the store
		// debug-asserts against that.
		value.downcast::<T>().map_err(|_| self.mismatch())
	}

	fn mismatch(&self) -> Error {
		Error::TypeMismatch {
			handle: self.token.handle,
			expected: T::TYPE_TAG.to_owned(),
			found: self.token.type_tag.clone(),
		}
	}
}

impl<T> RpcRef<T> {
	/// Wraps an already-received wire token without validating it.
	///
	/// Validation happens at [`decode`](Self::decode) time.
	#[must_use]
	pub fn from_token(token: RefToken) -> Self {
		Self {
			token,
			_marker: PhantomData,
		}
	}

	/// The underlying wire token.
	#[must_use]
	pub fn token(&self) -> &RefToken {
		&self.token
	}
}

impl<T> Clone for RpcRef<T> {
	fn clone(&self) -> Self {
		Self {
			token: self.token.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T> PartialEq for RpcRef<T> {
	fn eq(&self, other: &Self) -> bool {
		self.token == other.token
	}
}

impl<T> Eq for RpcRef<T> {}

impl<T> fmt::Debug for RpcRef<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RpcRef").field(&self.token).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug, PartialEq)]
	struct Snapshot(&'static str);

	impl RpcPayload for Snapshot {
		const TYPE_TAG: &'static str = "Test.Snapshot";
	}

	#[derive(Debug, PartialEq)]
	struct Report(u32);

	impl RpcPayload for Report {
		const TYPE_TAG: &'static str = "Test.Report";
	}

	#[test]
	fn typed_round_trip_is_identity() {
		let store = RefStore::new();
		let value = Arc::new(Snapshot("state"));

		let reference = RpcRef::encode(&store, Arc::clone(&value));
		let decoded = reference.decode(&store).unwrap();
		assert!(Arc::ptr_eq(&value, &decoded));
		assert_eq!(decoded.0, "state");
	}

	#[test]
	fn decoding_as_a_different_type_fails() {
		let store = RefStore::new();
		let reference = RpcRef::encode(&store, Arc::new(Snapshot("state")));

		let foreign: RpcRef<Report> = RpcRef::from_token(reference.token().clone());
		assert_eq!(
			foreign.decode(&store),
			Err(Error::TypeMismatch {
				handle: reference.token().handle,
				expected: "Test.Report".to_owned(),
				found: "Test.Snapshot".to_owned(),
			})
		);
	}

	#[test]
	fn doctored_tag_is_rejected_before_lookup() {
		let store = RefStore::new();
		let reference = RpcRef::encode(&store, Arc::new(Snapshot("state")));

		let mut token = reference.token().clone();
		token.type_tag = "Test.Report".to_owned();
		let doctored: RpcRef<Snapshot> = RpcRef::from_token(token);

		assert!(matches!(
			doctored.decode(&store),
			Err(Error::TypeMismatch { .. })
		));
	}

	#[test]
	fn serializes_transparently_as_its_token() {
		let store = RefStore::new();
		let reference = RpcRef::encode(&store, Arc::new(Report(7)));

		let json = serde_json::to_value(&reference).unwrap();
		assert_eq!(json, serde_json::to_value(reference.token()).unwrap());

		let back: RpcRef<Report> = serde_json::from_value(json).unwrap();
		assert_eq!(back.decode(&store).unwrap().0, 7);
	}
}
