//! Reference registrations for the artifact types.
//!
//! Each artifact crosses the RPC boundary by reference: the value stays in
//! the session's store and the client holds a token. Registering a type is
//! one impl block with its qualified dotted name; the names must stay
//! pairwise distinct, since the store tells types apart by tag alone.

use opal_rpc_ref::RpcPayload;

use crate::elab::{ElabContext, ElabInfo};
use crate::expr::Expr;
use crate::lctx::LocalContext;
use crate::message::MessageTree;

impl RpcPayload for Expr {
	const TYPE_TAG: &'static str = "Opal.Expr";
}

impl RpcPayload for LocalContext {
	const TYPE_TAG: &'static str = "Opal.LocalContext";
}

impl RpcPayload for ElabContext {
	const TYPE_TAG: &'static str = "Opal.Elab.Context";
}

impl RpcPayload for ElabInfo {
	const TYPE_TAG: &'static str = "Opal.Elab.Info";
}

impl RpcPayload for MessageTree {
	const TYPE_TAG: &'static str = "Opal.MessageTree";
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;
	use std::sync::Arc;

	use opal_rpc_ref::{Error, RefStore, RpcRef};

	use super::*;

	#[test]
	fn registered_tags_are_pairwise_distinct() {
		let tags = [
			Expr::TYPE_TAG,
			LocalContext::TYPE_TAG,
			ElabContext::TYPE_TAG,
			ElabInfo::TYPE_TAG,
			MessageTree::TYPE_TAG,
		];
		let unique: HashSet<&str> = tags.into_iter().collect();
		assert_eq!(unique.len(), tags.len());
	}

	#[test]
	fn artifacts_round_trip_through_the_store() {
		let store = RefStore::new();
		let expr = Arc::new(Expr::Const("Nat.succ".to_owned()));
		let message = Arc::new(MessageTree::text("unsolved goals"));

		let expr_ref = RpcRef::encode(&store, Arc::clone(&expr));
		let message_ref = RpcRef::encode(&store, Arc::clone(&message));
		assert_ne!(expr_ref.token().handle, message_ref.token().handle);

		assert!(Arc::ptr_eq(&expr_ref.decode(&store).unwrap(), &expr));
		assert!(Arc::ptr_eq(&message_ref.decode(&store).unwrap(), &message));
	}

	#[test]
	fn an_expr_reference_does_not_decode_as_a_message() {
		let store = RefStore::new();
		let expr_ref = RpcRef::encode(&store, Arc::new(Expr::BVar(0)));

		let as_message: RpcRef<MessageTree> = RpcRef::from_token(expr_ref.token().clone());
		assert!(matches!(
			as_message.decode(&store),
			Err(Error::TypeMismatch { .. })
		));
		// The mismatch does not invalidate the entry.
		assert!(expr_ref.decode(&store).is_ok());
	}

	#[test]
	fn reset_invalidates_artifact_references() {
		let store = RefStore::new();
		let lctx_ref = RpcRef::encode(&store, Arc::new(LocalContext::new()));

		store.reset();
		assert_eq!(
			lctx_ref.decode(&store).err(),
			Some(Error::UnknownHandle {
				handle: lctx_ref.token().handle
			})
		);
	}
}
