//! Protocol bodies that carry references.
//!
//! These are the positions where tokens appear in request and response
//! payloads: the transport serializes them like any other structured field,
//! and handlers that later receive them back decode against the session's
//! store.

use opal_rpc_ref::RpcRef;
use serde::{Deserialize, Serialize};

use crate::elab::{ElabContext, Span};
use crate::expr::Expr;
use crate::message::MessageTree;

/// One hypothesis line of an interactive goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hypothesis {
	/// Display names bound by this line.
	pub names: Vec<String>,
	/// The hypothesis type, held server-side.
	pub ty: RpcRef<Expr>,
}

/// A goal as rendered by the editor.
///
/// The editor re-submits the references it carries, e.g. to elaborate user
/// input against `ctx` or to pretty-print `target` at a different width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveGoal {
	/// Context needed to re-enter the elaborator at this position.
	pub ctx: RpcRef<ElabContext>,
	/// Hypotheses in scope, outermost first.
	pub hyps: Vec<Hypothesis>,
	/// The goal's target type.
	pub target: RpcRef<Expr>,
}

/// Severity of an interactive diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
	/// Informational output.
	Information,
	/// A warning.
	Warning,
	/// An error.
	Error,
}

/// A diagnostic whose message tree stays server-side until expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveDiagnostic {
	/// How severe the diagnostic is.
	pub severity: Severity,
	/// Source range the diagnostic covers.
	pub span: Span,
	/// The structured message, expandable on demand.
	pub message: RpcRef<MessageTree>,
}
