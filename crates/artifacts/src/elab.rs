//! Elaboration snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::lctx::LocalContext;

/// Source span in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
	/// Offset of the first byte.
	pub start: u32,
	/// Offset one past the last byte.
	pub end: u32,
}

/// Everything needed to re-enter the elaborator at one position.
///
/// Handlers hold on to this across requests (e.g. to elaborate user input
/// typed into a widget), which is exactly why it passes by reference: the
/// scope it closes over is neither small nor stable under serialization.
#[derive(Debug, Clone)]
pub struct ElabContext {
	/// Module being elaborated.
	pub module: String,
	/// Scope the elaborator was in.
	pub lctx: Arc<LocalContext>,
	/// Option overrides active at this position.
	pub options: Vec<(String, String)>,
}

/// What the elaborator learned about one subterm.
#[derive(Debug, Clone)]
pub struct ElabInfo {
	/// Where the subterm sits in the source.
	pub span: Span,
	/// The elaborated subterm.
	pub expr: Arc<Expr>,
	/// Its inferred type.
	pub ty: Arc<Expr>,
}
