//! Elaborated expression trees.

use std::sync::Arc;

/// A literal value embedded in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
	/// Unsigned numeric literal.
	Nat(u64),
	/// String literal.
	Str(String),
}

/// An elaborated expression.
///
/// Subtrees are shared: elaboration output reuses nodes heavily, which is
/// one of the reasons these trees pass over the RPC boundary by reference
/// rather than by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
	/// Bound variable, as a de Bruijn index.
	BVar(u32),
	/// Free variable referring to a declaration in scope.
	FVar(String),
	/// Global constant.
	Const(String),
	/// Function application.
	App(Arc<Expr>, Arc<Expr>),
	/// Anonymous function.
	Lambda {
		/// Display name of the bound variable.
		binder: String,
		/// Body, with the binder as de Bruijn index 0.
		body: Arc<Expr>,
	},
	/// Literal value.
	Lit(Literal),
}

impl Expr {
	/// Applies `f` to `arg`.
	#[must_use]
	pub fn app(f: Expr, arg: Expr) -> Self {
		Self::App(Arc::new(f), Arc::new(arg))
	}

	/// A lambda binding `binder` over `body`.
	#[must_use]
	pub fn lambda(binder: impl Into<String>, body: Expr) -> Self {
		Self::Lambda {
			binder: binder.into(),
			body: Arc::new(body),
		}
	}
}
