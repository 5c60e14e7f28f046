//! Structured diagnostic messages.

use std::sync::Arc;

use crate::expr::Expr;

/// Diagnostic text kept as a tree so the client can lazily expand embedded
/// values instead of receiving one flattened string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTree {
	/// Plain text leaf.
	Text(String),
	/// Concatenation of children.
	Group(Vec<MessageTree>),
	/// Child indented by `indent` columns when laid out.
	Nest {
		/// Extra indentation for the child.
		indent: u32,
		/// The nested message.
		child: Arc<MessageTree>,
	},
	/// An expression rendered on demand, kept unexpanded until the client
	/// asks for it.
	OfExpr(Arc<Expr>),
}

impl MessageTree {
	/// A plain text leaf.
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// Flattened plain-text rendering.
	///
	/// Unexpanded expressions render as an ellipsis; indentation is a
	/// client-side layout concern and is ignored here.
	#[must_use]
	pub fn to_plain_text(&self) -> String {
		let mut out = String::new();
		self.render(&mut out);
		out
	}

	fn render(&self, out: &mut String) {
		match self {
			Self::Text(text) => out.push_str(text),
			Self::Group(children) => {
				for child in children {
					child.render(out);
				}
			}
			Self::Nest { child, .. } => child.render(out),
			Self::OfExpr(_) => out.push_str("..."),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_text_flattens_the_tree() {
		let message = MessageTree::Group(vec![
			MessageTree::text("type mismatch: "),
			MessageTree::OfExpr(Arc::new(Expr::Const("Nat.zero".to_owned()))),
			MessageTree::Nest {
				indent: 2,
				child: Arc::new(MessageTree::text(" has type Nat")),
			},
		]);

		assert_eq!(message.to_plain_text(), "type mismatch: ... has type Nat");
	}
}
