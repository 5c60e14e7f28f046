//! Wire-visible reference tokens.

use serde::{Deserialize, Serialize};

/// Serializable stand-in for a server-owned value.
///
/// A token carries no payload. It identifies one entry of the [`RefStore`]
/// generation that minted it and is meaningless anywhere else; the transport
/// only has to round-trip `handle` and `typeTag` losslessly.
///
/// [`RefStore`]: crate::RefStore
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefToken {
	/// Opaque handle identifying one store entry within a generation.
	pub handle: u64,
	/// Qualified name of the type the entry was stored under.
	pub type_tag: String,
}

impl RefToken {
	/// Creates a token for `handle` tagged with `type_tag`.
	#[must_use]
	pub fn new(handle: u64, type_tag: impl Into<String>) -> Self {
		Self {
			handle,
			type_tag: type_tag.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wire_shape_is_camel_case() {
		let token = RefToken::new(3, "Opal.Expr");
		let json = serde_json::to_value(&token).unwrap();
		assert_eq!(
			json,
			serde_json::json!({ "handle": 3, "typeTag": "Opal.Expr" })
		);

		let back: RefToken = serde_json::from_value(json).unwrap();
		assert_eq!(back, token);
	}
}
