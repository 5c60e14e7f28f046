//! Compiler artifacts the server exposes to editor widgets by reference.
//!
//! The values here are too large, too cyclic, or too implementation-specific
//! to serialize faithfully on every request, and the editor usually only
//! needs to hold on to one and pass it back later ("render the goal for this
//! context again"). They cross the RPC boundary as [`opal_rpc_ref::RpcRef`]
//! tokens instead; the `refs` module registers each type with its qualified
//! tag, and [`widget`] holds the protocol bodies that carry the tokens.

pub mod elab;
pub mod expr;
pub mod lctx;
pub mod message;
mod refs;
pub mod widget;

pub use elab::{ElabContext, ElabInfo, Span};
pub use expr::{Expr, Literal};
pub use lctx::{LocalContext, LocalDecl};
pub use message::MessageTree;
pub use widget::{Hypothesis, InteractiveDiagnostic, InteractiveGoal, Severity};
