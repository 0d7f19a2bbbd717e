//! Node interface for anything that renders audio blocks and reacts to notes.
//!
//! The additive voice implements [`GraphNode`] so it can be driven like any
//! other node: note events in, blocks of samples out.

/// Core trait shared by all graph nodes.
pub mod node;

pub use node::{GraphNode, RenderCtx};
