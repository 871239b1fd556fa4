//! Arena-backed in-memory host for `vdom`.
//!
//! `DomStore` implements the `vdom` host contract without any rendering
//! surface. It is what the demo driver patches and what the reconciliation
//! tests compare against fresh renders.
//!
//! Invariants:
//! - The root node exists for the lifetime of the store and is never detached.
//! - A node has at most one parent; attaching a node that already has one is
//!   an error, as is attaching a node under its own descendant.
//! - Removing or replacing a child retires its whole subtree. Retired keys are
//!   never handed out again and every later access yields `UnknownNode`.
//!   Their records stay allocated, so the arena only grows.
//! - Attribute order is insertion order; setting an existing attribute keeps
//!   its position.

mod config;
mod store;

pub use crate::config::HostConfig;
pub use crate::store::{DomStore, NodeKey};
