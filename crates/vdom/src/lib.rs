//! Unkeyed virtual-tree reconciliation.
//!
//! Build two snapshots with [`h`], diff them with [`diff_trees`], and apply
//! the resulting [`Edit`] to a host through [`apply`]. Hosts plug in by
//! implementing [`HostTree`] and [`HostAdapter`].
//!
//! ```
//! use vdom::{Edit, PropEdit, PropValue, diff_trees, h, props};
//!
//! let old = h("ul", Some(props! { "className" => "list-0" }), Vec::<vdom::Child>::new());
//! let li = h("li", None, ["item ", "0"]);
//! let new = h("ul", Some(props! { "className" => "list-1" }), vec![li.clone()]);
//!
//! assert_eq!(
//!     diff_trees(&new, &old),
//!     Edit::Update {
//!         props: vec![PropEdit::SetProp {
//!             key: "className".to_string(),
//!             value: PropValue::from("list-1"),
//!         }],
//!         children: vec![Edit::Create(li)],
//!     }
//! );
//! ```

pub mod builder;
pub mod debug;
pub mod diff;
pub mod edit;
pub mod host;
pub mod node;
pub mod patch;
#[cfg(any(test, feature = "snapshot"))]
pub mod snapshot;

pub use crate::builder::{Child, flatten, h, text};
pub use crate::diff::{changed, diff, diff_children, diff_props, diff_trees};
pub use crate::edit::{Edit, EditKind, EditSummary, PropEdit};
pub use crate::host::{HostAdapter, HostError, HostTree};
pub use crate::node::{ABSENT, Element, NodeKind, PropValue, Props, ViewNode};
pub use crate::patch::{PatchStats, Patcher, apply, apply_at, mount};
