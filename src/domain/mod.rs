//! Domain layer: forest construction and rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! storage backend specifics).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{Forest, TreeNode};
pub use builder::build_forest;
pub use entities::{to_giga, DiskImage, SizeExtract, VdiInfo, GIGA};
pub use error::{DomainError, TreeResult};
pub use render::{render_forest, TREE_INDENT};
