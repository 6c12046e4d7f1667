//! Helpers shared by the integration tests of the workspace crates.

mod normalize;
mod tree;

pub use normalize::{normalize_newlines, normalize_path_separators, replace_root};
pub use tree::{ProjectTree, write_tree};
