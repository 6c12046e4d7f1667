//! Helpers shared by the documentation engine and the `docgen` binary.

pub mod color;
pub mod paths;
