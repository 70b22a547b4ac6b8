//! Toolboxes shipped with bespoken.
pub mod file;
pub mod todo;

pub use file::FileTools;
pub use todo::TodoTools;
