pub mod session;
pub mod styles;
pub mod version;
