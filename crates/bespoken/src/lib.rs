pub mod args;
pub mod conversation;
pub mod dispatch;
pub mod errors;
pub mod model;
pub mod models;
pub mod providers;
pub mod response;
pub mod toolbox;
pub mod tools;
