//! These models represent the objects passed between the conversation, the backend and
//! the toolboxes.
//!
//! The backend only speaks plain text, so messages carry a single text body and tool calls
//! are recovered from that text after the fact. Arguments stay as strings because that is
//! all the text pattern can express.
pub mod message;
pub mod role;
pub mod tool;
