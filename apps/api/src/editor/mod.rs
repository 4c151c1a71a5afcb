// Editor state: per-session records, the edit operations over them, and
// the upload flow that feeds extraction results in.

pub mod edits;
pub mod flow;
pub mod handlers;
pub mod progress;
pub mod session;
pub mod store;
