//! Demo application: fabricates comments, stores them and grows the store.

pub mod app;
pub mod comment;

pub use app::{App, Report};
pub use comment::Comment;
