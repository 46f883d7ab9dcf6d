//! Substack API related functionality

pub mod client;
pub mod page;
pub mod prosemirror;
pub mod types;
