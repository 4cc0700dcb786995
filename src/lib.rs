//! This crate provides a way to manage a to-do list stored on a remote HTTP server.
//!
//! It provides an HTTP client in the [`client`] module, that can be used as a stand-alone module.
//!
//! The state a to-do screen needs (the fetched items grouped by category, favorites, a persisted dark-mode flag and the item creation form)
//! is held by a [`TodoBoard`](board::TodoBoard). \
//! A board never edits its items in place: every successful creation or deletion is followed by a full refresh from its source.
//!
//! A local store is provided in the [`cache`] module. It can replace the server when working offline, or in tests.

pub mod traits;
pub mod error;

mod item;
pub use item::{ItemId, NewTodo, TodoItem};
pub mod resource;
pub mod board;
pub use board::TodoBoard;

pub mod client;
pub mod cache;
pub mod storage;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
