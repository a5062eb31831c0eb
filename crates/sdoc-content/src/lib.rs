//! Content store abstraction for sdoc collections.
//!
//! This crate provides a [`ContentStore`] trait for listing and reading the
//! documents of a content collection, independent of where they live. This
//! keeps routing and path enumeration testable without touching the real
//! filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentStore`] trait with `members()`, `read()`, and `exists()` methods
//! - [`FsContentStore`] for a directory tree of `.md`/`.mdx` files
//! - [`MockContentStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sdoc_content::{ContentStore, FsContentStore};
//!
//! let store = FsContentStore::new(PathBuf::from("content"));
//! for key in store.members("surrealql")? {
//!     println!("{key}");
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod scanner;
mod store;

pub use fs::FsContentStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentStore;
pub use store::{ContentStore, INDEX_KEY, StorageError, StorageErrorKind};
