//! Integration tests for the Las Torres storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p las-torres-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving reopen of the file store
//! - `cart_properties` - Property tests for cart invariants
//! - `storefront_flow` - Catalog, checkout and contact driven through `AppState`
//!
//! Tests write into per-test directories under the system temp dir; see
//! [`TempDir`].

use std::path::{Path, PathBuf};

/// A uniquely named directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Reserve a fresh directory path. The directory itself is created lazily
    /// by whatever writes into it.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the directory.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
