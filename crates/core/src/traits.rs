//! Collaborator traits
//!
//! `ObjectStore` abstracts the three bucket operations the session needs,
//! and `Prompt` abstracts the terminal. Both are mocked in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata for one listed object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for a stored object
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size_bytes: None,
            etag: None,
        }
    }
}

/// One page of a bucket listing, in the order the store returned it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether the store has more pages that were not fetched
    pub truncated: bool,
}

impl ListResult {
    /// Build a complete (non-truncated) listing from keys
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            items: keys.into_iter().map(ObjectInfo::new).collect(),
            truncated: false,
        }
    }

    /// Iterate over the listed keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a successful put
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResult {
    /// Destination key
    pub key: String,

    /// Where the object can be addressed, e.g. `https://bucket.s3.amazonaws.com/key`
    pub location: String,

    /// Bytes written
    pub size_bytes: u64,
}

/// Object-store operations against a single bucket
///
/// Implemented by the S3 adapter and mocked for testing. Every call issues
/// exactly one request; nothing here retries or paginates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the first page of objects in a bucket
    async fn list_objects(&self, bucket: &str) -> Result<ListResult>;

    /// Store `data` under `key`, overwriting any existing object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<PutResult>;

    /// Delete a single object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Interactive input
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Present `options` and return the index of the selected one
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<usize>;

    /// Ask for a line of free text
    fn input(&mut self, prompt: &str) -> Result<String>;
}
