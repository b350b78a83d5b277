//! bkt-core: Core library for the bkt bucket session
//!
//! This crate provides:
//! - Configuration loading and resolution
//! - The error taxonomy shared by all crates
//! - `ObjectStore` and `Prompt` traits for the session's collaborators
//! - Regex key filtering
//! - The interactive `BucketSession` loop
//!
//! It is independent of any S3 SDK so the session can be tested against mocks.

pub mod config;
pub mod error;
pub mod pattern;
pub mod session;
pub mod traits;

pub use config::{Config, ConfigManager, Credentials, Overrides, StoreConfig};
pub use error::{Error, ErrorKind, Result};
pub use pattern::KeyPattern;
pub use session::{BucketSession, MenuChoice, Report, Reporter};
pub use traits::{ListResult, ObjectInfo, ObjectStore, Prompt, PutResult};
