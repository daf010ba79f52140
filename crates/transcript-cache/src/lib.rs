//! transcript-cache — Results caching and collaborator implementations.
//!
//! Wraps the results compiler in a per-student cache with single-flight
//! computation and explicit invalidation, and provides in-process
//! implementations of the enrollment source and cache store traits.

pub mod config;
pub mod coordinator;
pub mod memory;
pub mod source;

pub use config::{load_config, load_config_from, CacheConfig, TranscriptConfig};
pub use coordinator::ResultsCoordinator;
pub use memory::InMemoryCache;
pub use source::StaticSource;
