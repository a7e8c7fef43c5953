//! jarcoord - Maven coordinate recovery for Java archives
//!
//! This library recovers a `groupId:artifactId:version` coordinate for any
//! `.jar` file, even one with no or broken build metadata, so it can be
//! installed into a local Maven repository and referenced by a build.
//!
//! # Architecture
//!
//! ```text
//! discovery ──► resolver ──► install
//!                  │
//!                  ├── archive    (entry listing and reads, no extraction)
//!                  ├── strategy   (descriptor, manifest, layout, path, filename, fallback)
//!                  └── coordinate (per-field merge, normalization)
//! ```
//!
//! Recovery never fails for an archive that can be opened: the fallback
//! strategy synthesizes placeholders for whatever the other strategies
//! could not find, and the normalizer coerces every field into a valid
//! repository identifier.

pub mod archive;
pub mod config;
pub mod coordinate;
pub mod discovery;
pub mod install;
pub mod logging;
pub mod resolver;
pub mod strategy;

/// Version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
