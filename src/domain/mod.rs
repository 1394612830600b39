//! Domain logic - pure versioning rules independent of git operations

pub mod version;
pub mod versions;

pub use version::{Component, PreReleaseStyle, Version};
pub use versions::{find_latest, Versions};
