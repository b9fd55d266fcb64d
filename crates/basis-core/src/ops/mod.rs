pub mod version_ops;

pub use version_ops::{bump_version, VersionController};
