pub mod entity;
pub mod timestamp;
pub mod version;

pub use entity::{BaseEntity, EntityId};
pub use timestamp::{Timestamp, TimestampStrictness};
pub use version::{EntityVersion, SemanticVersion, VersionScheme};
