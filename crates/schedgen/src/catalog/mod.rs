/// Catalog module: section records for a term and their in-memory snapshot
mod snapshot;
mod types;

pub use snapshot::SectionSnapshot;
pub use types::{ComponentType, MeetingBlock, Section};
