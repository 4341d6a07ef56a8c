/// Per-course combination enumeration
mod enumerator;
mod types;

pub use enumerator::CombinationEnumerator;
pub use types::{Combination, ComponentPick};
