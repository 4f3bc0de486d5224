//! Regional analysis: jurisdiction matrix and exclusivity detection.

pub mod finder;
pub mod types;

pub use finder::ExclusivityFinder;
pub use types::{JurisdictionExclusives, JurisdictionMatrix, TOTAL_LABEL};
