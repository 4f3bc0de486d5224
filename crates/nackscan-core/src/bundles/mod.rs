//! Bundling: grouping rejection rows by `(uti_id, fo_message_id)`.

pub mod builder;
pub mod types;

pub use builder::BundleBuilder;
pub use types::{Bundle, BundleKey, ORDERED_SEPARATOR, UNORDERED_SEPARATOR};
