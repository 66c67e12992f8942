pub mod frame;
pub mod keys;
pub mod label;

pub use frame::{DataFrame, Delimiter};
pub use label::{label_key, native_scalar, positional_labels};

/// A JSON object as produced for and consumed by the charting library.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
