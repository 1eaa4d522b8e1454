mod keys;
mod parser;

pub use keys::FieldKeys;
pub use parser::{normalize_body, normalize_payload};
