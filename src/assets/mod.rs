//! Source photo decoding.

/// Image decoding (single and paired).
pub mod decode;
