//! Canonical identifiers for declared types and members
//!
//! The encoder produces ids from descriptors; the parser reads the prefixed
//! ids found in documentation files and `cref` attributes. Both sides share
//! one grammar so that parsed ids match encoded ones byte for byte.

pub mod encoder;
pub mod parser;

pub use encoder::{declaration_id, encode, encode_type_ref, prefixed_id, qualified_id};
pub use parser::{DocId, DocTarget};
