//! Generic index-mapping derivation for self-describing record types.
//!
//! A record type implements [`Record`] to list its fields (name, tag, value
//! shape) in declaration order; [`derive_mapping`] walks that description and
//! produces a search-engine [`Mapping`] document mirroring the field tree.
//! The walk never inspects instance data, only the type description.

pub mod derive;
pub mod field;
pub mod mapping;

pub use derive::{derive_mapping, derive_mapping_for, DeriveError};
pub use field::{FieldDescriptor, FieldTag, Record, ScalarKind, TypeRef, ValueKind};
pub use mapping::{IndexType, Mapping, Properties, Property};
