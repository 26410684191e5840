use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::field::{Record, ScalarKind, TypeRef, ValueKind};
use crate::mapping::{IndexType, Mapping, Properties, Property};

/// Errors that can occur while deriving a mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// The root value is not a record with fields.
    #[error("cannot derive a mapping for non-record root: {0}")]
    RootNotRecord(String),
    /// A record type reaches itself through its own fields.
    #[error("cyclic type reference through `{0}`")]
    CyclicType(&'static str),
}

/// Derive the mapping document for record type `T`.
///
/// The returned [`Mapping`] is named after `T::NAME` and mirrors the field
/// tree of `T`: one entry per non-skipped field, in declaration order.
pub fn derive_mapping<T: Record>() -> Result<Mapping, DeriveError> {
    derive_mapping_for(&ValueKind::Record(TypeRef::of::<T>()))
}

/// Derive a mapping for an arbitrary root value description.
///
/// Fails with [`DeriveError::RootNotRecord`] unless the root is a single
/// record: a scalar or array root has no field structure to mirror.
pub fn derive_mapping_for(root: &ValueKind) -> Result<Mapping, DeriveError> {
    let ValueKind::Record(type_ref) = root else {
        return Err(DeriveError::RootNotRecord(describe_root(root)));
    };

    let mut walker = Walker::default();
    let properties = walker.walk(type_ref)?;
    Ok(Mapping {
        name: type_ref.name().to_string(),
        properties,
    })
}

/// Translate a scalar kind to its index type.
///
/// The table is total: kinds without a dedicated index type fall back to
/// `keyword` rather than failing, favoring indexing robustness over strict
/// validation. Integers and floats map to distinct numeric types.
fn index_type(kind: ScalarKind) -> IndexType {
    match kind {
        ScalarKind::String => IndexType::Keyword,
        ScalarKind::Integer => IndexType::Long,
        ScalarKind::Float => IndexType::Double,
        ScalarKind::Boolean => IndexType::Boolean,
        ScalarKind::DateTime => IndexType::Date,
        _ => IndexType::Keyword,
    }
}

/// Pre-order depth-first walk over a record's field descriptors.
#[derive(Default)]
struct Walker {
    /// Types on the current descent path. Re-entering one is a cycle.
    in_progress: HashSet<TypeId>,
    /// Completed sub-mappings, reused when one type appears under several
    /// sibling fields.
    done: HashMap<TypeId, Properties>,
}

impl Walker {
    fn walk(&mut self, type_ref: &TypeRef) -> Result<Properties, DeriveError> {
        if let Some(properties) = self.done.get(&type_ref.id()) {
            return Ok(properties.clone());
        }
        if !self.in_progress.insert(type_ref.id()) {
            return Err(DeriveError::CyclicType(type_ref.name()));
        }

        let mut properties = Properties::new();
        for field in type_ref.fields() {
            if field.tag.skip {
                continue;
            }
            // Arrays are transparent at the mapping level: a repeated value
            // maps exactly like a single one.
            let property = match &field.value {
                ValueKind::Scalar(kind) | ValueKind::ScalarArray(kind) => Property::Field {
                    index_type: index_type(*kind),
                },
                ValueKind::Record(nested) | ValueKind::RecordArray(nested) => Property::Object {
                    properties: self.walk(nested)?,
                },
            };
            properties.insert(field.serialized_name().to_string(), property);
        }

        self.in_progress.remove(&type_ref.id());
        self.done.insert(type_ref.id(), properties.clone());
        Ok(properties)
    }
}

fn describe_root(value: &ValueKind) -> String {
    match value {
        ValueKind::Scalar(kind) => format!("{kind} scalar"),
        ValueKind::ScalarArray(kind) => format!("array of {kind} scalars"),
        ValueKind::RecordArray(type_ref) => format!("array of `{}` records", type_ref.name()),
        ValueKind::Record(type_ref) => format!("`{}` record", type_ref.name()),
    }
}
