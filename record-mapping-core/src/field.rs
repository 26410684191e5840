use std::any::TypeId;
use std::fmt::{self, Display, Formatter};

/// Leaf value categories that can appear in a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Free-form text.
    String,
    /// Whole numbers of any width or signedness.
    Integer,
    /// Floating-point numbers.
    Float,
    /// True/false values.
    Boolean,
    /// Points in time (epoch seconds or formatted timestamps).
    DateTime,
    /// A leaf value with no dedicated index type; indexed as keyword.
    Raw,
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Raw => "raw",
        };
        write!(f, "{name}")
    }
}

/// Per-field serialization tag: external name plus skip marker.
///
/// `name: None` means the field serializes under its declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldTag {
    pub name: Option<&'static str>,
    pub skip: bool,
}

/// A record type that can describe its own fields for mapping derivation.
///
/// This is the explicit replacement for runtime reflection: every type that
/// participates in mapping derivation lists its own fields, in declaration
/// order, with the same names its serializer uses.
pub trait Record: 'static {
    /// Name used as the serialized root key for this type.
    const NAME: &'static str;

    /// Field descriptors in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

/// Deferred handle to a nested record type.
///
/// Nested fields hold a `TypeRef` rather than an expanded descriptor tree so
/// that building descriptors for a self-referential type cannot itself
/// recurse; the walker expands the thunk one level at a time and uses the
/// `TypeId` to detect repeats.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<FieldDescriptor>,
}

impl TypeRef {
    /// Build a reference to record type `T`.
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::NAME,
            fields: T::fields,
        }
    }

    /// Stable identity of the referenced type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Serialized name of the referenced type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Expand one level of field descriptors.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        (self.fields)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef").field("name", &self.name).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

/// The value shape of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    /// A single leaf value.
    Scalar(ScalarKind),
    /// A repeated leaf value. Mapped identically to [`ValueKind::Scalar`].
    ScalarArray(ScalarKind),
    /// A nested record.
    Record(TypeRef),
    /// A repeated nested record. Mapped identically to [`ValueKind::Record`].
    RecordArray(TypeRef),
}

/// One field of a record type: declared name, serialization tag, value shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub declared_name: &'static str,
    pub tag: FieldTag,
    pub value: ValueKind,
}

impl FieldDescriptor {
    /// A scalar field serialized under its declared name.
    pub fn scalar(declared_name: &'static str, kind: ScalarKind) -> Self {
        Self {
            declared_name,
            tag: FieldTag::default(),
            value: ValueKind::Scalar(kind),
        }
    }

    /// A repeated scalar field serialized under its declared name.
    pub fn scalar_array(declared_name: &'static str, kind: ScalarKind) -> Self {
        Self {
            declared_name,
            tag: FieldTag::default(),
            value: ValueKind::ScalarArray(kind),
        }
    }

    /// A nested record field serialized under its declared name.
    pub fn record<T: Record>(declared_name: &'static str) -> Self {
        Self {
            declared_name,
            tag: FieldTag::default(),
            value: ValueKind::Record(TypeRef::of::<T>()),
        }
    }

    /// A repeated nested record field serialized under its declared name.
    pub fn record_array<T: Record>(declared_name: &'static str) -> Self {
        Self {
            declared_name,
            tag: FieldTag::default(),
            value: ValueKind::RecordArray(TypeRef::of::<T>()),
        }
    }

    /// Override the serialized name (a tag rename).
    pub fn renamed(mut self, name: &'static str) -> Self {
        self.tag.name = Some(name);
        self
    }

    /// Mark the field as excluded from serialization and mapping.
    pub fn skipped(mut self) -> Self {
        self.tag.skip = true;
        self
    }

    /// The name this field serializes under.
    pub fn serialized_name(&self) -> &'static str {
        self.tag.name.unwrap_or(self.declared_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldDescriptor, ScalarKind};

    #[test]
    fn serialized_name_falls_back_to_declared_name() {
        let plain = FieldDescriptor::scalar("port", ScalarKind::Integer);
        assert_eq!(plain.serialized_name(), "port");

        let renamed = FieldDescriptor::scalar("scan_type", ScalarKind::String).renamed("type");
        assert_eq!(renamed.serialized_name(), "type");
    }

    #[test]
    fn skipped_sets_the_skip_marker_only() {
        let field = FieldDescriptor::scalar("source", ScalarKind::String).skipped();
        assert!(field.tag.skip);
        assert_eq!(field.tag.name, None);
    }
}
