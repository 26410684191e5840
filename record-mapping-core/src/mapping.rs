use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Index types emitted in a mapping document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Keyword,
    Long,
    Double,
    Boolean,
    Date,
}

/// Properties of an object node, keyed by serialized field name.
///
/// Insertion order follows field declaration order so that rendered mappings
/// are deterministic and diff-friendly; consumers treat key order as
/// irrelevant.
pub type Properties = IndexMap<String, Property>;

/// One entry in a `properties` map: a leaf field or a nested object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Property {
    /// A leaf field with a concrete index type: `{"type": "keyword"}`.
    Field {
        #[serde(rename = "type")]
        index_type: IndexType,
    },
    /// A nested object: `{"properties": {...}}`.
    Object { properties: Properties },
}

/// A derived mapping document: root name plus nested properties.
///
/// Serializes as `{"<name>": {"properties": {...}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// Serialized name of the root record type, used as the root key.
    pub name: String,
    /// Top-level properties, mirroring the root type's fields.
    pub properties: Properties,
}

impl Mapping {
    /// Render the mapping as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render the mapping as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            properties: &'a Properties,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.name,
            &Body {
                properties: &self.properties,
            },
        )?;
        map.end()
    }
}
