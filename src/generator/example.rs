use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::discovery::{SchemaItem, SchemaKind};

/// Build a shallow example object for a request or response schema.
///
/// One entry per declared property, in declaration order. The value is picked
/// from the property's own type only; `$ref` properties are never followed,
/// so cyclic schemas need no special handling.
///
/// `_schemas` is accepted so callers can pass the whole catalogue; the
/// shallow policy does not consult it.
pub fn flatten_schema(item: &SchemaItem, _schemas: &IndexMap<String, SchemaItem>) -> Value {
    let mut example = Map::new();
    if let Some(props) = item.properties() {
        for (name, details) in props {
            example.insert(name.clone(), example_property_value(name, details));
        }
    }
    Value::Object(example)
}

/// Example value for one property, chosen by declared type.
pub fn example_property_value(name: &str, details: &SchemaItem) -> Value {
    match &details.kind {
        SchemaKind::Primitive(ty) => match ty.as_str() {
            "string" => Value::String(format!("my_{name}")),
            "boolean" => Value::Bool(false),
            "integer" => Value::from(0),
            _ => Value::Object(Map::new()),
        },
        SchemaKind::Array(_) => Value::Array(Vec::new()),
        SchemaKind::Reference(_)
        | SchemaKind::Object(_)
        | SchemaKind::Map(_)
        | SchemaKind::Unknown => Value::Object(Map::new()),
    }
}

/// Example for a method's `request`/`response` reference.
///
/// `None` when the method declares no reference or the name does not resolve
/// in the document's schemas.
pub fn example_for_ref(
    reference: Option<&str>,
    schemas: &IndexMap<String, SchemaItem>,
) -> Option<Value> {
    let name = reference?;
    match schemas.get(name) {
        Some(item) => Some(flatten_schema(item, schemas)),
        None => {
            tracing::debug!(reference = name, "schema reference does not resolve, no example");
            None
        }
    }
}
