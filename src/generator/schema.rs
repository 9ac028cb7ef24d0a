use crate::discovery::{SchemaItem, SchemaKind};

use super::params::sanitize_property_name;

/// TypeScript name for a reference to a named schema.
///
/// Same name, same expression: the mapper never looks inside the target.
pub fn reference_type(name: &str) -> String {
    format!("Schema${name}")
}

/// Whether a type expression can take the compact `T[]` array notation.
///
/// Anything carrying a structural `{` needs the `Array<T>` form instead.
pub fn is_simple_type(ty: &str) -> bool {
    !ty.contains('{')
}

/// Map a schema item to a TypeScript type expression.
///
/// `$ref` short-circuits recursion, so this terminates on self-referential
/// schema catalogues.
///
/// # Example
///
/// ```rust
/// use apigen::discovery::SchemaItem;
/// use apigen::generator::map_type;
///
/// assert_eq!(map_type(&SchemaItem::reference("File")), "Schema$File");
/// assert_eq!(map_type(&SchemaItem::primitive("integer")), "number");
/// ```
pub fn map_type(item: &SchemaItem) -> String {
    match &item.kind {
        SchemaKind::Reference(name) => reference_type(name),
        SchemaKind::Primitive(ty) if ty == "integer" => "number".to_string(),
        SchemaKind::Primitive(ty) => ty.clone(),
        SchemaKind::Map(values) => format!("{{ [key: string]: {}; }}", map_type(values)),
        SchemaKind::Object(props) => {
            let fields = props
                .iter()
                .map(|(name, prop)| format!("{}?: {};", sanitize_property_name(name), map_type(prop)))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{{ {fields} }}")
        }
        SchemaKind::Array(items) => {
            let inner = items
                .as_deref()
                .map(map_type)
                .unwrap_or_else(|| "any".to_string());
            if is_simple_type(&inner) {
                format!("{inner}[]")
            } else {
                format!("Array<{inner}>")
            }
        }
        SchemaKind::Unknown => "any".to_string(),
    }
}
