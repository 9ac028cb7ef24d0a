use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One API's discovery document.
///
/// Maps are [`IndexMap`]s so schemas, methods and resources are visited in
/// the order the document declares them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestDescription {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub root_url: String,
    #[serde(default)]
    pub service_path: String,
    #[serde(default)]
    pub discovery_rest_url: Option<String>,
    #[serde(default)]
    pub documentation_link: Option<String>,
    /// Standard parameters accepted by every method
    #[serde(default, deserialize_with = "object_or_default")]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub auth: Option<Auth>,
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaItem>,
    #[serde(default)]
    pub methods: IndexMap<String, Method>,
    #[serde(default)]
    pub resources: IndexMap<String, Resource>,
}

impl RestDescription {
    /// Resolve a `$ref` name against this document's schemas.
    pub fn schema(&self, name: &str) -> Option<&SchemaItem> {
        self.schemas.get(name)
    }

    /// OAuth scope URLs declared by the document, in declaration order.
    pub fn scopes(&self) -> Vec<String> {
        self.auth
            .as_ref()
            .and_then(|a| a.oauth2.as_ref())
            .map(|o| o.scopes.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Auth {
    #[serde(default)]
    pub oauth2: Option<OAuth2>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuth2 {
    #[serde(default)]
    pub scopes: IndexMap<String, ScopeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeInfo {
    #[serde(default)]
    pub description: String,
}

/// A named grouping of methods and nested resources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub methods: IndexMap<String, Method>,
    #[serde(default)]
    pub resources: IndexMap<String, Resource>,
}

/// A callable REST method.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub flat_path: Option<String>,
    #[serde(default = "default_http_method")]
    pub http_method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "object_or_default")]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub parameter_order: Vec<String>,
    #[serde(default)]
    pub request: Option<SchemaRef>,
    #[serde(default)]
    pub response: Option<SchemaRef>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub supports_media_upload: bool,
    #[serde(default)]
    pub media_upload: Option<MediaUpload>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

impl Method {
    /// Upload path for the simple media protocol, if the method supports uploads.
    pub fn media_path(&self) -> Option<&str> {
        if !self.supports_media_upload {
            return None;
        }
        self.media_upload
            .as_ref()
            .and_then(|m| m.protocols.as_ref())
            .and_then(|p| p.simple.as_ref())
            .map(|s| s.path.as_str())
    }
}

/// `{"$ref": "Name"}` pointer from a method to a named schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaUpload {
    #[serde(default)]
    pub protocols: Option<MediaProtocols>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaProtocols {
    #[serde(default)]
    pub simple: Option<MediaProtocol>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaProtocol {
    #[serde(default)]
    pub path: String,
}

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    #[default]
    Query,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Regex the value must match; non-string patterns are dropped
    #[serde(default, deserialize_with = "string_or_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub repeated: bool,
}

/// A node in the data-schema graph.
///
/// References are kept by name; nothing here inlines the target of a `$ref`,
/// so cyclic schema catalogues are safe to walk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSchemaItem")]
pub struct SchemaItem {
    pub description: Option<String>,
    pub format: Option<String>,
    pub kind: SchemaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `$ref` to another named schema; wins over any declared `type`
    Reference(String),
    /// Any scalar type name as declared (`string`, `integer`, `boolean`, ...)
    Primitive(String),
    /// Object with declared properties
    Object(IndexMap<String, SchemaItem>),
    /// Free-form map from string keys to `additionalProperties`
    Map(Box<SchemaItem>),
    /// Sequence of `items`; `None` when the document omits `items`
    Array(Option<Box<SchemaItem>>),
    /// Object without properties, or no type at all
    Unknown,
}

impl SchemaItem {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            description: None,
            format: None,
            kind,
        }
    }

    pub fn reference(name: &str) -> Self {
        Self::new(SchemaKind::Reference(name.to_string()))
    }

    pub fn primitive(ty: &str) -> Self {
        Self::new(SchemaKind::Primitive(ty.to_string()))
    }

    pub fn properties(&self) -> Option<&IndexMap<String, SchemaItem>> {
        match &self.kind {
            SchemaKind::Object(props) => Some(props),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchemaItem {
    #[serde(rename = "$ref", default)]
    reference: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    properties: Option<IndexMap<String, SchemaItem>>,
    #[serde(default, deserialize_with = "object_or_default")]
    additional_properties: Option<Box<SchemaItem>>,
    #[serde(default)]
    items: Option<Box<SchemaItem>>,
}

impl From<RawSchemaItem> for SchemaItem {
    fn from(raw: RawSchemaItem) -> Self {
        let kind = if let Some(reference) = raw.reference {
            SchemaKind::Reference(reference)
        } else {
            match raw.kind.as_deref() {
                Some("object") | None => match (raw.additional_properties, raw.properties) {
                    (Some(values), _) => SchemaKind::Map(values),
                    (None, Some(props)) => SchemaKind::Object(props),
                    (None, None) => SchemaKind::Unknown,
                },
                Some("array") => SchemaKind::Array(raw.items),
                Some(other) => SchemaKind::Primitive(other.to_string()),
            }
        };
        SchemaItem {
            description: raw.description,
            format: raw.format,
            kind,
        }
    }
}

/// One entry of the discovery directory listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub discovery_rest_url: String,
    #[serde(default)]
    pub preferred: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryList {
    #[serde(default)]
    pub items: Vec<DirectoryItem>,
}

/// Deserialize a JSON object into `T`; anything else becomes `T::default()`.
fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Ok(T::default()),
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
