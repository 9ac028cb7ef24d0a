use askama::Template;
use serde_json::Value;
use std::path::Path;

use super::methods::MethodTree;
use super::params::{
    camel_case, clean_comments, clean_paths, collapse_duplicate_slashes, escape_single_quoted,
    humanize_path_pattern, one_line, path_params, sanitize_param_name, sanitize_property_name,
};
use super::schema::{map_type, reference_type};
use crate::discovery::{Method, Parameter, RestDescription, SchemaItem, SchemaKind};
use crate::error::{GenerateError, Result};

/// `Drive` from `drive`, `WellKnown` from `well-known`.
pub fn class_name(name: &str) -> String {
    let camel = camel_case(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// TypeScript namespace for one API version, e.g. `drive_v3`, `adexchange_v1_4`.
pub fn namespace_for(name: &str, version: &str) -> String {
    format!("{}_{}", name, version.replace(['.', '-'], "_"))
}

fn doc_text(text: &str) -> String {
    clean_comments(&one_line(text))
}

/// A parameter as both the binding and the sample render it.
#[derive(Debug, Clone)]
pub struct ParamView {
    /// Interface key: reserved names suffixed, quoted when not a bare identifier
    pub name: String,
    /// Name the API expects on the wire
    pub wire_name: String,
    /// Set when `name` differs from `wire_name` and must be mapped back
    pub renamed: bool,
    pub ty: String,
    pub description: String,
    pub required: bool,
    /// Example value escaped for a single-quoted JS string: a humanized
    /// path pattern or `placeholder-value`
    pub example: String,
}

impl ParamView {
    pub fn new(name: &str, param: &Parameter) -> Self {
        let base = param
            .kind
            .as_deref()
            .map(|kind| map_type(&SchemaItem::primitive(kind)))
            .unwrap_or_else(|| "string".to_string());
        let ty = if param.repeated { format!("{base}[]") } else { base };
        let humanized = humanize_path_pattern(param.pattern.as_deref());
        let example = if humanized.is_empty() {
            "placeholder-value".to_string()
        } else {
            humanized
        };
        let safe_name = sanitize_param_name(name);
        Self {
            renamed: safe_name != name,
            name: sanitize_property_name(&safe_name),
            wire_name: name.to_string(),
            ty,
            description: doc_text(&param.description),
            required: param.required,
            example: escape_single_quoted(&example),
        }
    }
}

/// Everything the templates need about one method.
#[derive(Debug, Clone)]
pub struct MethodView {
    pub id: String,
    /// Property name on the owning class
    pub name: String,
    pub description: String,
    pub http_method: String,
    pub root_url: String,
    /// Path appended to the root URL, duplicate slashes collapsed
    pub url: String,
    pub has_media_url: bool,
    pub media_url: String,
    pub required_params: Vec<String>,
    pub path_params: Vec<String>,
    pub params: Vec<ParamView>,
    pub params_interface: String,
    pub has_request: bool,
    pub request_type: String,
    pub response_type: String,
    /// Dotted call from the API object, e.g. `projects.locations.get`
    pub call_path: String,
    pub scopes: Vec<String>,
}

impl MethodView {
    pub fn new(doc: &RestDescription, method: &Method) -> Self {
        let prefix = format!("{}.", doc.name);
        let call_path = method
            .id
            .strip_prefix(&prefix)
            .unwrap_or(&method.id)
            .to_string();
        let mut segments: Vec<&str> = call_path.split('.').collect();
        let method_name = segments.pop().unwrap_or_default();
        let params_interface = std::iter::once("Params$Resource".to_string())
            .chain(segments.iter().map(|s| class_name(s)))
            .chain(std::iter::once(class_name(method_name)))
            .collect::<Vec<_>>()
            .join("$");

        let required_params = method
            .parameter_order
            .iter()
            .filter(|p| method.parameters.get(*p).is_some_and(|param| param.required))
            .cloned()
            .collect();
        let url = clean_paths(&collapse_duplicate_slashes(&format!(
            "/{}{}",
            doc.service_path, method.path
        )));
        let media_url = method
            .media_path()
            .map(|p| {
                let path = format!("/{}", p.trim_start_matches('/'));
                clean_paths(&collapse_duplicate_slashes(&path))
            })
            .unwrap_or_default();
        let request_type = method
            .request
            .as_ref()
            .and_then(|r| r.reference.as_deref())
            .map(reference_type);
        let response_type = method
            .response
            .as_ref()
            .and_then(|r| r.reference.as_deref())
            .map(reference_type)
            .unwrap_or_else(|| "void".to_string());
        let scopes = if method.scopes.is_empty() {
            doc.scopes()
        } else {
            method.scopes.clone()
        };

        Self {
            id: method.id.clone(),
            name: camel_case(method_name),
            description: doc_text(&method.description),
            http_method: method.http_method.to_uppercase(),
            root_url: doc.root_url.clone(),
            url,
            has_media_url: !media_url.is_empty(),
            media_url,
            required_params,
            path_params: path_params(&method.parameters),
            params: method
                .parameters
                .iter()
                .map(|(name, p)| ParamView::new(name, p))
                .collect(),
            params_interface,
            has_request: request_type.is_some(),
            request_type: request_type.unwrap_or_default(),
            response_type,
            call_path,
            scopes,
        }
    }
}

/// A property on a class pointing at a resource class.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    pub property: String,
    pub class_name: String,
}

#[derive(Debug, Clone)]
pub struct ResourceView {
    pub class_name: String,
    pub children: Vec<ResourceRef>,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: String,
    pub ty: String,
    pub description: String,
}

/// One `Schema$Name` declaration: an interface, or a type alias for
/// schemas that are not plain objects.
#[derive(Debug, Clone)]
pub struct SchemaView {
    pub type_name: String,
    pub description: String,
    pub fields: Vec<FieldView>,
    pub is_alias: bool,
    pub alias: String,
}

impl SchemaView {
    pub fn new(name: &str, item: &SchemaItem) -> Self {
        let description = doc_text(item.description.as_deref().unwrap_or_default());
        match &item.kind {
            SchemaKind::Object(props) => Self {
                type_name: reference_type(name),
                description,
                fields: props
                    .iter()
                    .map(|(field, prop)| FieldView {
                        name: sanitize_property_name(field),
                        ty: map_type(prop),
                        description: doc_text(prop.description.as_deref().unwrap_or_default()),
                    })
                    .collect(),
                is_alias: false,
                alias: String::new(),
            },
            _ => Self {
                type_name: reference_type(name),
                description,
                fields: Vec::new(),
                is_alias: true,
                alias: map_type(item),
            },
        }
    }
}

/// The whole discovery document, reshaped for the templates.
#[derive(Debug, Clone)]
pub struct ApiView {
    pub name: String,
    pub version: String,
    pub namespace: String,
    pub class_name: String,
    pub title: String,
    pub description: String,
    pub root_url: String,
    pub documentation_link: String,
    pub standard_params: Vec<ParamView>,
    pub schemas: Vec<SchemaView>,
    pub root_resources: Vec<ResourceRef>,
    pub root_methods: Vec<MethodView>,
    /// Every resource class, depth-first
    pub resources: Vec<ResourceView>,
}

impl ApiView {
    pub fn new(doc: &RestDescription) -> Self {
        let mut resources = Vec::new();
        let root_resources = resource_classes(doc, doc, "Resource", &mut resources);
        Self {
            name: doc.name.clone(),
            version: doc.version.clone(),
            namespace: namespace_for(&doc.name, &doc.version),
            class_name: class_name(&doc.name),
            title: one_line(&doc.title),
            description: doc_text(&doc.description),
            root_url: doc.root_url.clone(),
            documentation_link: doc.documentation_link.clone().unwrap_or_default(),
            standard_params: doc
                .parameters
                .iter()
                .map(|(name, p)| ParamView::new(name, p))
                .collect(),
            schemas: doc
                .schemas
                .iter()
                .map(|(name, item)| SchemaView::new(name, item))
                .collect(),
            root_resources,
            root_methods: doc
                .methods
                .values()
                .map(|m| MethodView::new(doc, m))
                .collect(),
            resources,
        }
    }
}

/// Push a [`ResourceView`] for every child of `node` (and their children),
/// returning the property refs `node`'s own class should declare.
fn resource_classes<T: MethodTree + ?Sized>(
    doc: &RestDescription,
    node: &T,
    prefix: &str,
    out: &mut Vec<ResourceView>,
) -> Vec<ResourceRef> {
    let mut refs = Vec::new();
    for (name, resource) in node.resources() {
        let class = format!("{prefix}${}", class_name(name));
        refs.push(ResourceRef {
            property: camel_case(name),
            class_name: class.clone(),
        });
        let slot = out.len();
        out.push(ResourceView {
            class_name: class.clone(),
            children: Vec::new(),
            methods: resource
                .methods
                .values()
                .map(|m| MethodView::new(doc, m))
                .collect(),
        });
        let children = resource_classes(doc, resource, &class, out);
        out[slot].children = children;
    }
    refs
}

/// Pretty-printed JSON split into lines for comment blocks.
pub fn example_lines(example: Option<&Value>) -> Vec<String> {
    example
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Versions of one API found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    /// File stem of the binding, e.g. `v3`
    pub version: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersions {
    pub name: String,
    pub class_name: String,
    pub versions: Vec<VersionEntry>,
}

impl ApiVersions {
    pub fn new(name: &str, versions: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.to_string(),
            class_name: class_name(name),
            versions: versions
                .into_iter()
                .map(|v| VersionEntry {
                    namespace: namespace_for(name, &v),
                    version: v,
                })
                .collect(),
        }
    }
}

/// A renderable output file with a known template name.
pub trait Artifact: Template {
    const TEMPLATE: &'static str;

    fn render_artifact(&self) -> Result<String> {
        self.render().map_err(|source| GenerateError::Render {
            template: Self::TEMPLATE,
            source,
        })
    }
}

/// `{api}/{version}.ts`
#[derive(Template)]
#[template(path = "api-endpoint.ts.txt", escape = "none")]
pub struct BindingTemplate<'a> {
    pub api: &'a ApiView,
}

impl Artifact for BindingTemplate<'_> {
    const TEMPLATE: &'static str = "api-endpoint.ts.txt";
}

/// `{api}/samples/{version}/{method_id}.js`
#[derive(Template)]
#[template(path = "sample.js.txt", escape = "none")]
pub struct SampleTemplate<'a> {
    pub api: &'a ApiView,
    pub method: &'a MethodView,
    pub request_example: Option<Value>,
    pub response_example: Option<Value>,
    pub has_request_example: bool,
    pub request_lines: Vec<String>,
    pub has_response_example: bool,
    pub response_lines: Vec<String>,
}

impl<'a> SampleTemplate<'a> {
    pub fn new(
        api: &'a ApiView,
        method: &'a MethodView,
        request_example: Option<Value>,
        response_example: Option<Value>,
    ) -> Self {
        Self {
            api,
            method,
            has_request_example: request_example.is_some(),
            request_lines: example_lines(request_example.as_ref()),
            has_response_example: response_example.is_some(),
            response_lines: example_lines(response_example.as_ref()),
            request_example,
            response_example,
        }
    }
}

impl Artifact for SampleTemplate<'_> {
    const TEMPLATE: &'static str = "sample.js.txt";
}

/// `{api}/index.ts`
#[derive(Template)]
#[template(path = "api-index.ts.txt", escape = "none")]
pub struct ApiIndexTemplate<'a> {
    pub api: &'a ApiVersions,
}

impl Artifact for ApiIndexTemplate<'_> {
    const TEMPLATE: &'static str = "api-index.ts.txt";
}

/// `{api}/package.json`
#[derive(Template)]
#[template(path = "package.json.txt", escape = "none")]
pub struct PackageJsonTemplate<'a> {
    pub name: &'a str,
    /// Description as a JSON string literal, quotes included
    pub desc_json: String,
}

impl<'a> PackageJsonTemplate<'a> {
    pub fn new(name: &'a str, desc: &str) -> Self {
        Self {
            name,
            desc_json: Value::String(desc.to_string()).to_string(),
        }
    }
}

impl Artifact for PackageJsonTemplate<'_> {
    const TEMPLATE: &'static str = "package.json.txt";
}

/// `{api}/README.md`
#[derive(Template)]
#[template(path = "README.md.txt", escape = "none")]
pub struct ReadmeTemplate<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

impl Artifact for ReadmeTemplate<'_> {
    const TEMPLATE: &'static str = "README.md.txt";
}

/// `{api}/tsconfig.json`
#[derive(Template)]
#[template(path = "tsconfig.json.txt", escape = "none")]
pub struct TsconfigTemplate;

impl Artifact for TsconfigTemplate {
    const TEMPLATE: &'static str = "tsconfig.json.txt";
}

/// `{api}/webpack.config.js`
#[derive(Template)]
#[template(path = "webpack.config.js.txt", escape = "none")]
pub struct WebpackConfigTemplate<'a> {
    pub name: &'a str,
    pub class_name: &'a str,
}

impl Artifact for WebpackConfigTemplate<'_> {
    const TEMPLATE: &'static str = "webpack.config.js.txt";
}

/// `{output_root}/index.ts`
#[derive(Template)]
#[template(path = "index.ts.txt", escape = "none")]
pub struct IndexTemplate<'a> {
    pub apis: &'a [ApiVersions],
}

impl Artifact for IndexTemplate<'_> {
    const TEMPLATE: &'static str = "index.ts.txt";
}

/// Repository-root `index.ts`
#[derive(Template)]
#[template(path = "root-index.ts.txt", escape = "none")]
pub struct RootIndexTemplate<'a> {
    pub apis: &'a [ApiVersions],
}

impl Artifact for RootIndexTemplate<'_> {
    const TEMPLATE: &'static str = "root-index.ts.txt";
}

/// Create `dir` and any missing parents.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| GenerateError::io(dir, e))
}

/// Render `artifact` and write it to `path`, creating parent directories.
pub async fn write_artifact<A: Artifact>(path: &Path, artifact: &A) -> Result<()> {
    let rendered = artifact.render_artifact()?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(path, rendered)
        .await
        .map_err(|e| GenerateError::io(path, e))?;
    tracing::debug!(path = %path.display(), template = A::TEMPLATE, "wrote artifact");
    Ok(())
}

/// Write the five per-API packaging files into `dir`.
pub async fn write_package_files(dir: &Path, api: &ApiVersions, desc: &str) -> Result<()> {
    write_artifact(&dir.join("index.ts"), &ApiIndexTemplate { api }).await?;
    write_artifact(
        &dir.join("package.json"),
        &PackageJsonTemplate::new(&api.name, desc),
    )
    .await?;
    write_artifact(
        &dir.join("README.md"),
        &ReadmeTemplate {
            name: &api.name,
            desc,
        },
    )
    .await?;
    write_artifact(&dir.join("tsconfig.json"), &TsconfigTemplate).await?;
    write_artifact(
        &dir.join("webpack.config.js"),
        &WebpackConfigTemplate {
            name: &api.name,
            class_name: &api.class_name,
        },
    )
    .await
}
