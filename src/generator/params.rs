//! Parameter, path and comment helpers shared by the binding and sample views.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::discovery::{Parameter, ParameterLocation};

/// Parameter names that would shadow identifiers reserved by the client runtime.
pub const RESERVED_PARAMS: &[&str] = &["resource", "media", "auth"];

#[allow(clippy::expect_used)]
static PLURAL_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^?(\w+)s/\[\^/\]\+\$?").expect("plural segment regex is valid")
});

#[allow(clippy::expect_used)]
static DUPLICATE_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:]/)/+").expect("duplicate slash regex is valid"));

/// Names of the parameters bound into the URL path, in declaration order.
pub fn path_params(params: &IndexMap<String, Parameter>) -> Vec<String> {
    params
        .iter()
        .filter(|(_, p)| p.location == ParameterLocation::Path)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Suffix a parameter name with `_` when it collides with [`RESERVED_PARAMS`].
pub fn sanitize_param_name(name: &str) -> String {
    if RESERVED_PARAMS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Quote a property name that is not a bare identifier (`-`, `@` or `.`).
pub fn sanitize_property_name(name: &str) -> String {
    if name.contains(['-', '@', '.']) {
        format!("'{name}'")
    } else {
        name.to_string()
    }
}

/// Turn a parameter pattern into an example path.
///
/// `^projects/[^/]+$` becomes `projects/my-project`. Only the
/// `<word>s/[^/]+` segment shape is rewritten; anything else is returned with
/// its anchors stripped and otherwise untouched. A missing pattern yields `""`.
pub fn humanize_path_pattern(pattern: Option<&str>) -> String {
    let Some(pattern) = pattern else {
        return String::new();
    };
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    let pattern = pattern.strip_suffix('$').unwrap_or(pattern);
    PLURAL_SEGMENT
        .replace_all(pattern, "${1}s/my-${1}")
        .into_owned()
}

/// `well-known` → `wellKnown`. Names without hyphens are returned unchanged.
pub fn camel_case(name: &str) -> String {
    if !name.contains('-') {
        return name.to_string();
    }
    name.split('-')
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                return part.to_string();
            }
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Collapse runs of `/` except directly after a scheme colon.
pub fn collapse_duplicate_slashes(url: &str) -> String {
    DUPLICATE_SLASHES.replace_all(url, "${1}").into_owned()
}

pub fn one_line(text: &str) -> String {
    text.replace('\n', " ")
}

/// Neutralise comment delimiters so text can sit inside a `/* */` block.
pub fn clean_comments(text: &str) -> String {
    text.replace("*/", "x/").replace("/*", "/x")
}

/// Like [`clean_comments`] but for path templates, which also carry literal `\n`.
pub fn clean_paths(text: &str) -> String {
    text.replace("/*/", "/x/")
        .replace("/*`", "/x")
        .replace("*/", "x/")
        .replace("\\n", "x/")
}

/// Escape text for a single-quoted JS string literal.
pub fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
