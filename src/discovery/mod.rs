//! Discovery document model and loaders.
//!
//! A discovery document describes one API: its identity, the named data
//! schemas, and a tree of resources whose leaves are methods. The directory
//! listing enumerates every API the discovery service knows about.

mod load;
mod types;

pub use load::{
    load_ignore_list, parse_description, parse_directory_list, read_description, DiscoverySource,
};
pub use types::{
    Auth, DirectoryItem, DirectoryList, MediaProtocol, MediaProtocols, MediaUpload, Method,
    OAuth2, Parameter, ParameterLocation, Resource, RestDescription, SchemaItem, SchemaKind,
    SchemaRef, ScopeInfo,
};
