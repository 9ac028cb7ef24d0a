use indexmap::IndexMap;

use crate::discovery::{Method, Resource, RestDescription};

/// Anything that owns methods and child resources: the document root or a resource.
pub trait MethodTree {
    fn methods(&self) -> &IndexMap<String, Method>;
    fn resources(&self) -> &IndexMap<String, Resource>;
}

impl MethodTree for RestDescription {
    fn methods(&self) -> &IndexMap<String, Method> {
        &self.methods
    }

    fn resources(&self) -> &IndexMap<String, Resource> {
        &self.resources
    }
}

impl MethodTree for Resource {
    fn methods(&self) -> &IndexMap<String, Method> {
        &self.methods
    }

    fn resources(&self) -> &IndexMap<String, Resource> {
        &self.resources
    }
}

/// Flatten every method reachable from `node`, depth-first and pre-order.
///
/// A node's own methods come first in mapping order, then each child
/// resource's methods in turn.
pub fn collect_methods<T: MethodTree + ?Sized>(node: &T) -> Vec<&Method> {
    let mut methods: Vec<&Method> = node.methods().values().collect();
    for child in node.resources().values() {
        methods.extend(collect_methods(child));
    }
    methods
}
