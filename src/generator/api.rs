use std::path::PathBuf;

use tracing::{debug, info};

use super::example::example_for_ref;
use super::methods::collect_methods;
use super::templates::{
    ensure_dir, write_artifact, ApiView, BindingTemplate, MethodView, SampleTemplate,
};
use super::Generator;
use crate::discovery::{parse_description, read_description, DiscoverySource, RestDescription};
use crate::error::Result;
use crate::request::{RequestSpec, Transport};

impl<T: Transport> Generator<T> {
    /// Generate the binding and samples for one discovery document.
    ///
    /// `source` is a URL or a local path (see [`DiscoverySource::parse`]).
    /// Returns the path of the written binding. Files written before a failure
    /// stay on disk.
    pub async fn generate_api(&self, source: &str) -> Result<PathBuf> {
        let key = source;
        let source = DiscoverySource::parse(source);

        self.state.record(key, "Starting discovery doc request...");
        let doc = self.load_description(&source).await?;
        self.state.record(key, "Discovery doc request complete.");

        self.state.record(key, "Generating templates...");
        let binding = self.generate_description(&doc).await?;
        self.state.record(key, "Template generation complete.");

        info!(api = %doc.name, version = %doc.version, path = %binding.display(), "generated API");
        Ok(binding)
    }

    async fn load_description(&self, source: &DiscoverySource) -> Result<RestDescription> {
        match source {
            DiscoverySource::Local(path) => {
                debug!(path = %path.display(), "reading local discovery document");
                read_description(path).await
            }
            DiscoverySource::Remote(url) => {
                debug!(url = %url, "fetching discovery document");
                let body = self.requests.enqueue(RequestSpec::get(url.as_str())).await?;
                parse_description(url.as_str(), body)
            }
        }
    }

    /// Write `{api}/{version}.ts` and one sample per method for an already
    /// parsed document.
    pub async fn generate_description(&self, doc: &RestDescription) -> Result<PathBuf> {
        let api_dir = self.options.output_root.join(&doc.name);
        let view = ApiView::new(doc);

        ensure_dir(&api_dir).await?;
        let binding = api_dir.join(format!("{}.ts", doc.version));
        write_artifact(&binding, &BindingTemplate { api: &view }).await?;

        let samples_dir = api_dir.join("samples").join(&doc.version);
        let methods = collect_methods(doc);
        debug!(api = %doc.name, count = methods.len(), "writing samples");
        for method in methods {
            let method_view = MethodView::new(doc, method);
            let response = example_for_ref(
                method.response.as_ref().and_then(|r| r.reference.as_deref()),
                &doc.schemas,
            );
            let request = example_for_ref(
                method.request.as_ref().and_then(|r| r.reference.as_deref()),
                &doc.schemas,
            );
            let sample = SampleTemplate::new(&view, &method_view, request, response);
            write_artifact(&samples_dir.join(format!("{}.js", method.id)), &sample).await?;
        }

        Ok(binding)
    }
}
