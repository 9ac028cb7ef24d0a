use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use super::templates::{
    ensure_dir, write_artifact, write_package_files, ApiVersions, IndexTemplate, RootIndexTemplate,
};
use super::Generator;
use crate::discovery::{load_ignore_list, parse_directory_list, DirectoryItem, DirectoryList};
use crate::error::{GenerateError, Result};
use crate::request::{RequestSpec, Transport};

/// Outcome of a fleet run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetReport {
    /// Ids generated successfully, sorted
    pub generated: Vec<String>,
    /// Ids skipped by the ignore list, in listing order
    pub skipped: Vec<String>,
    /// `(id, error)` for each failed API, sorted by id
    pub failed: Vec<(String, String)>,
    /// APIs written into the aggregate indexes
    pub indexed: usize,
    /// Set when aggregate regeneration failed
    pub index_error: Option<String>,
}

impl FleetReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.index_error.is_none()
    }
}

/// Whether `file_name` inside an API directory is a version binding:
/// a `.ts` file that is neither a declaration file nor the API index.
pub fn is_version_binding(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext == "ts")
        && !file_name.ends_with(".d.ts")
        && file_name != "index.ts"
}

/// Names of the immediate subdirectories (or files) under `dir`, sorted.
async fn sorted_entries(dir: &Path, keep_dirs: bool) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| GenerateError::io(dir, e))?;
    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| GenerateError::io(dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| GenerateError::io(&entry.path(), e))?;
        let wanted = if keep_dirs {
            file_type.is_dir()
        } else {
            file_type.is_file()
        };
        if wanted {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Version bindings present in one API directory, sorted.
pub async fn scan_versions(api_dir: &Path) -> Result<Vec<String>> {
    Ok(sorted_entries(api_dir, false)
        .await?
        .into_iter()
        .filter(|name| is_version_binding(name))
        .filter_map(|name| name.strip_suffix(".ts").map(str::to_string))
        .collect())
}

impl<T: Transport> Generator<T> {
    /// Fetch the directory listing of available APIs.
    pub async fn fetch_api_list(&self, list_url: &str) -> Result<DirectoryList> {
        let mut spec = RequestSpec::get(list_url);
        if !self.options.include_private {
            spec = spec.header("X-User-Ip", "0.0.0.0");
        }
        let body = self.requests.enqueue(spec).await?;
        parse_directory_list(list_url, body)
    }

    /// Generate every listed API not named in the ignore file, then
    /// regenerate the aggregate outputs once all jobs have settled.
    ///
    /// Per-API failures are logged and reported, never propagated. Only a
    /// failure to fetch the listing or to read the ignore file aborts the run.
    pub async fn generate_all(&self, list_url: &str, ignore_file: &Path) -> Result<FleetReport> {
        let list = self.fetch_api_list(list_url).await?;
        let ignore = load_ignore_list(ignore_file).await?;
        let mut report = FleetReport::default();

        let mut scheduled = Vec::new();
        for item in &list.items {
            if ignore.contains(&item.id) {
                debug!(api = %item.id, "skipping ignored API");
                report.skipped.push(item.id.clone());
            } else {
                scheduled.push(item);
            }
        }
        info!(
            scheduled = scheduled.len(),
            skipped = report.skipped.len(),
            concurrency = self.options.api_concurrency,
            "generating APIs"
        );

        let outcomes: Vec<(&DirectoryItem, Result<PathBuf>)> = stream::iter(scheduled)
            .map(|item| async move { (item, self.run_job(item).await) })
            .buffer_unordered(self.options.api_concurrency.max(1))
            .collect()
            .await;

        for (item, outcome) in outcomes {
            match outcome {
                Ok(_) => report.generated.push(item.id.clone()),
                Err(e) => report.failed.push((item.id.clone(), e.to_string())),
            }
        }
        report.generated.sort();
        report.failed.sort();

        match self.generate_index(&list.items).await {
            Ok(indexed) => report.indexed = indexed,
            Err(e) => {
                error!(error = %e, "failed to regenerate aggregate index");
                error!("{}", self.state.dump_all());
                report.index_error = Some(e.to_string());
            }
        }

        info!(
            generated = report.generated.len(),
            failed = report.failed.len(),
            indexed = report.indexed,
            "fleet generation finished"
        );
        Ok(report)
    }

    async fn run_job(&self, item: &DirectoryItem) -> Result<PathBuf> {
        let key = item.discovery_rest_url.as_str();
        self.state.record(key, "Attempting first generateAPI call...");
        match self.generate_api(key).await {
            Ok(path) => {
                self.state.record(key, "GenerateAPI call success!");
                Ok(path)
            }
            Err(e) => {
                self.state
                    .record(key, format!("GenerateAPI call failed with error: {e}, moving on."));
                error!(api = %item.id, error = %e, "failed to generate API");
                error!("{}", self.state.dump(key));
                Err(e)
            }
        }
    }

    /// Fetch the listing for descriptions, then regenerate the aggregate outputs.
    pub async fn regenerate_index(&self, list_url: &str) -> Result<usize> {
        let list = self.fetch_api_list(list_url).await?;
        self.generate_index(&list.items).await
    }

    /// Rewrite the per-API packaging files and both aggregate indexes from
    /// whatever is on disk under the output root.
    ///
    /// `items` only supplies descriptions. Returns how many APIs were indexed.
    pub async fn generate_index(&self, items: &[DirectoryItem]) -> Result<usize> {
        let root = &self.options.output_root;
        ensure_dir(root).await?;

        let mut apis = Vec::new();
        for name in sorted_entries(root, true).await? {
            let api_dir = root.join(&name);
            let versions = scan_versions(&api_dir).await?;
            if versions.is_empty() {
                debug!(api = %name, "no version bindings, not indexed");
                continue;
            }
            let desc = match items.iter().find(|item| item.name == name) {
                Some(item) => item.description.as_str(),
                None => {
                    warn!(api = %name, "API missing from listing, using empty description");
                    ""
                }
            };
            let api = ApiVersions::new(&name, versions);
            write_package_files(&api_dir, &api, desc).await?;
            apis.push(api);
        }

        write_artifact(&root.join("index.ts"), &IndexTemplate { apis: &apis }).await?;
        write_artifact(
            &self.options.root_index_path(),
            &RootIndexTemplate { apis: &apis },
        )
        .await?;
        info!(apis = apis.len(), "aggregate index regenerated");
        Ok(apis.len())
    }
}
