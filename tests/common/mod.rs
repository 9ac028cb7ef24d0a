#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures {
    use serde_json::{json, Value};

    /// Smallest useful discovery document: one resource, one method whose
    /// request and response both resolve to single-property schemas.
    pub fn minimal_doc(name: &str, version: &str) -> Value {
        json!({
            "kind": "discovery#restDescription",
            "id": format!("{name}:{version}"),
            "name": name,
            "version": version,
            "title": format!("{name} API"),
            "description": format!("The {name} API."),
            "rootUrl": format!("https://{name}.example.test/"),
            "servicePath": "",
            "auth": {"oauth2": {"scopes": {
                "https://www.googleapis.com/auth/cloud-platform": {"description": "All"}
            }}},
            "schemas": {
                "CreateWidgetRequest": {
                    "id": "CreateWidgetRequest",
                    "type": "object",
                    "properties": {"title": {"type": "string"}}
                },
                "Widget": {
                    "id": "Widget",
                    "type": "object",
                    "properties": {"name": {"type": "string"}}
                }
            },
            "resources": {
                "widgets": {
                    "methods": {
                        "create": {
                            "id": format!("{name}.widgets.create"),
                            "path": format!("{version}/{{+parent}}/widgets"),
                            "httpMethod": "POST",
                            "parameters": {
                                "parent": {
                                    "type": "string",
                                    "location": "path",
                                    "required": true,
                                    "pattern": "^projects/[^/]+$"
                                }
                            },
                            "parameterOrder": ["parent"],
                            "request": {"$ref": "CreateWidgetRequest"},
                            "response": {"$ref": "Widget"}
                        }
                    }
                }
            }
        })
    }

    pub fn discovery_url(name: &str, version: &str) -> String {
        format!("https://discovery.example.test/{name}/{version}/rest")
    }

    /// Directory listing entry pointing at [`discovery_url`].
    pub fn directory_item(name: &str, version: &str) -> Value {
        json!({
            "kind": "discovery#directoryItem",
            "id": format!("{name}:{version}"),
            "name": name,
            "version": version,
            "title": format!("{name} API"),
            "description": format!("Manages {name} resources."),
            "discoveryRestUrl": discovery_url(name, version),
            "preferred": true
        })
    }

    pub fn directory_list(items: &[(&str, &str)]) -> Value {
        json!({
            "kind": "discovery#directoryList",
            "items": items.iter().map(|(n, v)| directory_item(n, v)).collect::<Vec<_>>()
        })
    }

    pub const LIST_URL: &str = "https://discovery.example.test/apis";
}

pub mod mock_transport {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use apigen::error::{GenerateError, Result};
    use apigen::request::{RequestSpec, Transport};
    use async_trait::async_trait;
    use serde_json::Value;

    /// Canned JSON bodies keyed by URL. Unknown URLs fail like an HTTP 404.
    #[derive(Default)]
    pub struct MockTransport {
        responses: HashMap<String, Value>,
        requests: Mutex<Vec<RequestSpec>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: impl Into<String>, body: Value) -> Self {
            self.responses.insert(url.into(), body);
            self
        }

        /// Every request seen, in arrival order.
        pub fn requests(&self) -> Vec<RequestSpec> {
            self.requests.lock().unwrap().clone()
        }

        pub fn requested(&self, url: &str) -> bool {
            self.requests().iter().any(|r| r.url == url)
        }

        /// Highest number of requests observed in flight at once.
        pub fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn request(&self, spec: &RequestSpec) -> Result<Value> {
            self.requests.lock().unwrap().push(spec.clone());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.responses
                .get(&spec.url)
                .cloned()
                .ok_or_else(|| GenerateError::fetch(&spec.url, "HTTP 404 Not Found"))
        }
    }
}

pub mod output {
    use std::path::Path;

    /// File names directly under `dir` with the given extension, sorted.
    pub fn files_with_ext(dir: &Path, ext: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(&format!(".{ext}")))
            .collect();
        names.sort();
        names
    }

    pub fn read(path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }
}
