use clap::ValueEnum;

use crate::config::Config;
use crate::error::Result;
use crate::git::BlobStore;
use crate::views::{self, BlobRenderer, RenderedView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
    Raw,
}

/// Resolves view requests against a store and renders the result.
pub struct App<S: BlobStore> {
    pub store: S,
    pub config: Config,
    pub repository_id: String,
    renderer: BlobRenderer,
}

impl<S: BlobStore> App<S> {
    pub fn new(store: S, config: Config, repository_id: impl Into<String>) -> Self {
        let repository_id = repository_id.into();
        let renderer = BlobRenderer::new(repository_id.clone(), config.links.clone());
        Self {
            store,
            config,
            repository_id,
            renderer,
        }
    }

    /// Fetch and render. Store failures are returned before any rendering.
    pub fn view(&self, reference: &str, path: &str) -> Result<RenderedView> {
        let (metadata, content) = self
            .store
            .fetch_blob(&self.repository_id, reference, path)?;
        Ok(self.renderer.render(&metadata, &content))
    }

    pub fn raw(&self, reference: &str, path: &str) -> Result<Vec<u8>> {
        self.store.raw_blob(&self.repository_id, reference, path)
    }

    pub fn output(&self, reference: &str, path: &str, format: OutputFormat) -> Result<Vec<u8>> {
        let date_format = self.config.date_format;
        let bytes = match format {
            OutputFormat::Raw => self.raw(reference, path)?,
            OutputFormat::Text => views::text::format(&self.view(reference, path)?, date_format).into_bytes(),
            OutputFormat::Html => views::html::format(&self.view(reference, path)?, date_format).into_bytes(),
            OutputFormat::Json => {
                let mut json = serde_json::to_vec_pretty(&self.view(reference, path)?)?;
                json.push(b'\n');
                json
            }
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::{BlobContent, BlobMetadata, CommitInfo};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    /// In-memory store keyed by (ref, path).
    #[derive(Default)]
    struct MemoryStore {
        blobs: HashMap<(String, String), Vec<u8>>,
    }

    impl MemoryStore {
        fn with(mut self, reference: &str, path: &str, bytes: &[u8]) -> Self {
            self.blobs
                .insert((reference.to_string(), path.to_string()), bytes.to_vec());
            self
        }

        fn lookup(&self, reference: &str, path: &str) -> Result<&Vec<u8>> {
            self.blobs
                .get(&(reference.to_string(), path.to_string()))
                .ok_or_else(|| Error::not_found(reference, path))
        }
    }

    impl BlobStore for MemoryStore {
        fn fetch_blob(
            &self,
            _repository_id: &str,
            reference: &str,
            path: &str,
        ) -> Result<(BlobMetadata, BlobContent)> {
            let bytes = self.lookup(reference, path)?;
            let content = BlobContent::from_bytes(path, bytes, 8000)?;
            let metadata = BlobMetadata {
                path: path.to_string(),
                byte_size: bytes.len() as u64,
                permission_string: "-rw-r--r--".to_string(),
                commit: CommitInfo {
                    id: format!("{:0<40}", reference),
                    short_id: reference.chars().take(7).collect(),
                    message: "Initial commit".to_string(),
                    author: "Test User".to_string(),
                    email: "test@test.com".to_string(),
                    time: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
                },
            };
            Ok((metadata, content))
        }

        fn raw_blob(&self, _repository_id: &str, reference: &str, path: &str) -> Result<Vec<u8>> {
            self.lookup(reference, path).cloned()
        }
    }

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::default()
            .with("main", "LICENSE-APACHE", b"Apache License\nVersion 2.0\n")
            .with("main", "empty", b"")
            .with("main", "logo.png", b"\x89PNG\0\0");
        App::new(store, Config::default(), "solo2")
    }

    #[test]
    fn test_view_renders_fetched_blob() {
        let view = app().view("main", "LICENSE-APACHE").unwrap();
        assert_eq!(view.header.repository, "solo2");
        assert_eq!(view.header.byte_size, 27);
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.rows[1].text, "Version 2.0");
    }

    #[test]
    fn test_not_found_propagates() {
        let err = app().view("main", "LICENSE-MIT").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        let err = app().output("dev", "LICENSE-APACHE", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_binary_is_unsupported_except_raw() {
        let app = app();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Html] {
            let err = app.output("main", "logo.png", format).unwrap_err();
            assert!(matches!(err, Error::Unsupported { .. }));
        }
        let raw = app.output("main", "logo.png", OutputFormat::Raw).unwrap();
        assert_eq!(raw, b"\x89PNG\0\0");
    }

    #[test]
    fn test_empty_file_outputs() {
        let app = app();
        let view = app.view("main", "empty").unwrap();
        assert!(view.rows.is_empty());

        let json: serde_json::Value =
            serde_json::from_slice(&app.output("main", "empty", OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["rows"], serde_json::json!([]));
        assert_eq!(json["header"]["byte_size"], 0);
    }

    #[test]
    fn test_output_is_byte_identical_across_calls() {
        let app = app();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Html] {
            let first = app.output("main", "LICENSE-APACHE", format).unwrap();
            let second = app.output("main", "LICENSE-APACHE", format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_links_follow_config() {
        let mut config = Config::default();
        config.links.raw = "https://git.example.com/{repo}/raw/{commit}/{path}".to_string();
        let store = MemoryStore::default().with("main", "a.txt", b"a");
        let app = App::new(store, config, "solo2");

        let view = app.view("main", "a.txt").unwrap();
        assert_eq!(
            view.links[2].href,
            format!("https://git.example.com/solo2/raw/{:0<40}/a.txt", "main")
        );
    }
}
