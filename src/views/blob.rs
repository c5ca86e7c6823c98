use serde::Serialize;

use crate::config::{LinkKind, LinkTemplates};
use crate::git::{BlobContent, BlobMetadata, CommitInfo};

/// View-model for one blob: header, numbered rows and navigation links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub header: ViewHeader,
    pub rows: Vec<LineRow>,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewHeader {
    pub repository: String,
    pub path: String,
    pub permission_string: String,
    pub byte_size: u64,
    pub commit: CommitInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRow {
    pub index: usize,
    pub anchor: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub kind: LinkKind,
    pub href: String,
}

impl RenderedView {
    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, anchor: &str) -> Option<&LineRow> {
        let index: usize = anchor.strip_prefix('L')?.parse().ok()?;
        self.rows.get(index.checked_sub(1)?)
    }

    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.href.as_str())
    }
}

/// Deep-link identifier for a 1-based line index.
pub fn anchor(index: usize) -> String {
    format!("L{}", index)
}

pub struct BlobRenderer {
    repository: String,
    links: LinkTemplates,
}

impl BlobRenderer {
    pub fn new(repository: impl Into<String>, links: LinkTemplates) -> Self {
        Self {
            repository: repository.into(),
            links,
        }
    }

    pub fn render(&self, metadata: &BlobMetadata, content: &BlobContent) -> RenderedView {
        let rows: Vec<LineRow> = content
            .lines()
            .iter()
            .enumerate()
            .map(|(i, text)| LineRow {
                index: i + 1,
                anchor: anchor(i + 1),
                text: text.clone(),
            })
            .collect();

        let links = LinkKind::ALL
            .iter()
            .map(|&kind| NavLink {
                kind,
                href: self
                    .links
                    .expand(kind, &self.repository, &metadata.path, &metadata.commit.id),
            })
            .collect();

        tracing::debug!("rendered {} ({} lines)", metadata.path, rows.len());

        RenderedView {
            header: ViewHeader {
                repository: self.repository.clone(),
                path: metadata.path.clone(),
                permission_string: metadata.permission_string.clone(),
                byte_size: metadata.byte_size,
                commit: metadata.commit.clone(),
            },
            rows,
            links,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn sample_metadata(path: &str, byte_size: u64) -> BlobMetadata {
        BlobMetadata {
            path: path.to_string(),
            byte_size,
            permission_string: "-rw-r--r--".to_string(),
            commit: CommitInfo {
                id: "8d5c1a0b9e2f4c6d7a8b9c0d1e2f3a4b5c6d7e8f".to_string(),
                short_id: "8d5c1a0".to_string(),
                message: "Add license".to_string(),
                author: "Test User".to_string(),
                email: "test@test.com".to_string(),
                time: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
            },
        }
    }

    fn renderer() -> BlobRenderer {
        BlobRenderer::new("solo2", LinkTemplates::default())
    }

    #[test]
    fn test_one_row_per_line_in_order() {
        let content = BlobContent::from_text("alpha\nbeta\ngamma\n");
        let view = renderer().render(&sample_metadata("a.txt", 17), &content);

        assert_eq!(view.line_count(), 3);
        let indexes: Vec<usize> = view.rows.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        let texts: Vec<&str> = view.rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_duplicate_lines_are_not_collapsed() {
        let content = BlobContent::from_text("same\nsame\n\nsame");
        let view = renderer().render(&sample_metadata("dup.txt", 15), &content);
        assert_eq!(view.line_count(), 4);
        assert_eq!(view.rows[3].anchor, "L4");
    }

    #[test]
    fn test_anchor_matches_index() {
        let text: String = (1..=208).map(|i| format!("line {}\n", i)).collect();
        let content = BlobContent::from_text(&text);
        let view = renderer().render(&sample_metadata("LICENSE-APACHE", text.len() as u64), &content);

        assert_eq!(view.line_count(), 208);
        for row in &view.rows {
            assert_eq!(row.anchor, format!("L{}", row.index));
        }
        let last = view.row("L208").unwrap();
        assert_eq!(last.text, "line 208");
        assert!(view.row("L209").is_none());
        assert!(view.row("L0").is_none());
        assert!(view.row("208").is_none());
    }

    #[test]
    fn test_empty_file_has_header_and_no_rows() {
        let view = renderer().render(&sample_metadata("empty", 0), &BlobContent::default());

        assert!(view.rows.is_empty());
        assert_eq!(view.header.path, "empty");
        assert_eq!(view.header.byte_size, 0);
        assert_eq!(view.header.permission_string, "-rw-r--r--");
        assert_eq!(view.links.len(), 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let content = BlobContent::from_text("a\nb\n");
        let meta = sample_metadata("a.txt", 4);
        let r = renderer();

        let first = r.render(&meta, &content);
        let second = r.render(&meta, &content);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_navigation_links() {
        let view = renderer().render(&sample_metadata("LICENSE-APACHE", 0), &BlobContent::default());
        let id = "8d5c1a0b9e2f4c6d7a8b9c0d1e2f3a4b5c6d7e8f";

        let kinds: Vec<LinkKind> = view.links.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LinkKind::History, LinkKind::Blame, LinkKind::Raw]);
        assert_eq!(
            view.link(LinkKind::Raw),
            Some(format!("/solo2/plain/LICENSE-APACHE?id={}", id).as_str())
        );
        assert_eq!(
            view.link(LinkKind::Blame),
            Some(format!("/solo2/blame/LICENSE-APACHE?id={}", id).as_str())
        );
    }

    #[test]
    fn test_json_shape() {
        let content = BlobContent::from_text("x");
        let view = renderer().render(&sample_metadata("x.txt", 1), &content);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["header"]["path"], "x.txt");
        assert_eq!(json["header"]["commit"]["short_id"], "8d5c1a0");
        assert_eq!(json["rows"][0]["anchor"], "L1");
        assert_eq!(json["links"][2]["kind"], "raw");
    }
}
