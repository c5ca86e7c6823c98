use serde::{Deserialize, Serialize};

/// Alternate views of the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    History,
    Blame,
    Raw,
}

impl LinkKind {
    pub const ALL: [LinkKind; 3] = [LinkKind::History, LinkKind::Blame, LinkKind::Raw];

    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::History => "history",
            LinkKind::Blame => "blame",
            LinkKind::Raw => "raw",
        }
    }
}

/// URL templates with `{repo}`, `{path}` and `{commit}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkTemplates {
    pub history: String,
    pub blame: String,
    pub raw: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            history: "/{repo}/log/{path}?id={commit}".to_string(),
            blame: "/{repo}/blame/{path}?id={commit}".to_string(),
            raw: "/{repo}/plain/{path}?id={commit}".to_string(),
        }
    }
}

impl LinkTemplates {
    pub fn template(&self, kind: LinkKind) -> &str {
        match kind {
            LinkKind::History => &self.history,
            LinkKind::Blame => &self.blame,
            LinkKind::Raw => &self.raw,
        }
    }

    pub fn expand(&self, kind: LinkKind, repo: &str, path: &str, commit: &str) -> String {
        // Single left-to-right pass so substituted values are never re-expanded.
        let template = self.template(kind);
        let mut out = String::with_capacity(template.len() + path.len() + commit.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let replaced = [("{repo}", repo), ("{path}", path), ("{commit}", commit)]
                .iter()
                .find(|(key, _)| tail.starts_with(key))
                .map(|(key, value)| (key.len(), *value));

            match replaced {
                Some((len, value)) => {
                    out.push_str(value);
                    rest = &tail[len..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}
