use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::config::DateFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub id: String,
    pub short_id: String,
    pub message: String,
    pub author: String,
    pub email: String,
    pub time: DateTime<Utc>,
}

impl CommitInfo {
    pub fn from_commit(commit: &git2::Commit) -> Self {
        let id = commit.id().to_string();
        let author = commit.author();

        Self {
            short_id: short_id(&id),
            id,
            message: commit.summary().unwrap_or("").to_string(),
            author: author.name().unwrap_or("").to_string(),
            email: author.email().unwrap_or("").to_string(),
            time: Utc
                .timestamp_opt(commit.time().seconds(), 0)
                .single()
                .unwrap_or_default(),
        }
    }

    pub fn format_time(&self, format: DateFormat) -> String {
        match format {
            DateFormat::Iso => self.time.format("%Y-%m-%d %H:%M:%S %z").to_string(),
            DateFormat::Local => self
                .time
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %z")
                .to_string(),
            DateFormat::Relative => self.relative_to(Utc::now()),
        }
    }

    pub fn relative_to(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.time).num_seconds();

        if diff < 60 {
            "just now".to_string()
        } else if diff < 3600 {
            plural(diff / 60, "minute")
        } else if diff < 86400 {
            plural(diff / 3600, "hour")
        } else if diff < 2592000 {
            plural(diff / 86400, "day")
        } else if diff < 31536000 {
            plural(diff / 2592000, "month")
        } else {
            plural(diff / 31536000, "year")
        }
    }
}

pub fn short_id(id: &str) -> String {
    id[..7.min(id.len())].to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
