use std::fmt::Write;

use super::blob::RenderedView;
use crate::config::DateFormat;

/// Plain-text layout: header, `N | text` rows, then navigation links.
pub fn format(view: &RenderedView, date_format: DateFormat) -> String {
    let header = &view.header;
    let commit = &header.commit;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  {} bytes",
        header.path, header.permission_string, header.byte_size
    );
    let _ = writeln!(
        out,
        "commit {}  {}  {}",
        commit.short_id,
        commit.author,
        commit.format_time(date_format)
    );
    if !commit.message.is_empty() {
        let _ = writeln!(out, "    {}", commit.message);
    }
    out.push('\n');

    let width = view.rows.last().map(|r| digits(r.index)).unwrap_or(1);
    for row in &view.rows {
        if row.text.is_empty() {
            let _ = writeln!(out, "{:>width$} |", row.index, width = width);
        } else {
            let _ = writeln!(out, "{:>width$} | {}", row.index, row.text, width = width);
        }
    }

    if !view.rows.is_empty() {
        out.push('\n');
    }
    for link in &view.links {
        let _ = writeln!(out, "{}: {}", link.kind.label(), link.href);
    }

    out
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
