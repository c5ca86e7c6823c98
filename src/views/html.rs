use std::fmt::Write;

use super::blob::RenderedView;
use crate::config::DateFormat;

/// Structure-only HTML fragment. Classes name the parts; styling is left to
/// whatever page embeds the fragment.
pub fn format(view: &RenderedView, date_format: DateFormat) -> String {
    let header = &view.header;
    let commit = &header.commit;
    let mut out = String::new();

    out.push_str("<div class=\"blob-header\">\n");
    let _ = writeln!(
        out,
        "<span class=\"path\">{}</span> <span class=\"mode\">{}</span> <span class=\"size\">{} bytes</span>",
        escape(&header.path),
        escape(&header.permission_string),
        header.byte_size
    );
    let _ = writeln!(
        out,
        "<span class=\"commit\" title=\"{}\">{}</span> <span class=\"author\">{}</span> <span class=\"date\">{}</span> <span class=\"message\">{}</span>",
        escape(&commit.id),
        escape(&commit.short_id),
        escape(&commit.author),
        escape(&commit.format_time(date_format)),
        escape(&commit.message)
    );
    out.push_str("</div>\n");

    out.push_str("<table class=\"blob\">\n");
    for row in &view.rows {
        let _ = writeln!(
            out,
            "<tr id=\"{anchor}\"><td class=\"num\"><a href=\"#{anchor}\">{index}</a></td><td class=\"line\">{text}</td></tr>",
            anchor = row.anchor,
            index = row.index,
            text = escape(&row.text)
        );
    }
    out.push_str("</table>\n");

    out.push_str("<ul class=\"blob-links\">\n");
    for link in &view.links {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&link.href),
            link.kind.label()
        );
    }
    out.push_str("</ul>\n");

    out
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
