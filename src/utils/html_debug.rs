// src/utils/html_debug.rs
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::extractors::section::{ITEM_8_START_RE, ITEM_9_RE};
use crate::utils::error::StorageError;

/// Byte range of the filing to highlight, and its marker kind ("item8", "item9", ...).
pub type Highlight<'a> = (usize, usize, &'a str);

/// Wraps each highlight in a styled `<span>`. Highlights that overlap an
/// earlier one are dropped.
pub fn render_debug_html(html: &str, highlights: &[Highlight]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-item8 { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-item9 { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    let mut last_pos = 0;
    for (start, end, kind) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match kind {
            "item8" => "highlight-item8",
            "item9" => "highlight-item9",
            _ => "highlight-custom",
        };
        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, kind
        ));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    debug_html.push_str(&html[last_pos..]);
    debug_html.push_str("\n</body>\n</html>");
    debug_html
}

/// Highlights every match of the given patterns and writes the result to `path`.
/// Returns the number of matches found.
pub fn create_debug_html(html: &str, path: &Path, patterns: &[(&Regex, &str)]) -> Result<usize, StorageError> {
    let mut highlights = Vec::new();
    for (re, kind) in patterns {
        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *kind));
        }
    }

    fs::write(path, render_debug_html(html, &highlights))?;
    tracing::info!("Saved debug HTML with {} marker(s) to {}", highlights.len(), path.display());
    Ok(highlights.len())
}

/// Annotated copy of a filing with the ITEM 8 / ITEM 9 markers the section extractor sees.
pub fn annotate_section_markers(html: &str, path: &Path) -> Result<usize, StorageError> {
    create_debug_html(html, path, &[(&*ITEM_8_START_RE, "item8"), (&*ITEM_9_RE, "item9")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_markers() {
        let html = "intro ITEM 8. body ITEM 9. tail";
        let rendered = render_debug_html(html, &[(19, 25, "item9"), (6, 13, "item8")]);
        assert!(rendered.contains("intro <span class=\"highlight-item8\" title=\"Position: 6-13, Type: item8\">ITEM 8.</span>"));
        assert!(rendered.contains("<span class=\"highlight-item9\" title=\"Position: 19-25, Type: item9\">ITEM 9</span>. tail"));
    }

    #[test]
    fn test_overlapping_highlight_is_dropped() {
        let rendered = render_debug_html("abcdef", &[(0, 4, "item8"), (2, 5, "item9")]);
        assert_eq!(rendered.matches("<span").count(), 1);
        assert!(rendered.contains("abcd</span>ef"));
    }

    #[test]
    fn test_annotate_counts_markers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("debug.html");
        let count = annotate_section_markers("ITEM 8. x ITEM 9. y ITEM 8. z", &path).unwrap();
        assert_eq!(count, 3);
        assert!(fs::read_to_string(path).unwrap().contains("highlight-item9"));
    }
}
