//! Topic description formatting for rich-text views.
//!
//! # Invariants
//! - Paragraph text is HTML-escaped before being wrapped in markup.
//! - A blank description still renders a visible placeholder paragraph.

/// Rendered when a description has no non-blank paragraph.
pub const EMPTY_DESCRIPTION_HTML: &str = "<p>No description available.</p>";

/// Splits description text into trimmed, non-blank paragraphs.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Renders a description as a sequence of HTML paragraphs.
pub fn to_html(text: &str) -> String {
    let parts = paragraphs(text);
    if parts.is_empty() {
        return EMPTY_DESCRIPTION_HTML.to_string();
    }

    parts
        .into_iter()
        .map(|paragraph| {
            format!(
                "<p style='margin-bottom:12px'>{}</p>",
                html_escape::encode_quoted_attribute(paragraph)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{paragraphs, to_html, EMPTY_DESCRIPTION_HTML};

    #[test]
    fn paragraphs_drop_blank_lines_and_trim() {
        assert_eq!(
            paragraphs("  first  \n\n\r\nsecond\r\n"),
            vec!["first", "second"]
        );
    }

    #[test]
    fn to_html_wraps_each_paragraph() {
        assert_eq!(
            to_html("G1\nS"),
            "<p style='margin-bottom:12px'>G1</p><p style='margin-bottom:12px'>S</p>"
        );
    }

    #[test]
    fn to_html_escapes_markup() {
        let html = to_html("a < b & c");
        assert!(html.contains("a &lt; b &amp; c"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn to_html_falls_back_for_blank_text() {
        assert_eq!(to_html(" \n \n"), EMPTY_DESCRIPTION_HTML);
        assert_eq!(to_html(""), EMPTY_DESCRIPTION_HTML);
    }
}
