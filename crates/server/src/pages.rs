//! HTML pages: the front page and the color preview.

use hexrgb_core::Color;

const DEFAULT_BACKGROUND: &str = "#fff";

/// Escapes text for inclusion in HTML content or a quoted attribute.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Page shell shared by every HTML response. `body` is trusted markup.
fn page(background: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body style=\"background-color: {bg}; font-family: sans-serif; padding: 1rem;\">\n{body}\n</body>\n</html>\n",
        bg = escape_html(background),
    )
}

/// Informational landing page with one example link per endpoint.
pub fn front_page() -> String {
    page(
        DEFAULT_BACKGROUND,
        concat!(
            "<h1>Color Converter app</h1>\n",
            "<ul>\n",
            "<li><a href=\"/hex-to-rgb?hex=%23C0FFEE\">Convert HEX to RGB</a> (try with <code>?hex=#C0FFEE</code>)</li>\n",
            "<li><a href=\"/rgb-to-hex?r=176&amp;g=0&amp;b=181\">Convert RGB to HEX</a> (try with <code>?r=176&amp;g=0&amp;b=181</code>)</li>\n",
            "<li><a href=\"/preview?hex=%23BADA55\">Preview color from HEX</a> (try with <code>?hex=#BADA55</code>)</li>\n",
            "</ul>",
        ),
    )
}

/// Page whose background is `color`, headed by its HEX and channel JSON.
pub fn preview_page(color: Color, channels_json: &str) -> String {
    let hex = color.to_hex();
    let heading = format!(
        "<h1>Color Preview: {}, {}</h1>",
        escape_html(&hex),
        escape_html(channels_json)
    );
    page(&hex, &heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("#BADA55"), "#BADA55");
    }

    #[test]
    fn front_page_links_every_endpoint() {
        let html = front_page();
        assert!(html.contains("background-color: #fff"));
        assert!(html.contains("/hex-to-rgb?hex=%23C0FFEE"));
        assert!(html.contains("/rgb-to-hex?r=176&amp;g=0&amp;b=181"));
        assert!(html.contains("/preview?hex=%23BADA55"));
    }

    #[test]
    fn preview_page_uses_color_as_background() {
        let html = preview_page(Color::new(186, 218, 85), r#"{"r":186,"g":218,"b":85}"#);
        assert!(html.contains("background-color: #BADA55;"));
        assert!(html.contains("Color Preview: #BADA55, {&quot;r&quot;:186"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
