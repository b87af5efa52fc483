//! Page text extraction for web search hits.

use scraper::{ElementRef, Html, Node};

use crate::client::status_error;
use crate::error::ScraperError;

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Fetch `url` and return its visible text.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] on network failure or timeout, and
/// [`ScraperError::UnexpectedStatus`] / [`ScraperError::RateLimited`] for
/// non-2xx responses. Callers treat any error as an empty page.
pub async fn fetch_page_text(client: &reqwest::Client, url: &str) -> Result<String, ScraperError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, url));
    }
    let body = response.text().await?;
    Ok(html_to_text(&body))
}

/// Convert an HTML document into whitespace-collapsed visible text.
///
/// `script`, `style` and `noscript` subtrees are dropped; remaining text
/// nodes are joined with single spaces.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut parts = Vec::new();
    push_text(doc.root_element(), &mut parts);
    parts
        .iter()
        .flat_map(|p| p.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_text<'a>(el: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push(&**text),
            Node::Element(inner) if !SKIPPED_ELEMENTS.contains(&inner.name()) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_styles_and_tags() {
        let html = r#"<html><head><title>Fans</title><style>p { color: red }</style></head>
<body><script>var atomberg = 1;</script><noscript>enable js</noscript>
<h1>Top  fans</h1><p>Atomberg   and<b>Havells</b></p></body></html>"#;
        assert_eq!(html_to_text(html), "Fans Top fans Atomberg and Havells");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(html_to_text("<p>Usha &amp; Bajaj</p>"), "Usha & Bajaj");
    }

    #[test]
    fn empty_document_is_empty_text() {
        assert_eq!(html_to_text(""), "");
    }
}
