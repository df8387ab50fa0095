use std::time::Duration;

use reqwest::{Client, StatusCode};
use scraper::{Html, Node};
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Largest page body read into memory.
pub const DEFAULT_MAX_PAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to access URL. Status code: {0}")]
    Status(u16),

    #[error("Page is larger than {limit} bytes")]
    TooLarge { limit: usize },
}

/// Fetches a single page and reduces it to plain text. No link following.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: Client,
    max_bytes: usize,
}

impl PageFetcher {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            max_bytes: DEFAULT_MAX_PAGE_BYTES,
        }
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self::new(http))
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// GET `url` and return its text content. Anything but 200 is a failure,
    /// as is a body over the size limit.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let mut resp = self.http.get(url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let limit = self.max_bytes;
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            return Err(FetchError::TooLarge { limit });
        }

        // Content-Length may be absent or wrong, so the cap is enforced while reading.
        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(html_to_text(&String::from_utf8_lossy(&body)))
    }
}

/// Elements that start a new line of text when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Text content of an HTML document. Block-level boundaries become a single
/// space so digits in adjacent cells or list items never fuse into one run;
/// inline markup (`<b>`, `<span>`, ...) adds nothing, so a number split
/// across inline tags stays whole.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut out = String::new();
    // (node, closing): closing entries mark the end of a block element.
    let mut stack = vec![(document.tree.root(), false)];
    while let Some((node, closing)) = stack.pop() {
        if closing {
            out.push(' ');
            continue;
        }

        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => {
                out.push(' ');
                stack.push((node, true));
            }
            _ => {}
        }

        for child in node.children().rev() {
            stack.push((child, false));
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_markup() {
        let html = "<html><body><h1>BIN list</h1><p>Visa <b>411111</b></p></body></html>";
        assert_eq!(html_to_text(html), "BIN list Visa 411111");
    }

    #[test]
    fn test_html_to_text_separates_cells() {
        let html = "<table><tr><td>123</td><td>456</td></tr></table>";
        assert_eq!(html_to_text(html), "123 456");
    }

    #[test]
    fn test_html_to_text_keeps_inline_markup_joined() {
        let html = "<p>BIN: 41<b>1111</b></p><p>next</p>";
        assert_eq!(html_to_text(html), "BIN: 411111 next");
    }

    #[test]
    fn test_html_to_text_separates_list_items() {
        let html = "<ul><li>411111</li><li>555555</li></ul>";
        assert_eq!(html_to_text(html), "411111 555555");
    }

    #[test]
    fn test_html_to_text_plain_input() {
        assert_eq!(html_to_text("just text 555555"), "just text 555555");
    }
}
