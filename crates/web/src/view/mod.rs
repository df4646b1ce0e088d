//! Server-rendered HTML for the dashboard.
//!
//! Views are dioxus components rendered to strings with `dioxus-ssr`;
//! handlers decide what to show and these modules decide how it looks.

pub mod columns;
pub mod modal;
pub mod page;
pub mod table;

#[cfg(test)]
pub(crate) mod testing {
    /// Fold the entities the renderer may emit inside URLs back to plain
    /// characters so assertions can name hrefs as written.
    pub fn decoded(html: &str) -> String {
        html.replace("&#x2f;", "/")
            .replace("&#x2F;", "/")
            .replace("&#47;", "/")
            .replace("&amp;", "&")
    }

    /// The opening tag that starts with `prefix`, up to its closing `>`.
    pub fn opening_tag<'a>(html: &'a str, prefix: &str) -> &'a str {
        let start = html
            .find(prefix)
            .unwrap_or_else(|| panic!("no tag starting with {prefix}"));
        let end = html[start..].find('>').map_or(html.len(), |i| start + i + 1);
        &html[start..end]
    }
}
