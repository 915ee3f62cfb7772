//! Sanitize-then-render boundary for backend HTML.
//!
//! Question content, answers and solutions come from the backend as raw HTML.
//! Everything shown with `dangerous_inner_html` must go through [`render_safe`].

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

const PLUGIN_FILE_TOKEN: &str = "@@PLUGINFILE@@";
const RELATIVE_IMAGE_PREFIXES: [&str; 2] = ["src=\"/quiz/images", "src=\"/images"];

/// Point plugin-file tokens and site-relative image paths at `media_base`.
#[must_use]
pub fn rewrite_media_paths(html: &str, media_base: &str) -> String {
    let media_base = media_base.trim_end_matches('/');
    let mut out = html.replace(PLUGIN_FILE_TOKEN, media_base);
    let absolute = format!("src=\"{media_base}");
    for prefix in RELATIVE_IMAGE_PREFIXES {
        out = out.replace(prefix, &absolute);
    }
    out
}

/// Rewrite media paths, then strip everything outside the allow-list.
#[must_use]
pub fn render_safe(html: &str, media_base: &str) -> String {
    let rewritten = rewrite_media_paths(html, media_base);

    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "sub", "sup", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "img", "table", "thead", "tbody", "tr", "td", "th",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("img", ["src", "alt", "width", "height"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .url_schemes(["http", "https", "data"].into_iter().collect())
        .attribute_filter(|element, attribute, value| {
            // data: URLs are only allowed as image sources.
            let is_data = value.trim_start().get(..5).is_some_and(|s| s.eq_ignore_ascii_case("data:"));
            if is_data && !(element == "img" && attribute == "src") {
                None
            } else {
                Some(Cow::Borrowed(value))
            }
        })
        .clean(&rewritten)
        .to_string()
}
