use lazy_static::lazy_static;
use regex::Regex;

use super::FeedItem;

lazy_static! {
    /// Tried in order against the post body; group 1 wins over the whole match.
    static ref IMAGE_PATTERNS: Vec<Regex> = [
        r#"(?i)<img[^>]+src=["']([^"']+)["'][^>]*>"#,
        r#"(?i)<img[^>]+src=([^\s>]+)[^>]*>"#,
        r#"(?i)https?://[^\s]+\.(?:jpg|jpeg|png|gif|webp)(?:\?[^\s]*)?"#,
        r#"(?i)<media:content[^>]+url=["']([^"']+)["']"#,
        r#"(?i)<enclosure[^>]+url=["']([^"']+)["']"#,
        r#"(?i)src=["']([^"']*\.(?:jpg|jpeg|png|gif|webp)[^"']*)["']"#,
        r#"(?i)cdn\.substack\.com[^\s"']+\.(?:jpg|jpeg|png|gif|webp)"#,
        r#"(?i)substackcdn\.com[^\s"']+\.(?:jpg|jpeg|png|gif|webp)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid image pattern"))
    .collect();
}

/// First image-like url found in a blob of html, if any.
pub fn find_image_in_html(html: &str) -> Option<String> {
    IMAGE_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(html)?;
        let url = caps.get(1).or_else(|| caps.get(0))?.as_str();
        url.contains('.').then(|| url.to_string())
    })
}

/// Representative image for a post: thumbnail, then an image enclosure, then
/// whatever the content or description embeds.
pub fn extract_image_url(item: &FeedItem) -> Option<String> {
    if let Some(thumb) = item.thumbnail.as_deref().filter(|t| !t.is_empty()) {
        return Some(thumb.to_string());
    }
    if let Some(enclosure) = &item.enclosure {
        let is_image = enclosure
            .kind
            .as_deref()
            .is_some_and(|t| t.starts_with("image/"));
        if let Some(link) = enclosure.link.as_deref().filter(|l| is_image && !l.is_empty()) {
            return Some(link.to_string());
        }
    }
    let body = format!("{} {}", item.content, item.description);
    let found = find_image_in_html(&body);
    if found.is_none() {
        tracing::debug!("no image found in post: {}", &item.title);
    }
    found
}
