//! Sitemap and robots.txt generation.
//!
//! Rendering is pure: callers fetch published content (already ordered) and
//! pass it in, so a repository failure upstream simply yields the static
//! entries.

use chrono::Utc;

use crate::models::content;

/// A single `<url>` entry in the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Static routes that exist regardless of stored content. They follow the
/// requested locale like content URLs do, and carry the render time as
/// `lastmod` since nothing tracks when they actually changed.
fn static_entries(base: &str, locale: Option<&str>) -> Vec<SitemapEntry> {
    let prefix = locale.map(|l| format!("/{}", l)).unwrap_or_default();
    let now = Utc::now().to_rfc3339();
    vec![
        SitemapEntry {
            loc: format!("{}{}", base, prefix),
            lastmod: Some(now.clone()),
            changefreq: "daily",
            priority: "1.0",
        },
        SitemapEntry {
            loc: format!("{}{}/blog", base, prefix),
            lastmod: Some(now.clone()),
            changefreq: "daily",
            priority: "0.9",
        },
        SitemapEntry {
            loc: format!("{}{}/docs", base, prefix),
            lastmod: Some(now),
            changefreq: "weekly",
            priority: "0.8",
        },
    ]
}

/// Builds sitemap entries for published content rows, preserving their order.
pub fn content_entries(
    base: &str,
    locale: Option<&str>,
    contents: &[content::Model],
) -> Vec<SitemapEntry> {
    contents
        .iter()
        .map(|item| {
            let locale_segment = locale.map(|l| format!("/{}", l)).unwrap_or_default();
            let priority = match item.content_type {
                crate::models::enums::ContentType::Blog => "0.8",
                _ => "0.6",
            };
            SitemapEntry {
                loc: format!(
                    "{}{}/{}/{}",
                    base,
                    locale_segment,
                    item.content_type.path_segment(),
                    item.slug
                ),
                lastmod: Some(item.updated_at.to_rfc3339()),
                changefreq: "weekly",
                priority,
            }
        })
        .collect()
}

/// Renders the full sitemap XML document.
pub fn render_sitemap(
    base: &str,
    locale: Option<&str>,
    contents: &[content::Model],
) -> String {
    let mut entries = static_entries(base, locale);
    entries.extend(content_entries(base, locale, contents));

    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in &entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.loc)));
        if let Some(ref lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", xml_escape(lastmod)));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Renders robots.txt pointing at the absolute sitemap URL.
pub fn render_robots(base: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", base)
}

/// Escapes the five XML-reserved characters in interpolated values.
pub fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{ContentStatus, ContentType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn published(slug: &str, content_type: ContentType) -> content::Model {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        content::Model {
            id: Uuid::new_v4(),
            title: slug.to_string(),
            slug: slug.to_string(),
            body: String::new(),
            content_type,
            status: ContentStatus::Published,
            published_at: Some(ts.into()),
            excerpt: None,
            featured_image: None,
            reading_time: 1,
            author_id: "author-1".to_string(),
            category_id: None,
            created_at: ts.into(),
            updated_at: ts.into(),
            deleted_at: None,
        }
    }

    #[test]
    fn xml_escape_covers_reserved_characters() {
        assert_eq!(
            xml_escape("a&b<c>d\"e'f"),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn sitemap_contains_static_and_content_entries() {
        let base = "https://example.com";
        let contents = vec![published("hello", ContentType::Blog)];
        let xml = render_sitemap(base, None, &contents);

        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog</loc>"));
        assert!(xml.contains("<loc>https://example.com/docs</loc>"));
        assert_eq!(
            xml.matches("<loc>https://example.com/blog/hello</loc>").count(),
            1
        );
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn blog_entries_outrank_other_types() {
        let base = "https://example.com";
        let contents = vec![
            published("post", ContentType::Blog),
            published("guide", ContentType::Docs),
        ];
        let entries = content_entries(base, None, &contents);

        assert_eq!(entries[0].priority, "0.8");
        assert_eq!(entries[1].priority, "0.6");
        assert_eq!(entries[1].loc, "https://example.com/docs/guide");
    }

    #[test]
    fn locale_prefixes_content_paths() {
        let base = "https://example.com";
        let contents = vec![published("hola", ContentType::Blog)];
        let entries = content_entries(base, Some("es"), &contents);

        assert_eq!(entries[0].loc, "https://example.com/es/blog/hola");
    }

    #[test]
    fn locale_prefixes_static_pages_too() {
        let xml = render_sitemap("https://example.com", Some("es"), &[]);

        assert!(xml.contains("<loc>https://example.com/es</loc>"));
        assert!(xml.contains("<loc>https://example.com/es/blog</loc>"));
        assert!(xml.contains("<loc>https://example.com/es/docs</loc>"));
        assert!(!xml.contains("<loc>https://example.com</loc>"));
    }

    #[test]
    fn static_pages_carry_a_lastmod() {
        let xml = render_sitemap("https://example.com", None, &[]);
        assert_eq!(xml.matches("<lastmod>").count(), 3);
    }

    #[test]
    fn slug_with_reserved_characters_is_escaped() {
        let base = "https://example.com";
        let mut item = published("a&b", ContentType::Page);
        item.slug = "a&b".to_string();
        let xml = render_sitemap(base, None, &[item]);

        assert!(xml.contains("<loc>https://example.com/page/a&amp;b</loc>"));
        assert!(!xml.contains("/page/a&b<"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = render_robots("https://example.com");
        assert_eq!(
            robots,
            "User-agent: *\nAllow: /\n\nSitemap: https://example.com/sitemap.xml\n"
        );
    }
}
