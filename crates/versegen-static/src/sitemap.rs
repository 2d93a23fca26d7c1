//! Sitemap and robots documents.

/// Render `sitemap.xml` with one `<url>` entry per absolute URL.
pub fn render_sitemap(urls: &[String]) -> String {
    let entries: Vec<String> = urls
        .iter()
        .map(|url| format!("  <url><loc>{}</loc></url>", escape_xml(url)))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>
"#,
        entries.join("\n")
    )
}

/// Render `robots.txt` pointing crawlers at the sitemap under `origin`.
pub fn render_robots(origin: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n",
        origin.trim_end_matches('/')
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_sitemap_entries() {
        let sitemap = render_sitemap(&[
            "https://example.com/asv/Genesis/1/1/".to_string(),
            "https://example.com/asv/Genesis/1/2/".to_string(),
        ]);

        assert_eq!(
            sitemap,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/asv/Genesis/1/1/</loc></url>
  <url><loc>https://example.com/asv/Genesis/1/2/</loc></url>
</urlset>
"#
        );
    }

    #[test]
    fn escapes_ampersands() {
        let sitemap = render_sitemap(&["https://example.com/?a=1&b=2".to_string()]);

        assert!(sitemap.contains("a=1&amp;b=2"));
    }

    #[test]
    fn renders_robots() {
        assert_eq!(
            render_robots("https://example.com/"),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }
}
