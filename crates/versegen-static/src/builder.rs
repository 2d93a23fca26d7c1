//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use versegen_corpus::{first_address, pages, sitemap_addresses, Address, CorpusIndex, PageEntry};

use crate::assets::AssetPipeline;
use crate::sitemap::{render_robots, render_sitemap};
use crate::templates::{RedirectContext, TemplateEngine, VerseContext};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Absolute site origin, e.g. "https://asv.example.com"
    pub origin: String,

    /// Path segment all verse pages live under, e.g. "/asv"
    pub base_path: String,

    /// Site title
    pub title: String,

    /// Brand name
    pub brand: String,

    /// Brand logo URL
    pub logo_url: String,

    /// Minify the inline stylesheet
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            origin: "http://localhost".to_string(),
            base_path: String::new(),
            title: "The Holy Bible".to_string(),
            brand: String::new(),
            logo_url: String::new(),
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of distinct verse pages written
    pub pages: usize,

    /// Number of URLs listed in the sitemap
    pub sitemap_urls: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
    styles: String,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let styles = AssetPipeline::styles(config.minify);

        Self {
            config,
            templates: TemplateEngine::new(),
            styles,
        }
    }

    /// Build the site for `index`.
    ///
    /// Pages are written one at a time; any failure aborts the build and
    /// leaves whatever was already written in place.
    pub fn build(&self, index: &CorpusIndex) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", self.config.output_dir.display(), e)))?;

        let pages = self.generate_pages(index)?;
        let sitemap_urls = self.generate_sitemap(index)?;
        self.generate_redirects()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages,
            sitemap_urls,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Write one page per indexed verse. Returns the number of distinct pages.
    fn generate_pages(&self, index: &CorpusIndex) -> Result<usize, BuildError> {
        tracing::info!("Writing verse pages...");

        let mut written: HashSet<Address> = HashSet::new();
        for entry in pages(index) {
            let html = self.render_page(&entry)?;
            let path = self
                .config
                .output_dir
                .join(entry.address.file_path(&self.config.base_path));
            self.write_file(&path, &html)?;

            if !written.insert(entry.address) {
                tracing::debug!("Overwrote duplicate verse {}", entry.address);
            }
        }

        Ok(written.len())
    }

    /// Render a single verse page.
    fn render_page(&self, entry: &PageEntry<'_>) -> Result<String, BuildError> {
        let address = entry.address;
        let reference = address.to_string();

        let context = VerseContext {
            title: format!("{} — {}", reference, self.config.title),
            reference,
            site_title: self.config.title.clone(),
            brand: self.config.brand.clone(),
            logo_url: self.config.logo_url.clone(),
            canonical: self.absolute_url(&address),
            verse: address.verse,
            text: entry.text.to_string(),
            prev_url: address.prev().url_path(&self.config.base_path),
            next_url: address.next().url_path(&self.config.base_path),
            styles: self.styles.clone(),
        };

        self.templates
            .render_verse(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Generate sitemap.xml and robots.txt. Returns the number of URLs listed.
    fn generate_sitemap(&self, index: &CorpusIndex) -> Result<usize, BuildError> {
        tracing::info!("Writing sitemap.xml...");
        let urls: Vec<String> = sitemap_addresses(index)
            .iter()
            .map(|address| self.absolute_url(address))
            .collect();
        self.write_file(&self.config.output_dir.join("sitemap.xml"), &render_sitemap(&urls))?;

        tracing::info!("Writing robots.txt...");
        self.write_file(
            &self.config.output_dir.join("robots.txt"),
            &render_robots(&self.config.origin),
        )?;

        Ok(urls.len())
    }

    /// Generate the root splash and not-found documents, both redirecting to
    /// the first verse.
    fn generate_redirects(&self) -> Result<(), BuildError> {
        let target = first_address().url_path(&self.config.base_path);
        let html = self
            .templates
            .render_redirect(&RedirectContext {
                target: target.clone(),
                site_title: self.config.title.clone(),
            })
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        tracing::info!("Root splash -> {}", target);
        self.write_file(&self.config.output_dir.join("index.html"), &html)?;

        tracing::info!("404.html -> {}", target);
        self.write_file(&self.config.output_dir.join("404.html"), &html)?;

        Ok(())
    }

    /// Absolute URL for an address under the configured origin.
    fn absolute_url(&self, address: &Address) -> String {
        format!(
            "{}{}",
            self.config.origin.trim_end_matches('/'),
            address.url_path(&self.config.base_path)
        )
    }

    /// Write `contents` to `path`, creating parent directories.
    fn write_file(&self, path: &Path, contents: &str) -> Result<(), BuildError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", parent.display(), e)))?;
        }

        fs::write(path, contents)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use versegen_corpus::ingest;

    fn config(out: &Path) -> BuildConfig {
        BuildConfig {
            output_dir: out.to_path_buf(),
            origin: "https://asv.example.com".to_string(),
            base_path: "/asv".to_string(),
            title: "The Holy Bible: American Standard Version".to_string(),
            brand: "Living Word Bibles".to_string(),
            logo_url: "https://example.com/logo.png".to_string(),
            minify: false,
        }
    }

    #[test]
    fn builds_single_verse_site() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let corpus = ingest(&json!([
            {"book": "Gen", "chapter": 1, "verse": 1, "text": "In the beginning..."}
        ]))
        .unwrap();

        let result = StaticBuilder::new(config(&out)).build(&corpus.index).unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.sitemap_urls, 1);

        let page = fs::read_to_string(out.join("asv/Genesis/1/1/index.html")).unwrap();
        assert!(page.contains("In the beginning..."));
        assert!(page.contains("<title>Genesis 1:1 — The Holy Bible: American Standard Version</title>"));
        assert!(page.contains(r#"href="/asv/Genesis/1/1/">⟨ Prev</a>"#));
        assert!(page.contains(r#"href="/asv/Genesis/1/2/">Next ⟩</a>"#));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<loc>").count(), 1);
        assert!(sitemap.contains("<loc>https://asv.example.com/asv/Genesis/1/1/</loc>"));
    }

    #[test]
    fn writes_root_artifacts() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let corpus = ingest(&json!({"Exodus": {"2": {"1": "Verse text"}}})).unwrap();

        StaticBuilder::new(config(&out)).build(&corpus.index).unwrap();

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://asv.example.com/sitemap.xml"));

        for name in ["index.html", "404.html"] {
            let html = fs::read_to_string(out.join(name)).unwrap();
            assert!(html.contains("content=\"0;url=/asv/Genesis/1/1/\""), "{name}");
        }
        assert!(out.join("asv/Exodus/2/1/index.html").exists());
    }

    #[test]
    fn slugs_multi_word_books() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let corpus = ingest(&json!([
            {"book": "SS", "chapter": 2, "verse": 1, "text": "I am the rose of Sharon"},
            {"book": "1 Sam", "chapter": 3, "verse": 10, "text": "Speak; for thy servant heareth"},
        ]))
        .unwrap();

        StaticBuilder::new(config(&out)).build(&corpus.index).unwrap();

        assert!(out.join("asv/Song-of-Solomon/2/1/index.html").exists());
        assert!(out.join("asv/1-Samuel/3/10/index.html").exists());
    }

    #[test]
    fn gaps_leave_sitemap_entries_without_pages() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let corpus = ingest(&json!({"Ruth": {"1": {"1": "a", "3": "c"}}})).unwrap();

        let result = StaticBuilder::new(config(&out)).build(&corpus.index).unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.sitemap_urls, 3);
        assert!(!out.join("asv/Ruth/1/2/index.html").exists());
        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("/asv/Ruth/1/2/</loc>"));
    }

    #[test]
    fn last_duplicate_wins_on_disk() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let corpus = ingest(&json!([
            {"book": "Jude", "chapter": 1, "verse": 1, "text": "first copy"},
            {"book": "Jude", "chapter": 1, "verse": 1, "text": "second copy"},
        ]))
        .unwrap();

        let result = StaticBuilder::new(config(&out)).build(&corpus.index).unwrap();

        assert_eq!(result.pages, 1);
        let page = fs::read_to_string(out.join("asv/Jude/1/1/index.html")).unwrap();
        assert!(page.contains("second copy"));
        assert!(!page.contains("first copy"));
    }

    #[test]
    fn write_failure_is_fatal() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();
        let corpus = ingest(&json!([
            {"book": "Gen", "chapter": 1, "verse": 1, "text": "In the beginning"}
        ]))
        .unwrap();

        let err = StaticBuilder::new(config(&blocker)).build(&corpus.index).unwrap_err();

        assert!(matches!(err, BuildError::WriteError(_)));
    }
}
