//! Page stylesheet generation.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The stylesheet inlined into every verse page.
    pub fn page_css() -> String {
        PAGE_CSS.to_string()
    }

    /// The page stylesheet, minified when `minify` is set.
    ///
    /// Falls back to the unminified text if lightningcss rejects it.
    pub fn styles(minify: bool) -> String {
        let css = Self::page_css();
        if !minify {
            return css;
        }
        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Failed to minify page CSS: {}", e);
                css
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const PAGE_CSS: &str = r#"@import url('https://fonts.googleapis.com/css2?family=EB+Garamond:ital,wght@0,400;0,500;0,600;1,400;1,600&display=swap');

:root {
  --border: #e6e6e6;
  --ink: #111;
  --muted: #737373;
}

body {
  font-family: 'EB Garamond', serif;
  color: var(--ink);
  margin: 0;
}

.wrap {
  max-width: 880px;
  margin: 32px auto;
  padding: 16px;
}

header {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 12px;
  text-align: center;
}

header img {
  height: 96px;
  border-radius: 12px;
}

h1 {
  font-size: 28px;
  margin: 8px 0 0;
}

.verse {
  font-size: 22px;
  line-height: 1.65;
  margin-top: 12px;
  padding: 16px;
  border: 1px solid var(--border);
  border-radius: 14px;
}

.vnum {
  font-size: .7em;
  vertical-align: super;
  margin-right: 6px;
  color: var(--muted);
}

nav {
  display: flex;
  gap: 8px;
  margin-top: 12px;
}

a.btn {
  border: 1px solid var(--border);
  border-radius: 10px;
  padding: 8px 12px;
  text-decoration: none;
  color: inherit;
}

.bar {
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
  margin-top: 12px;
}

.chip {
  background: #f5f5f5;
  border: 1px solid var(--border);
  border-radius: 999px;
  padding: 8px 12px;
  font-size: 13px;
  text-decoration: none;
  color: inherit;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_css_has_layout_rules() {
        let css = AssetPipeline::page_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".verse"));
        assert!(css.contains(".chip"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.verse {
    font-size: 22px;
    padding: 16px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".verse"));
    }

    #[test]
    fn styles_respect_minify_flag() {
        let plain = AssetPipeline::styles(false);
        let minified = AssetPipeline::styles(true);

        assert_eq!(plain, AssetPipeline::page_css());
        assert!(minified.len() < plain.len());
        assert!(minified.contains("EB Garamond"));
    }
}
