//! Template engine for rendering verse pages.

use minijinja::Environment;

/// Context for rendering a verse page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VerseContext {
    /// Human reference, e.g. "Genesis 1:1"
    pub reference: String,
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Brand name shown above the title
    pub brand: String,
    /// Brand logo image URL
    pub logo_url: String,
    /// Absolute URL of this page
    pub canonical: String,
    /// Verse number
    pub verse: u32,
    /// Verse text (unescaped)
    pub text: String,
    /// Site-relative URL of the previous verse
    pub prev_url: String,
    /// Site-relative URL of the next verse
    pub next_url: String,
    /// Inline stylesheet
    pub styles: String,
}

/// Context for a meta-refresh redirect document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RedirectContext {
    /// Redirect target URL
    pub target: String,
    /// Site title
    pub site_title: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("escape_text", escape_text);

        env.add_template_owned("verse.html".to_string(), VERSE_TEMPLATE.to_string())
            .expect("Failed to add verse template");

        env.add_template_owned("redirect.html".to_string(), REDIRECT_TEMPLATE.to_string())
            .expect("Failed to add redirect template");

        Self { env }
    }

    /// Render a verse page.
    pub fn render_verse(&self, context: &VerseContext) -> Result<String, minijinja::Error> {
        self.env.get_template("verse.html")?.render(context)
    }

    /// Render a redirect document.
    pub fn render_redirect(&self, context: &RedirectContext) -> Result<String, minijinja::Error> {
        self.env.get_template("redirect.html")?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape `&`, `<` and `>` only, as the page body shows them. The share body
/// is built from this form.
fn escape_text(value: String) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// URLs are built from canonical book names and numbers and are marked safe so
// they are not entity-encoded.
const VERSE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/><meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>{{ title }}</title>
  <link rel="canonical" href="{{ canonical | safe }}"/>
  <meta name="description" content="{{ reference }} — {{ text }}">
  <meta property="og:title" content="{{ title }}"><meta property="og:description" content="{{ text }}">
  <meta property="og:type" content="article"><meta property="og:url" content="{{ canonical | safe }}">
  <meta property="og:site_name" content="{{ brand }}"><meta name="twitter:card" content="summary_large_image">
  <style>{{ styles | safe }}</style>
</head>
<body>
  <div class="wrap">
    <header>
      <img src="{{ logo_url | safe }}" alt="{{ brand }}">
      <div>{{ brand }}</div>
      <h1>{{ site_title }}</h1>
      <div>{{ reference }}</div>
    </header>
    <div class="verse"><span class="vnum">{{ verse }}</span>{{ text }}</div>
    <div class="bar">
      <a class="chip" href="https://www.facebook.com/sharer/sharer.php?u={{ canonical | urlencode | safe }}" target="_blank" rel="noopener">Facebook</a>
      <a class="chip" href="https://twitter.com/intent/tweet?url={{ canonical | urlencode | safe }}&text={{ reference | urlencode | safe }}" target="_blank" rel="noopener">X</a>
      <a class="chip" href="mailto:?subject={{ reference | urlencode | safe }}&body={{ ((text | escape_text) ~ "\n" ~ canonical) | urlencode | safe }}">Email</a>
      <a class="chip" href="{{ canonical | safe }}">Permalink</a>
    </div>
    <nav>
      <a class="btn" href="{{ prev_url | safe }}">⟨ Prev</a>
      <a class="btn" href="{{ next_url | safe }}">Next ⟩</a>
    </nav>
  </div>
</body>
</html>
"##;

const REDIRECT_TEMPLATE: &str = r##"<!doctype html><meta charset="utf-8"><meta http-equiv="refresh" content="0;url={{ target | safe }}"><title>{{ site_title }}</title>"##;
