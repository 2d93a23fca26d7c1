//! Static site generator for per-verse bible pages.
//!
//! Writes one HTML page per indexed verse, plus `sitemap.xml`, `robots.txt`,
//! and redirecting `index.html` / `404.html` documents at the output root.

pub mod assets;
pub mod builder;
pub mod sitemap;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
