use std::sync::Arc;

use analyzer_core::error::AppError;
use analyzer_core::models::PageSeo;
use analyzer_core::traits::Inspector;
use scraper::{ElementRef, Html, Selector};

struct Selectors {
    h1: Selector,
    title: Selector,
    description: Selector,
}

/// HTML inspector using scraper.
///
/// Parsing is html5ever's error-recovering parse, so any input yields a
/// document; missing elements become empty strings.
pub struct ScraperInspector {
    selectors: Arc<Selectors>,
}

impl Clone for ScraperInspector {
    fn clone(&self) -> Self {
        Self {
            selectors: Arc::clone(&self.selectors),
        }
    }
}

impl ScraperInspector {
    pub fn new() -> Result<Self, AppError> {
        let parse = |css: &str| {
            Selector::parse(css)
                .map_err(|e| AppError::ConfigError(format!("Invalid selector '{css}': {e}")))
        };

        Ok(Self {
            selectors: Arc::new(Selectors {
                h1: parse("h1")?,
                title: parse("title")?,
                description: parse(r#"meta[name="description"]"#)?,
            }),
        })
    }
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|el: ElementRef<'_>| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

impl Inspector for ScraperInspector {
    fn inspect(&self, html: &str) -> PageSeo {
        let document = Html::parse_document(html);

        let description = document
            .select(&self.selectors.description)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        PageSeo {
            h1: first_text(&document, &self.selectors.h1),
            title: first_text(&document, &self.selectors.title),
            description,
        }
    }
}
