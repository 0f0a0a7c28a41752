//! Result extraction from the search results page
//!
//! The selectors below mirror the markup of the results page. They are an
//! external contract: when the site changes its markup, they need updating.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Label under which the results page lists the institution
pub const INSTITUTION_LABEL: &str = "Hochschule";

/// One study program from the results page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyProgram {
    /// Program title, empty if the result block has no heading
    pub title: String,

    /// Label -> value facts listed for the program
    pub information: BTreeMap<String, String>,

    /// Absolute URL of the detail page
    pub detail_url: Option<String>,
}

impl StudyProgram {
    /// Value listed under `label`
    pub fn information(&self, label: &str) -> Option<&str> {
        self.information.get(label).map(String::as_str)
    }

    /// Name of the institution offering the program
    pub fn institution(&self) -> Option<&str> {
        self.information(INSTITUTION_LABEL)
    }
}

/// Compiled selectors describing the results page markup
#[derive(Debug, Clone)]
pub struct ResultSelectors {
    block: Selector,
    heading: Selector,
    info_item: Selector,
    label: Selector,
    value: Selector,
    detail_link: Selector,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Selector(format!("failed to parse '{}': {}", selector, e)))
}

impl ResultSelectors {
    /// Compile a custom set of selectors.
    ///
    /// `info_item`, `label`, `value` and `detail_link` are matched inside each
    /// result block; `label` and `value` inside each info item.
    pub fn new(
        block: &str,
        heading: &str,
        info_item: &str,
        label: &str,
        value: &str,
        detail_link: &str,
    ) -> Result<Self> {
        Ok(Self {
            block: compile(block)?,
            heading: compile(heading)?,
            info_item: compile(info_item)?,
            label: compile(label)?,
            value: compile(value)?,
            detail_link: compile(detail_link)?,
        })
    }

    /// Selectors for the current Hochschulkompass markup
    pub fn hochschulkompass() -> Result<Self> {
        Self::new(
            "div.clearfix.result-section section.result-box",
            "h2",
            "ul.info li",
            "span.title",
            "span.status",
            "a.btn-info",
        )
    }
}

static DEFAULT_SELECTORS: LazyLock<ResultSelectors> = LazyLock::new(|| {
    ResultSelectors::hochschulkompass().expect("built-in result selectors are valid")
});

/// Text nodes of an element, each trimmed, empty ones dropped, joined by `sep`
fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn extract_program(
    block: ElementRef<'_>,
    selectors: &ResultSelectors,
    base_url: &Url,
) -> StudyProgram {
    let title = block
        .select(&selectors.heading)
        .next()
        .map(|h| joined_text(h, ""))
        .unwrap_or_default();

    let mut information = BTreeMap::new();
    for item in block.select(&selectors.info_item) {
        let label = item.select(&selectors.label).next();
        let value = item.select(&selectors.value).next();
        let (Some(label), Some(value)) = (label, value) else {
            continue;
        };
        // Values may nest spans (e.g. study-in-time badges), so they keep a separator.
        information.insert(joined_text(label, ""), joined_text(value, " "));
    }

    let detail_url = block
        .select(&selectors.detail_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| match base_url.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Ignoring unresolvable detail link '{}': {}", href, e);
                None
            }
        });

    StudyProgram {
        title,
        information,
        detail_url,
    }
}

/// Parse a results page with custom selectors
pub fn parse_results_with(
    html: &str,
    base_url: &Url,
    selectors: &ResultSelectors,
) -> Vec<StudyProgram> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.block)
        .map(|block| extract_program(block, selectors, base_url))
        .collect()
}

/// Parse a results page into study programs, in document order.
///
/// A page without result blocks yields an empty list. Missing pieces inside a
/// block degrade to empty or absent values.
pub fn parse_results(html: &str, base_url: &Url) -> Vec<StudyProgram> {
    parse_results_with(html, base_url, &DEFAULT_SELECTORS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<div class="clearfix result-section">
  <section class="result-box">
    <h2> Mediendesign </h2>
    <ul class="info">
      <li><span class="title">Hochschule</span><span class="status">Hochschule Darmstadt</span></li>
      <li><span class="title">Abschluss</span><span class="status">Bachelor of Arts</span></li>
      <li><span class="title">Regelstudienzeit</span>
          <span class="status">7 <span class="sit">Semester</span></span></li>
      <li><span class="title">Ohne Wert</span></li>
      <li><span class="status">ohne Bezeichnung</span></li>
    </ul>
    <a class="btn btn-info"
       href="/studium/studiengangsuche/detail/all/search/1/studid/123.html">Mehr erfahren</a>
  </section>
  <section class="result-box">
    <h2>Interaction Design</h2>
    <ul class="info">
      <li><span class="title">Hochschule</span>
          <span class="status">HfG Schwäbisch Gmünd</span></li>
    </ul>
    <a class="btn-info" href="https://example.org/program/7">Mehr erfahren</a>
  </section>
  <section class="result-box">
    <ul class="info"></ul>
    <a class="btn-info">Mehr erfahren</a>
  </section>
</div>
<section class="result-box"><h2>Outside the result list</h2></section>
</body></html>
"#;

    fn base() -> Url {
        Url::parse("https://www.hochschulkompass.de").unwrap()
    }

    #[test]
    fn test_parse_results_in_document_order() {
        let programs = parse_results(PAGE, &base());

        assert_eq!(programs.len(), 3);
        assert_eq!(programs[0].title, "Mediendesign");
        assert_eq!(programs[1].title, "Interaction Design");
        assert_eq!(programs[2].title, "");
    }

    #[test]
    fn test_information_and_nested_values() {
        let programs = parse_results(PAGE, &base());
        let first = &programs[0];

        assert_eq!(first.institution(), Some("Hochschule Darmstadt"));
        assert_eq!(first.information("Abschluss"), Some("Bachelor of Arts"));
        assert_eq!(first.information("Regelstudienzeit"), Some("7 Semester"));
        assert_eq!(first.information.len(), 3);
        assert!(first.information("Ohne Wert").is_none());
    }

    #[test]
    fn test_detail_urls() {
        let programs = parse_results(PAGE, &base());

        assert_eq!(
            programs[0].detail_url.as_deref(),
            Some("https://www.hochschulkompass.de/studium/studiengangsuche/detail/all/search/1/studid/123.html")
        );
        assert_eq!(programs[1].detail_url.as_deref(), Some("https://example.org/program/7"));
        assert!(programs[2].detail_url.is_none());
        assert!(programs[2].information.is_empty());
    }

    #[test]
    fn test_no_results() {
        let html = "<html><body><p>Keine Studiengänge gefunden.</p></body></html>";

        assert!(parse_results(html, &base()).is_empty());
        assert!(parse_results("", &base()).is_empty());
    }

    #[test]
    fn test_custom_selectors() {
        let html =
            r#"<article class="hit"><h3>Physik</h3><a class="more" href="p/1">x</a></article>"#;
        let selectors =
            ResultSelectors::new("article.hit", "h3", "dl dt", "b", "i", "a.more").unwrap();

        let base_url = Url::parse("http://localhost/base/").unwrap();
        let programs = parse_results_with(html, &base_url, &selectors);

        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].title, "Physik");
        assert_eq!(programs[0].detail_url.as_deref(), Some("http://localhost/base/p/1"));
    }

    #[test]
    fn test_invalid_selector() {
        let result = ResultSelectors::new("div[", "h2", "li", "span", "span", "a");

        assert!(matches!(result, Err(Error::Selector(_))));
    }
}
