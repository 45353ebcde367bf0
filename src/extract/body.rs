//! Main-content extraction
//!
//! Finds the article container through an ordered cascade of structural
//! rules, then assembles the visible text of its paragraph-like elements.
//! Pages with no recognizable container yield a sentinel body, not an error.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};

/// Sentinel title for pages without an Open Graph title
pub const NO_TITLE: &str = "No title found";

/// Sentinel body for pages where no container rule matched
pub const BODY_NOT_FOUND: &str = "본문을 찾을 수 없습니다.";

/// Extracted title and body text of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBody {
    pub title: String,
    pub body: String,
}

/// One step of the container cascade: either an exact CSS selector, or a
/// tag whose class attribute must contain a pattern match
enum ContainerRule {
    Css(&'static str),
    ClassFragment {
        tag: &'static str,
        pattern: &'static str,
    },
}

/// Container cascade in priority order, site-specific first, generic last
const CONTAINER_RULES: &[ContainerRule] = &[
    ContainerRule::Css("article#dic_area"),
    ContainerRule::Css("div#articleBody"),
    ContainerRule::ClassFragment {
        tag: "div",
        pattern: r"article[_-]body",
    },
    ContainerRule::ClassFragment {
        tag: "div",
        pattern: r"article[_-]content",
    },
    ContainerRule::ClassFragment {
        tag: "section",
        pattern: r"article[_-]body",
    },
    ContainerRule::Css("article"),
    ContainerRule::ClassFragment {
        tag: "div",
        pattern: r"article[-_]?(body|content|text)",
    },
    ContainerRule::ClassFragment {
        tag: "section",
        pattern: r"article[-_]?(body|content|text)",
    },
];

struct CompiledRule {
    selector: Selector,
    class_pattern: Option<Regex>,
}

static COMPILED_CONTAINER_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    CONTAINER_RULES
        .iter()
        .map(|rule| match rule {
            ContainerRule::Css(css) => CompiledRule {
                selector: Selector::parse(css).unwrap(),
                class_pattern: None,
            },
            ContainerRule::ClassFragment { tag, pattern } => CompiledRule {
                selector: Selector::parse(tag).unwrap(),
                class_pattern: Some(
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .unwrap(),
                ),
            },
        })
        .collect()
});

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());

/// Elements whose visible text makes up the assembled body
static CONTENT_ELEMENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, strong, div, span, h1, h2, h3").unwrap());

/// Extracts title and main text from a page body
///
/// The title comes from the Open Graph title meta when present. The body is
/// assembled from the first container the cascade finds; when nothing
/// matches, the body is [`BODY_NOT_FOUND`]. Both sentinels are normal
/// values downstream storage must accept.
pub fn extract_body(html: &str) -> ExtractedBody {
    let document = Html::parse_document(html);

    let title = document
        .select(&OG_TITLE)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let body = match find_container(&document) {
        Some(container) => assemble_text(container),
        None => BODY_NOT_FOUND.to_string(),
    };

    ExtractedBody { title, body }
}

/// Walks the cascade and returns the first matching container
fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    for rule in COMPILED_CONTAINER_RULES.iter() {
        for element in document.select(&rule.selector) {
            match &rule.class_pattern {
                None => return Some(element),
                Some(re) => {
                    if element
                        .value()
                        .attr("class")
                        .map_or(false, |class| re.is_match(class))
                    {
                        return Some(element);
                    }
                }
            }
        }
    }
    None
}

/// Concatenates the trimmed visible text of paragraph-like and heading
/// elements inside the container, one fragment per line
fn assemble_text(container: ElementRef<'_>) -> String {
    container
        .select(&CONTENT_ELEMENTS)
        .map(visible_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of an element with script/style subtrees excluded
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .map_or(false, |e| matches!(e.name(), "script" | "style"))
            });
            if !hidden {
                out.push_str(text);
            }
        }
    }
    out
}
