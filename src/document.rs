use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

// Static selectors to avoid recompiling them for every scan
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to parse description selector")
});

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to parse img selector")
});

/// Elements whose text never reaches the reader.
const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub alt: Option<String>,
}

/// The parts of a page the analyzers look at, extracted once per scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub text: String,
    pub title: Option<String>,
    /// `content` of the first `meta[name=description]`, when present.
    pub description: Option<String>,
    pub images: Vec<ImageElement>,
}

impl ParsedDocument {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|element| element.text().collect::<String>());

        let description = document
            .select(&DESCRIPTION_SELECTOR)
            .find_map(|element| element.value().attr("content"))
            .map(str::to_string);

        let images = document
            .select(&IMG_SELECTOR)
            .map(|element| ImageElement {
                alt: element.value().attr("alt").map(str::to_string),
            })
            .collect();

        let root = document
            .select(&BODY_SELECTOR)
            .next()
            .unwrap_or_else(|| document.root_element());

        Self {
            text: visible_text(root),
            title,
            description,
            images,
        }
    }
}

/// Text nodes under `root`, space-joined, minus script-like content.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut result = String::new();

    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(trimmed);
        }
    }

    result
}
