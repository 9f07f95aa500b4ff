//! Element queries over parsed HTML
//!
//! [`Document`] is not `Send`; parse, query and drop it without holding it
//! across an `.await`.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// How an attribute value is compared
#[derive(Debug, Clone)]
enum Matcher {
    Present,
    Exact(String),
    Pattern(Regex),
}

impl Matcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Present => true,
            Self::Exact(expected) => value == expected,
            Self::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// Element query: a tag name plus optional class and attribute constraints
///
/// ```ignore
/// let query = Query::tag("a").class_pattern(&DOWNLOAD_CLASS).has_attr("href");
/// let anchor = document.find(&query);
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    tag: String,
    class: Option<Matcher>,
    attrs: Vec<(String, Matcher)>,
}

impl Query {
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            tag: name.to_string(),
            class: None,
            attrs: Vec::new(),
        }
    }

    /// Require a class token equal to `class`
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(Matcher::Exact(class.to_string()));
        self
    }

    /// Require a class token, or the whole `class` attribute, matching `pattern`
    #[must_use]
    pub fn class_pattern(mut self, pattern: &Regex) -> Self {
        self.class = Some(Matcher::Pattern(pattern.clone()));
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_string(), Matcher::Exact(value.to_string())));
        self
    }

    #[must_use]
    pub fn attr_pattern(mut self, name: &str, pattern: &Regex) -> Self {
        self.attrs
            .push((name.to_string(), Matcher::Pattern(pattern.clone())));
        self
    }

    #[must_use]
    pub fn has_attr(mut self, name: &str) -> Self {
        self.attrs.push((name.to_string(), Matcher::Present));
        self
    }

    fn selector(&self) -> Option<Selector> {
        Selector::parse(&self.tag).ok()
    }

    fn accepts(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();

        if let Some(class) = &self.class {
            let Some(raw) = value.attr("class") else {
                return false;
            };
            let whole = matches!(class, Matcher::Pattern(_)) && class.matches(raw);
            if !whole && !value.classes().any(|token| class.matches(token)) {
                return false;
            }
        }

        self.attrs.iter().all(|(name, matcher)| {
            value
                .attrs()
                .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
                .is_some_and(|(_, v)| matcher.matches(v))
        })
    }
}

/// Parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup, returning `None` when it holds no usable elements
    #[must_use]
    pub fn parse(markup: &str) -> Option<Self> {
        if markup.trim().is_empty() || !markup.contains('<') {
            return None;
        }
        Some(Self {
            html: Html::parse_document(markup),
        })
    }

    /// First element in document order matching the query
    #[must_use]
    pub fn find(&self, query: &Query) -> Option<Element<'_>> {
        let selector = query.selector()?;
        self.html
            .select(&selector)
            .find(|el| query.accepts(el))
            .map(Element)
    }

    /// Every element matching the query, in document order
    #[must_use]
    pub fn find_all(&self, query: &Query) -> Vec<Element<'_>> {
        let Some(selector) = query.selector() else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .filter(|el| query.accepts(el))
            .map(Element)
            .collect()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// Element borrowed from a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Attribute value with surrounding whitespace removed, `None` when
    /// absent or blank
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Concatenated descendant text, trimmed
    #[must_use]
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    /// First descendant matching the query
    #[must_use]
    pub fn find(&self, query: &Query) -> Option<Element<'a>> {
        let selector = query.selector()?;
        self.0
            .select(&selector)
            .find(|el| query.accepts(el))
            .map(Element)
    }
}
