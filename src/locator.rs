// Tag lookup over parsed HTML.
//
// Every extractor locates nodes through `find_tag`, so a missing node always
// surfaces as the same `ParserError::NotFound` carrying what was searched for.

use regex::Regex;
use scraper::ElementRef;
use scraper::node::Element;
use std::fmt;
use std::str::FromStr;

use crate::error::{ParserError, Result};

/// How `find_tag` looks for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// First descendant with the given name and attributes.
    ByName,
    /// Parent element of the first descendant text matching a pattern.
    ByString,
    /// Next sibling element of the node itself.
    NextSibling,
}

impl FromStr for SearchType {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "by-name" => Ok(Self::ByName),
            "by-string" => Ok(Self::ByString),
            "next-sibling" => Ok(Self::NextSibling),
            other => Err(ParserError::InvalidSearchType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AttrMatch {
    Equals(String),
    EndsWith(String),
    Matches(Regex),
}

#[derive(Debug, Clone)]
pub struct AttrFilter {
    pub name: String,
    pub matcher: AttrMatch,
}

impl AttrFilter {
    fn accepts(&self, element: &Element) -> bool {
        // `class` holds a list, equality means "has this class"
        if let ("class", AttrMatch::Equals(class)) = (self.name.as_str(), &self.matcher) {
            return element.classes().any(|c| c == class);
        }

        match element.attr(&self.name) {
            Some(value) => match &self.matcher {
                AttrMatch::Equals(expected) => value == expected,
                AttrMatch::EndsWith(suffix) => value.ends_with(suffix.as_str()),
                AttrMatch::Matches(re) => re.is_match(value),
            },
            None => false,
        }
    }
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.matcher {
            AttrMatch::Equals(value) => write!(f, "{}={:?}", self.name, value),
            AttrMatch::EndsWith(value) => write!(f, "{}$={:?}", self.name, value),
            AttrMatch::Matches(re) => write!(f, "{}~/{}/", self.name, re.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TextPattern {
    /// The whole text node must equal the string.
    Exact(String),
    /// The regex must match somewhere in the text node.
    Regex(Regex),
}

impl TextPattern {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Exact(expected) => text == expected,
            Self::Regex(re) => re.is_match(text),
        }
    }
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(text) => write!(f, "{:?}", text),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// A single lookup request for `find_tag`.
#[derive(Debug, Clone)]
pub struct Search {
    kind: SearchType,
    name: Option<String>,
    attrs: Vec<AttrFilter>,
    text: Option<TextPattern>,
}

impl Search {
    pub fn new(kind: SearchType) -> Self {
        Self {
            kind,
            name: None,
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn tag(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(SearchType::ByName)
        }
    }

    pub fn string(pattern: TextPattern) -> Self {
        Self {
            text: Some(pattern),
            ..Self::new(SearchType::ByString)
        }
    }

    pub fn next_sibling() -> Self {
        Self::new(SearchType::NextSibling)
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.filter(name, AttrMatch::Equals(value.to_string()))
    }

    pub fn attr_ends_with(self, name: &str, suffix: &str) -> Self {
        self.filter(name, AttrMatch::EndsWith(suffix.to_string()))
    }

    pub fn attr_matching(self, name: &str, re: Regex) -> Self {
        self.filter(name, AttrMatch::Matches(re))
    }

    pub fn kind(&self) -> SearchType {
        self.kind
    }

    fn filter(mut self, name: &str, matcher: AttrMatch) -> Self {
        self.attrs.push(AttrFilter {
            name: name.to_string(),
            matcher,
        });
        self
    }

    fn not_found(&self) -> ParserError {
        let attrs = self
            .attrs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        ParserError::NotFound {
            tag: self.name.clone().unwrap_or_else(|| "*".to_string()),
            attrs: format!("{{{}}}", attrs),
            text: self
                .text
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

/// The tree operations `find_tag` needs from a parsed document.
pub trait Node: Copy {
    fn find_by_name(self, name: Option<&str>, attrs: &[AttrFilter]) -> Option<Self>;
    fn find_by_text(self, pattern: &TextPattern) -> Option<Self>;
    fn next_sibling_element(self) -> Option<Self>;
}

impl<'a> Node for ElementRef<'a> {
    fn find_by_name(self, name: Option<&str>, attrs: &[AttrFilter]) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|candidate| {
                let element = candidate.value();
                name.is_none_or(|n| element.name() == n)
                    && attrs.iter().all(|filter| filter.accepts(element))
            })
    }

    fn find_by_text(self, pattern: &TextPattern) -> Option<Self> {
        self.descendants()
            .filter(|node| node.value().as_text().is_some_and(|text| pattern.matches(text)))
            .find_map(|node| node.parent().and_then(ElementRef::wrap))
    }

    fn next_sibling_element(self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }
}

/// Locate a node or fail with `ParserError::NotFound`.
pub fn find_tag<N: Node>(node: N, search: &Search) -> Result<N> {
    let found = match search.kind {
        SearchType::ByName => node.find_by_name(search.name.as_deref(), &search.attrs),
        SearchType::ByString => search
            .text
            .as_ref()
            .and_then(|pattern| node.find_by_text(pattern)),
        SearchType::NextSibling => node.next_sibling_element(),
    };

    found.ok_or_else(|| search.not_found())
}

/// Concatenated text of an element and all its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
