use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

use crate::constants::{MAIN_DOC_URL, TEXT_LINK_PATTERN};
use crate::error::{ParserError, Result};
use crate::fetcher::{FetchSession, Transport};
use crate::locator::element_text;
use crate::table::Table;

pub const HEADER: [&str; 3] = ["Link to documentation", "Version", "Status"];

const ALL_VERSIONS: &str = "All versions";

static SIDEBAR_LISTS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.sphinxsidebarwrapper ul").expect("Failed to parse sidebar selector - this is a bug")
});

static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Failed to parse link selector - this is a bug"));

static TEXT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TEXT_LINK_PATTERN).expect("Failed to compile version pattern - this is a bug"));

/// Split "Python 3.11 (stable)" into version and status.
/// Text that does not fit the pattern is kept whole with an empty status.
pub fn parse_version(text: &str) -> (String, String) {
    match TEXT_LINK.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

pub async fn latest_versions<T: Transport>(session: &FetchSession<T>) -> Result<Table> {
    let index = session.get_document(MAIN_DOC_URL).await?;

    let versions = index
        .select(&SIDEBAR_LISTS)
        .find(|ul| element_text(*ul).contains(ALL_VERSIONS))
        .ok_or_else(|| ParserError::not_found("ul", "{}", ALL_VERSIONS))?;

    let mut results = Table::new(&HEADER);
    for a in versions.select(&LINKS) {
        let (version, status) = parse_version(&element_text(a));
        let href = a.value().attr("href").unwrap_or_default();
        results.push(vec![href.to_string(), version, status]);
    }

    Ok(results)
}
