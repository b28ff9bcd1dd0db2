use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

use super::{fetch_or_skip, progress_bar, report_unavailable};
use crate::constants::{MAIN_DOC_URL, WHATS_NEW_URL_POSTFIX};
use crate::error::Result;
use crate::fetcher::{FetchSession, Transport};
use crate::locator::{Search, SearchType, element_text, find_tag};
use crate::table::Table;

pub const HEADER: [&str; 3] = ["Link to article", "Title", "Editor, author"];

const CHANGELOG_HREF: &str = "changelog.html";

static ENTRY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li.toctree-l1 > a[href]").expect("Failed to parse entry selector - this is a bug")
});

/// Collect title and editors for every "What's New" article.
pub async fn whats_new<T: Transport>(session: &FetchSession<T>) -> Result<Table> {
    let whats_new_url = Url::parse(MAIN_DOC_URL)?.join(WHATS_NEW_URL_POSTFIX)?;

    let links = {
        let index = session.get_document(whats_new_url.as_str()).await?;
        let section = find_tag(
            index.root_element(),
            &Search::new(SearchType::ByName).attr("id", "what-s-new-in-python"),
        )?;
        let wrapper = find_tag(section, &Search::tag("div").attr("class", "toctree-wrapper"))?;

        wrapper
            .select(&ENTRY_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| *href != CHANGELOG_HREF)
            .map(|href| -> Result<String> { Ok(whats_new_url.join(href)?.to_string()) })
            .collect::<Result<Vec<_>>>()?
    };

    let mut results = Table::new(&HEADER);
    let mut unavailable = Vec::new();
    let progress = progress_bar(links.len(), "whats-new");

    for version_link in links {
        progress.inc(1);
        let Some(page) = fetch_or_skip(session, &version_link, &mut unavailable).await? else {
            continue;
        };

        let root = page.root_element();
        let title = element_text(find_tag(root, &Search::tag("h1"))?);
        let authors = element_text(find_tag(root, &Search::tag("dl"))?).replace('\n', " ");

        results.push(vec![version_link, title.trim().to_string(), authors.trim().to_string()]);
    }

    progress.finish();
    report_unavailable(&unavailable);

    Ok(results)
}
