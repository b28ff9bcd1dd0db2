use regex::Regex;
use scraper::Selector;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use super::{fetch_or_skip, progress_bar, report_unavailable};
use crate::constants::{PEP_URL, expected_statuses};
use crate::error::{ParserError, Result};
use crate::fetcher::{FetchSession, Transport};
use crate::locator::{Search, TextPattern, element_text, find_tag};
use crate::table::Table;

pub const HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL: &str = "Total";

static INDEX_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("Failed to parse row selector - this is a bug"));

static STATUS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Status").expect("Failed to compile status pattern - this is a bug"));

/// Per-status counts in the order statuses were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn record(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(known, _)| known == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(known, _)| known == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(status, count)| (status.as_str(), *count))
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(&HEADER);
        for (status, count) in self.iter() {
            table.push(vec![status.to_string(), count.to_string()]);
        }
        table.push(vec![TOTAL.to_string(), self.total().to_string()]);
        table
    }
}

/// A PEP whose page status is not allowed by its index code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub pep_link: String,
    pub current_status: String,
    pub expected_statuses: &'static [&'static str],
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatched statuses:\n{}\nStatus on page: {}\nExpected statuses: {:?}\n",
            self.pep_link, self.current_status, self.expected_statuses
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub tally: StatusTally,
    pub mismatches: Vec<Mismatch>,
    pub unavailable: Vec<String>,
}

/// Visit every PEP in the numerical index and tally its status.
pub async fn collect_statuses<T: Transport>(session: &FetchSession<T>) -> Result<StatusReport> {
    let pep_url = Url::parse(PEP_URL)?;

    let entries = {
        let index = session.get_document(pep_url.as_str()).await?;
        let section = find_tag(index.root_element(), &Search::tag("section").attr("id", "numerical-index"))?;
        let table = find_tag(section, &Search::tag("table").attr("class", "pep-zero-table"))?;

        table
            .select(&INDEX_ROWS)
            .map(|row| -> Result<(String, String)> {
                let code: String = element_text(find_tag(row, &Search::tag("abbr"))?)
                    .chars()
                    .skip(1)
                    .collect();
                let href = find_tag(row, &Search::tag("a"))?
                    .value()
                    .attr("href")
                    .ok_or_else(|| ParserError::not_found("a", "{href}", ""))?;
                Ok((code, pep_url.join(href)?.to_string()))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut report = StatusReport::default();
    let progress = progress_bar(entries.len(), "pep");

    for (code, pep_link) in entries {
        progress.inc(1);
        let Some(page) = fetch_or_skip(session, &pep_link, &mut report.unavailable).await? else {
            continue;
        };

        let label = find_tag(
            page.root_element(),
            &Search::string(TextPattern::Regex(STATUS_LABEL.clone())),
        )?;
        let current_status = element_text(find_tag(label, &Search::next_sibling())?)
            .trim()
            .to_string();

        report.tally.record(&current_status);

        let allowed = expected_statuses(&code);
        if !allowed.contains(&current_status.as_str()) {
            report.mismatches.push(Mismatch {
                pep_link,
                current_status,
                expected_statuses: allowed,
            });
        }
    }

    progress.finish();
    Ok(report)
}

pub async fn pep<T: Transport>(session: &FetchSession<T>) -> Result<Table> {
    let report = collect_statuses(session).await?;

    report_unavailable(&report.unavailable);
    if !report.mismatches.is_empty() {
        let details: Vec<String> = report.mismatches.iter().map(ToString::to_string).collect();
        log::info!("{}", details.join("\n"));
    }

    Ok(report.tally.to_table())
}
