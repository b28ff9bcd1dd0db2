use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use std::fmt;

use crate::error::{ParserError, Result};
use crate::fetcher::{FetchSession, Transport};
use crate::settings::Settings;
use crate::table::Table;

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

pub use download::download;
pub use latest_versions::{latest_versions, parse_version};
pub use pep::{Mismatch, StatusReport, StatusTally, collect_statuses, pep};
pub use whats_new::whats_new;

/// Parser modes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Articles about what's new in each Python version
    WhatsNew,
    /// Documentation links with version and status
    LatestVersions,
    /// Download the A4 PDF documentation archive
    Download,
    /// Count PEPs by status
    Pep,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run the extractor for `mode`. Only `download` yields no table.
pub async fn extract<T: Transport>(
    mode: Mode,
    session: &FetchSession<T>,
    settings: &Settings,
) -> Result<Option<Table>> {
    match mode {
        Mode::WhatsNew => whats_new(session).await.map(Some),
        Mode::LatestVersions => latest_versions(session).await.map(Some),
        Mode::Download => download(session, &settings.downloads_path())
            .await
            .map(|_| None),
        Mode::Pep => pep(session).await.map(Some),
    }
}

/// Fetch a per-row page. Transport failures are recorded in `unavailable`
/// and yield `None` so the caller can move on to the next row.
pub(crate) async fn fetch_or_skip<T: Transport>(
    session: &FetchSession<T>,
    url: &str,
    unavailable: &mut Vec<String>,
) -> Result<Option<Html>> {
    match session.get_document(url).await {
        Ok(document) => Ok(Some(document)),
        Err(e @ ParserError::FetchFailed { .. }) => {
            unavailable.push(e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn report_unavailable(unavailable: &[String]) {
    if !unavailable.is_empty() {
        log::error!("Unavailable pages:\n{}", unavailable.join("\n"));
    }
}

pub(crate) fn progress_bar(len: usize, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}
