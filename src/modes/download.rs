use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

use crate::constants::{DOWNLOAD_URL_POSTFIX, FILE_FORMAT_PATTERN, MAIN_DOC_URL};
use crate::error::{ParserError, Result};
use crate::fetcher::{FetchSession, Transport};
use crate::locator::{Search, find_tag};

static ARCHIVE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILE_FORMAT_PATTERN).expect("Failed to compile archive pattern - this is a bug"));

/// Save the A4 PDF documentation archive into `downloads_dir`.
pub async fn download<T: Transport>(session: &FetchSession<T>, downloads_dir: &Path) -> Result<PathBuf> {
    let downloads_url = Url::parse(MAIN_DOC_URL)?.join(DOWNLOAD_URL_POSTFIX)?;

    let archive_url = {
        let page = session.get_document(downloads_url.as_str()).await?;
        let main = find_tag(page.root_element(), &Search::tag("div").attr("role", "main"))?;
        let table = find_tag(main, &Search::tag("table").attr("class", "docutils"))?;
        let link = find_tag(table, &Search::tag("a").attr_matching("href", ARCHIVE_HREF.clone()))?;
        downloads_url.join(link.value().attr("href").unwrap_or_default())?
    };

    let file_name = archive_url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ParserError::MissingFileName(archive_url.to_string()))?
        .to_string();

    let archive = session.get_bytes(archive_url.as_str()).await?;

    tokio::fs::create_dir_all(downloads_dir).await?;
    let archive_path = downloads_dir.join(file_name);
    tokio::fs::write(&archive_path, archive).await?;

    log::info!("Archive downloaded and saved: {}", archive_path.display());
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::{StubTransport, session};

    const DOWNLOADS_URL: &str = "https://docs.python.org/3/download.html";

    const PAGE: &str = r#"
        <html><body><div class="body" role="main">
            <table class="docutils align-default">
                <tr><td>PDF (US-Letter)</td><td><a href="archives/python-3.13-docs-pdf-letter.zip">Download</a></td></tr>
                <tr><td>PDF (A4)</td><td><a href="archives/python-3.13-docs-pdf-a4.zip">Download</a></td></tr>
            </table>
        </div></body></html>
    "#;

    #[tokio::test]
    async fn test_saves_archive_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let downloads_dir = dir.path().join("downloads");
        let transport = StubTransport::default()
            .with_page(DOWNLOADS_URL, PAGE)
            .with_page(
                "https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip",
                b"PK\x03\x04zip".to_vec(),
            );
        let session = session(transport);

        let path = download(&session, &downloads_dir).await.unwrap();
        assert_eq!(path, downloads_dir.join("python-3.13-docs-pdf-a4.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04zip");

        std::fs::write(&path, b"stale").unwrap();
        session.clear_cache().unwrap();
        download(&session, &downloads_dir).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04zip");
    }

    #[tokio::test]
    async fn test_missing_archive_link() {
        let dir = tempfile::tempdir().unwrap();
        let page = PAGE.replace("pdf-a4.zip", "pdf-a4.tar.bz2");
        let session = session(StubTransport::default().with_page(DOWNLOADS_URL, page));

        let err = download(&session, dir.path()).await.unwrap_err();
        assert!(matches!(err, ParserError::NotFound { ref tag, .. } if tag == "a"));
    }

    #[tokio::test]
    async fn test_archive_fetch_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(StubTransport::default().with_page(DOWNLOADS_URL, PAGE));

        let err = download(&session, dir.path()).await.unwrap_err();
        assert!(matches!(err, ParserError::FetchFailed { .. }));
    }
}
