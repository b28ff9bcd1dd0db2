use crate::error::Result;
use crate::fetcher::{FetchSession, Transport};
use crate::modes::{self, Mode};
use crate::outputs::{self, OutputMode};
use crate::settings::Settings;

/// Run one parser mode and render whatever table it produced.
pub async fn run<T: Transport>(
    mode: Mode,
    session: &FetchSession<T>,
    output: Option<OutputMode>,
    settings: &Settings,
) -> Result<()> {
    log::info!("Running mode: {}", mode);

    if let Some(table) = modes::extract(mode, session, settings).await? {
        outputs::control_output(&table, mode, output, settings)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAIN_DOC_URL;
    use crate::error::ParserError;
    use crate::fetcher::testing::{StubTransport, session};

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            base_dir: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_file_output_written_for_table_modes() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let page = r#"<div class="sphinxsidebarwrapper"><ul>
            <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
            <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
        </ul></div>"#;
        let session = session(StubTransport::default().with_page(MAIN_DOC_URL, page));

        run(Mode::LatestVersions, &session, Some(OutputMode::File), &settings)
            .await
            .unwrap();

        let files: Vec<_> = std::fs::read_dir(settings.results_path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let csv = std::fs::read_to_string(&files[0]).unwrap();
        assert!(csv.starts_with("\"Link to documentation\",\"Version\",\"Status\"\n"));
        assert!(csv.contains("\"3.13\",\"stable\""));
    }

    #[tokio::test]
    async fn test_extractor_error_skips_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let session = session(StubTransport::default().with_page(MAIN_DOC_URL, "<p>empty</p>"));

        let err = run(Mode::LatestVersions, &session, Some(OutputMode::File), &settings)
            .await
            .unwrap_err();

        assert!(matches!(err, ParserError::NotFound { .. }));
        assert!(!settings.results_path().exists());
    }
}
