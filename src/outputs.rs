use chrono::Local;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::FILE_DATETIME_FORMAT;
use crate::error::{ParserError, Result};
use crate::modes::Mode;
use crate::settings::Settings;
use crate::table::Table;

/// Output modes beyond the default one-line-per-row print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Aligned table on the console
    Pretty,
    /// CSV file in the results directory
    File,
}

impl FromStr for OutputMode {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "file" => Ok(Self::File),
            other => Err(ParserError::InvalidOutputSelector(other.to_string())),
        }
    }
}

pub fn control_output(table: &Table, mode: Mode, output: Option<OutputMode>, settings: &Settings) -> Result<()> {
    match output {
        Some(OutputMode::Pretty) => print!("{}", render_pretty(table)),
        Some(OutputMode::File) => {
            file_output(table, mode, &settings.results_path())?;
        }
        None => print!("{}", render_lines(table)),
    }
    Ok(())
}

pub fn render_pretty(table: &Table) -> String {
    let mut widths = vec![0; table.width()];
    for row in table.all_rows() {
        for (width, field) in widths.iter_mut().zip(row) {
            *width = (*width).max(field.chars().count());
        }
    }

    let border: String = widths
        .iter()
        .map(|width| format!("+{}", "-".repeat(width + 2)))
        .collect::<String>()
        + "+\n";

    let line = |row: &[String]| {
        let cells: String = row
            .iter()
            .zip(&widths)
            .map(|(field, width)| format!("| {:<width$} ", field, width = *width))
            .collect();
        cells + "|\n"
    };

    let mut out = border.clone();
    out.push_str(&line(table.header()));
    out.push_str(&border);
    for row in table.rows() {
        out.push_str(&line(row.as_slice()));
    }
    out.push_str(&border);
    out
}

pub fn render_lines(table: &Table) -> String {
    table
        .all_rows()
        .map(|row| row.join(" ") + "\n")
        .collect()
}

/// Unix CSV dialect: every field quoted, quotes doubled, `\n` terminated.
pub fn render_csv(table: &Table) -> String {
    table
        .all_rows()
        .map(|row| {
            row.iter()
                .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
                + "\n"
        })
        .collect()
}

/// Write the table to `<results_dir>/<mode>_<timestamp>.csv`.
pub fn file_output(table: &Table, mode: Mode, results_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;

    let file_path = results_dir.join(format!(
        "{}_{}.csv",
        mode,
        Local::now().format(FILE_DATETIME_FORMAT)
    ));
    std::fs::write(&file_path, render_csv(table))?;

    log::info!("File with results saved: {}", file_path.display());
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(&["Status", "Count"]);
        table.push(vec!["Final".into(), "312".into()]);
        table.push(vec!["Say \"hi\"".into(), "1".into()]);
        table
    }

    #[test]
    fn test_render_pretty_aligns_left() {
        let expected = "\
+----------+-------+
| Status   | Count |
+----------+-------+
| Final    | 312   |
| Say \"hi\" | 1     |
+----------+-------+
";
        assert_eq!(render_pretty(&sample()), expected);
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(render_lines(&sample()), "Status Count\nFinal 312\nSay \"hi\" 1\n");
    }

    #[test]
    fn test_render_csv_quotes_everything() {
        assert_eq!(
            render_csv(&sample()),
            "\"Status\",\"Count\"\n\"Final\",\"312\"\n\"Say \"\"hi\"\"\",\"1\"\n"
        );
    }

    #[test]
    fn test_file_output_creates_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");

        let path = file_output(&sample(), Mode::Pep, &results_dir).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pep_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), render_csv(&sample()));
    }

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!("pretty".parse::<OutputMode>().unwrap(), OutputMode::Pretty);
        assert!(matches!(
            "json".parse::<OutputMode>(),
            Err(ParserError::InvalidOutputSelector(s)) if s == "json"
        ));
    }
}
