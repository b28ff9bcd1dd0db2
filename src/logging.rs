use anyhow::{Context, Result};
use chrono::Local;
use env_logger::{Env, Target};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::LOG_DATETIME_FORMAT;
use crate::settings::Settings;

/// Log file that is renamed to `<name>.1`, `<name>.2`, ... once it would
/// grow past `max_bytes`. At most `backup_count` old files are kept.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    size: u64,
}

impl RotatingFile {
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            size,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.size > 0
            && self.size + incoming as u64 > self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                let to = self.backup_path(index + 1);
                if to.exists() {
                    fs::remove_file(&to)?;
                }
                fs::rename(&from, &to)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        fs::rename(&self.path, &first)?;

        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Copies every record to stderr and the log file.
struct Tee {
    file: RotatingFile,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Log to the console and to a rotating file under the logs directory.
/// `RUST_LOG` overrides the default `info` level.
pub fn configure_logging(settings: &Settings) -> Result<()> {
    let logs_dir = settings.logs_path();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

    let file = RotatingFile::open(settings.log_path(), settings.log_max_bytes, settings.log_backup_count)
        .with_context(|| format!("Failed to open log file {}", settings.log_path().display()))?;

    env_logger::Builder::from_env(Env::new().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - [{}] - {}",
                Local::now().format(LOG_DATETIME_FORMAT),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })))
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.log");
        let mut log = RotatingFile::open(&path, 10, 2).unwrap();

        for line in ["first-line\n", "second-line\n", "third-line\n", "fourth-line\n"] {
            log.write_all(line.as_bytes()).unwrap();
        }
        log.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("parser.log.1")).unwrap(), "third-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("parser.log.2")).unwrap(), "second-line\n");
        assert!(!dir.path().join("parser.log.3").exists());
    }

    #[test]
    fn test_no_rotation_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parser.log");
        let mut log = RotatingFile::open(&path, 1_000, 5).unwrap();

        log.write_all(b"one\n").unwrap();
        log.write_all(b"two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        assert!(!dir.path().join("parser.log.1").exists());
    }
}
