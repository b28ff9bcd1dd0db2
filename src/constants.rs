pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const WHATS_NEW_URL_POSTFIX: &str = "whatsnew/";
pub const DOWNLOAD_URL_POSTFIX: &str = "download.html";
pub const PEP_URL: &str = "https://peps.python.org/";

pub const TEXT_LINK_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";
pub const FILE_FORMAT_PATTERN: &str = r".+pdf-a4\.zip$";

pub const FILE_DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const LOG_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub const USER_AGENT: &str = concat!("docs-parser/", env!("CARGO_PKG_VERSION"));

/// Statuses a PEP may carry for each code in the numerical index.
pub const EXPECTED_STATUSES: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// Unknown codes allow no status at all.
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    EXPECTED_STATUSES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, statuses)| *statuses)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_statuses_lookup() {
        assert_eq!(expected_statuses("A"), &["Active", "Accepted"]);
        assert_eq!(expected_statuses(""), &["Draft", "Active"]);
        assert!(expected_statuses("X").is_empty());
    }
}
