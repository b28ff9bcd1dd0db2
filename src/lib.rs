// Python documentation parser
//
// Scrapes docs.python.org and peps.python.org: "What's New" articles,
// documentation versions, the PDF archive and PEP status counts.

pub mod cache;
pub mod cli;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod locator;
pub mod logging;
pub mod modes;
pub mod outputs;
pub mod settings;
pub mod table;

// Re-export main types for convenience
pub use cache::ResponseCache;
pub use cli::Cli;
pub use error::{ParserError, Result, TransportError};
pub use fetcher::{FetchSession, HttpTransport, Transport};
pub use locator::{Node, Search, SearchType, TextPattern, find_tag};
pub use modes::Mode;
pub use outputs::OutputMode;
pub use settings::Settings;
pub use table::Table;
