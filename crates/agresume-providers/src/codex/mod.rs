pub mod io;
pub mod provider;
pub(crate) mod schema;

pub use self::io::{CodexSessionScan, scan_codex_file};
pub use self::provider::CodexProvider;
