pub mod io;
pub mod provider;
pub(crate) mod schema;

pub use self::io::{GeminiSessionScan, read_gemini_session};
pub use self::provider::GeminiProvider;
