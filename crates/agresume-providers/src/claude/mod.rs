pub mod provider;
pub(crate) mod schema;

pub use self::provider::ClaudeProvider;
