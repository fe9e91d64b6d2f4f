// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Per-session aggregation state shared by the parsers
pub(crate) mod aggregate;

// Provider implementations
pub mod claude;
pub mod codex;
pub mod gemini;

// Provider registry
pub mod registry;

// Traits
pub use traits::{FetchOptions, SessionProvider};

// Providers
pub use claude::ClaudeProvider;
pub use codex::CodexProvider;
pub use gemini::GeminiProvider;

// Registry
pub use registry::{
    ProviderMetadata, create_all_providers, create_provider, get_all_providers,
    get_default_log_paths, get_provider_metadata, get_provider_names,
};

// Error types
pub use error::{Error, Result};
