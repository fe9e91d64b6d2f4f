use crate::traits::SessionProvider;
use crate::{ClaudeProvider, CodexProvider, Error, GeminiProvider, Result};
use agresume_core::expand_tilde;
use agresume_types::Confidence;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Executable used to resume or relaunch sessions
    pub command: &'static str,
    pub default_log_path: &'static str,
    pub confidence: Confidence,
}

impl ProviderMetadata {
    pub fn default_log_root(&self) -> PathBuf {
        expand_tilde(self.default_log_path)
    }
}

pub(crate) const CODEX: ProviderMetadata = ProviderMetadata {
    id: "codex",
    label: "Codex",
    description: "Codex CLI",
    command: "codex",
    default_log_path: "~/.codex/sessions",
    confidence: Confidence::High,
};

pub(crate) const CLAUDE: ProviderMetadata = ProviderMetadata {
    id: "claude",
    label: "Claude Code",
    description: "Claude Code prompt history",
    command: "claude",
    default_log_path: "~/.claude/history.jsonl",
    confidence: Confidence::High,
};

pub(crate) const GEMINI: ProviderMetadata = ProviderMetadata {
    id: "gemini",
    label: "Gemini",
    description: "Gemini CLI",
    command: "gemini",
    default_log_path: "~/.gemini/tmp",
    confidence: Confidence::Medium,
};

const PROVIDERS: &[ProviderMetadata] = &[CODEX, CLAUDE, GEMINI];

pub fn get_all_providers() -> &'static [ProviderMetadata] {
    PROVIDERS
}

pub fn get_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.id).collect()
}

pub fn get_provider_metadata(id: &str) -> Option<&'static ProviderMetadata> {
    PROVIDERS.iter().find(|p| p.id == id)
}

pub fn get_default_log_paths() -> Vec<(String, PathBuf)> {
    PROVIDERS
        .iter()
        .map(|p| (p.id.to_string(), p.default_log_root()))
        .collect()
}

/// Create a provider by id, reading from `log_root` and scoped to `cwd`
pub fn create_provider(id: &str, log_root: PathBuf, cwd: &Path) -> Result<Arc<dyn SessionProvider>> {
    let cwd = cwd.to_path_buf();
    match id {
        "codex" => Ok(Arc::new(CodexProvider::new(log_root, cwd))),
        "claude" => Ok(Arc::new(ClaudeProvider::new(log_root, cwd))),
        "gemini" => Ok(Arc::new(GeminiProvider::new(log_root, cwd))),
        _ => Err(Error::UnknownProvider(id.to_string())),
    }
}

/// Create every registered provider with its default log root
pub fn create_all_providers(cwd: &Path) -> Vec<Arc<dyn SessionProvider>> {
    PROVIDERS
        .iter()
        .filter_map(|p| create_provider(p.id, p.default_log_root(), cwd).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids_match_providers() {
        let cwd = Path::new("/work/app");
        for meta in get_all_providers() {
            let provider = create_provider(meta.id, PathBuf::from("/nonexistent"), cwd).unwrap();
            assert_eq!(provider.id(), meta.id);
            assert_eq!(provider.label(), meta.label);
        }
        assert_eq!(create_all_providers(cwd).len(), get_provider_names().len());
    }

    #[test]
    fn test_unknown_provider() {
        let result = create_provider("cursor", PathBuf::from("/tmp"), Path::new("/"));
        assert!(matches!(result, Err(Error::UnknownProvider(ref id)) if id == "cursor"));
    }

    #[test]
    fn test_metadata_lookup() {
        let gemini = get_provider_metadata("gemini").unwrap();
        assert_eq!(gemini.confidence, Confidence::Medium);
        assert_eq!(gemini.command, "gemini");
        assert!(get_provider_metadata("claude_code").is_none());
    }
}
