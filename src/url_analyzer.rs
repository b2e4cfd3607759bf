use url::Url;

use crate::config::AnalyzerConfig;
use crate::engine::{AnalysisInput, AnalysisResult, RuleEngine};
use crate::error::AnalysisError;

/// URL pipeline: validate, parse, extract the hostname, then run the rule
/// corpus over the lower-cased host and URL text.
pub struct UrlAnalyzer {
    engine: RuleEngine,
}

impl Default for UrlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::url_defaults())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        UrlAnalyzer {
            engine: RuleEngine::new(config),
        }
    }

    pub fn analyze(&self, raw: &str) -> Result<AnalysisResult, AnalysisError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        let parsed =
            Url::parse(raw).map_err(|e| AnalysisError::UnparseableUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| AnalysisError::UnparseableUrl("URL has no hostname".to_string()))?;

        log::debug!("analyzing URL with host '{host}'");

        let input = AnalysisInput {
            subject: raw.to_string(),
            text: raw.to_lowercase(),
            host: Some(host.to_lowercase()),
            scheme: Some(parsed.scheme().to_string()),
        };
        Ok(self.engine.analyze(&input))
    }
}
