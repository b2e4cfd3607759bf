use crate::config::AnalyzerConfig;
use crate::engine::{AnalysisInput, AnalysisResult, RuleEngine};
use crate::error::AnalysisError;

/// Email pipeline: validate, lower-case the body, then run the per-term rule
/// corpus over the full text.
pub struct EmailAnalyzer {
    engine: RuleEngine,
}

impl Default for EmailAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::email_defaults())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        EmailAnalyzer {
            engine: RuleEngine::new(config),
        }
    }

    pub fn analyze(&self, raw: &str) -> Result<AnalysisResult, AnalysisError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AnalysisError::InvalidInput);
        }

        log::debug!("analyzing email body ({} bytes)", raw.len());

        let input = AnalysisInput {
            subject: raw.to_string(),
            text: raw.to_lowercase(),
            host: None,
            scheme: None,
        };
        Ok(self.engine.analyze(&input))
    }
}
