pub mod config;
pub mod email_analyzer;
pub mod engine;
pub mod error;
pub mod url_analyzer;

pub use config::{AnalyzerConfig, EngineConfig};
pub use email_analyzer::EmailAnalyzer;
pub use engine::{AnalysisResult, IndicatorGroup, RiskLevel, RuleEngine};
pub use error::AnalysisError;
pub use url_analyzer::UrlAnalyzer;

/// Analyze a URL with the built-in rule corpus.
pub fn analyze_url(url: &str) -> Result<AnalysisResult, AnalysisError> {
    UrlAnalyzer::new().analyze(url)
}

/// Analyze email body text with the built-in rule corpus.
pub fn analyze_email(content: &str) -> Result<AnalysisResult, AnalysisError> {
    EmailAnalyzer::new().analyze(content)
}
