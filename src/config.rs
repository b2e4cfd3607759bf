use serde::{Deserialize, Serialize};

use crate::engine::RiskLevel;

/// Top-level configuration: one analyzer profile per input kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub url: AnalyzerConfig,
    pub email: AnalyzerConfig,
}

/// Everything one analyzer needs: its rule corpus, its score thresholds, the
/// guidance text per risk level, and the notice emitted when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub rules: Vec<Rule>,
    pub thresholds: Thresholds,
    pub recommendations: RecommendationSet,
    pub fallback: FallbackNotice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub category: String,
    pub weight: u32,
    pub aggregation: Aggregation,
    pub matcher: Matcher,
    /// Indicator text. Per-term rules may reference the matched term as
    /// `{term}`; per-category rules use the text verbatim.
    pub description: String,
}

/// How often a rule contributes its weight: once when anything in the
/// category matched, or once for every distinct matched term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    OncePerCategory,
    OncePerMatchedTerm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Matcher {
    /// Hostname contains any of the listed substrings.
    HostContains { terms: Vec<String> },
    /// Full normalized text contains any of the listed substrings.
    TextContains { terms: Vec<String> },
    /// Hostname is a dotted-quad literal instead of a domain name.
    IpAddressHost,
    /// Hostname splits into more than `max_labels` dot-separated labels.
    ExcessiveSubdomains { max_labels: usize },
    /// URL scheme is something other than https.
    InsecureTransport,
}

/// Lower bounds of the medium and high tiers. Intervals are closed-open:
/// a score equal to a bound lands in the higher tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    pub medium: u32,
    pub high: u32,
}

impl Thresholds {
    pub fn classify(&self, score: u32) -> RiskLevel {
        if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl RecommendationSet {
    pub fn for_level(&self, level: RiskLevel) -> &[String] {
        match level {
            RiskLevel::High => &self.high,
            RiskLevel::Medium => &self.medium,
            RiskLevel::Low => &self.low,
        }
    }
}

/// Synthetic indicator substituted when no rule matched, so results never
/// carry an empty indicator list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackNotice {
    pub category: String,
    pub message: String,
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            url: AnalyzerConfig::url_defaults(),
            email: AnalyzerConfig::email_defaults(),
        }
    }
}

impl AnalyzerConfig {
    /// Built-in URL corpus. Every rule contributes its weight at most once
    /// per analysis.
    pub fn url_defaults() -> Self {
        AnalyzerConfig {
            rules: vec![
                Rule {
                    category: "URL Shortening".to_string(),
                    weight: 30,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::HostContains {
                        terms: strings(&["bit.ly", "tinyurl.com", "short.link", "click.me"]),
                    },
                    description: "Uses URL shortening service".to_string(),
                },
                Rule {
                    category: "Homograph Attack".to_string(),
                    weight: 40,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::HostContains {
                        terms: strings(&["paypai", "arnazon", "rnicrosoft", "goog1e"]),
                    },
                    description: "Contains character substitution (homograph attack)"
                        .to_string(),
                },
                Rule {
                    category: "Suspicious Keywords".to_string(),
                    weight: 20,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "urgent",
                            "verify",
                            "suspended",
                            "click",
                            "login",
                            "secure",
                        ]),
                    },
                    description: "Contains suspicious keywords".to_string(),
                },
                Rule {
                    category: "IP Address Host".to_string(),
                    weight: 35,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::IpAddressHost,
                    description: "Uses IP address instead of domain name".to_string(),
                },
                Rule {
                    category: "Excessive Subdomains".to_string(),
                    weight: 25,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::ExcessiveSubdomains { max_labels: 4 },
                    description: "Excessive number of subdomains".to_string(),
                },
                Rule {
                    category: "Insecure Transport".to_string(),
                    weight: 15,
                    aggregation: Aggregation::OncePerCategory,
                    matcher: Matcher::InsecureTransport,
                    description: "Not using secure HTTPS protocol".to_string(),
                },
            ],
            thresholds: Thresholds {
                medium: 25,
                high: 50,
            },
            recommendations: RecommendationSet {
                high: strings(&[
                    "Do not visit this URL",
                    "Report this URL if received via email or message",
                ]),
                medium: strings(&[
                    "Exercise caution when visiting this URL",
                    "Verify the sender if received via communication",
                ]),
                low: strings(&[
                    "URL appears safe based on basic analysis",
                    "Always verify legitimacy of sensitive requests",
                ]),
            },
            fallback: FallbackNotice {
                category: "Analysis Results".to_string(),
                message: "No obvious suspicious indicators found".to_string(),
            },
        }
    }

    /// Built-in email corpus. Every distinct matched term contributes its own
    /// weight instance.
    pub fn email_defaults() -> Self {
        AnalyzerConfig {
            rules: vec![
                Rule {
                    category: "Urgency Tactics".to_string(),
                    weight: 15,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "urgent",
                            "immediate",
                            "expires today",
                            "act now",
                            "limited time",
                            "hurry",
                        ]),
                    },
                    description: "Contains \"{term}\"".to_string(),
                },
                Rule {
                    category: "Sensitive Information Requests".to_string(),
                    weight: 25,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "password",
                            "credit card",
                            "ssn",
                            "social security",
                            "bank account",
                            "pin",
                            "verification",
                        ]),
                    },
                    description: "Requests {term}".to_string(),
                },
                Rule {
                    category: "Suspicious Phrases".to_string(),
                    weight: 20,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "verify your account",
                            "suspended account",
                            "click here",
                            "confirm identity",
                            "security alert",
                            "unauthorized access",
                        ]),
                    },
                    description: "Contains \"{term}\"".to_string(),
                },
                Rule {
                    category: "Grammar/Spelling Issues".to_string(),
                    weight: 10,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "recieve",
                            "occured",
                            "seperate",
                            "definately",
                            "youre account",
                        ]),
                    },
                    description: "Misspelling: \"{term}\"".to_string(),
                },
                Rule {
                    category: "Generic Communication".to_string(),
                    weight: 5,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: strings(&[
                            "dear customer",
                            "dear user",
                            "dear client",
                            "valued customer",
                        ]),
                    },
                    description: "Uses generic greeting: \"{term}\"".to_string(),
                },
            ],
            thresholds: Thresholds {
                medium: 30,
                high: 60,
            },
            recommendations: RecommendationSet {
                high: strings(&[
                    "This email shows multiple phishing indicators - do not respond or click any links",
                    "Report this email to your IT department or email provider",
                    "Delete the email immediately",
                ]),
                medium: strings(&[
                    "Exercise caution - verify sender through independent means",
                    "Do not provide sensitive information via email",
                    "Contact the organization directly using official contact methods",
                ]),
                low: strings(&[
                    "Email appears relatively safe based on content analysis",
                    "Still verify sender if requesting sensitive actions",
                    "Be cautious of any unexpected requests",
                ]),
            },
            fallback: FallbackNotice {
                category: "Analysis Results".to_string(),
                message: "No obvious phishing indicators detected in content".to_string(),
            },
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_threshold_boundaries() {
        let thresholds = AnalyzerConfig::url_defaults().thresholds;

        assert_eq!(thresholds.classify(24), RiskLevel::Low);
        assert_eq!(thresholds.classify(25), RiskLevel::Medium);
        assert_eq!(thresholds.classify(49), RiskLevel::Medium);
        assert_eq!(thresholds.classify(50), RiskLevel::High);
    }

    #[test]
    fn test_email_threshold_boundaries() {
        let thresholds = AnalyzerConfig::email_defaults().thresholds;

        assert_eq!(thresholds.classify(29), RiskLevel::Low);
        assert_eq!(thresholds.classify(30), RiskLevel::Medium);
        assert_eq!(thresholds.classify(59), RiskLevel::Medium);
        assert_eq!(thresholds.classify(60), RiskLevel::High);
    }

    #[test]
    fn test_recommendations_per_level() {
        let config = AnalyzerConfig::url_defaults();

        assert_eq!(
            config.recommendations.for_level(RiskLevel::High)[0],
            "Do not visit this URL"
        );
        assert_eq!(config.recommendations.for_level(RiskLevel::Medium).len(), 2);
        assert_eq!(config.recommendations.for_level(RiskLevel::Low).len(), 2);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = EngineConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reloaded: EngineConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reloaded.url.rules.len(), 6);
        assert_eq!(reloaded.email.rules.len(), 5);
        assert_eq!(reloaded.url.thresholds.high, 50);
        assert_eq!(reloaded.email.thresholds.medium, 30);
        assert_eq!(
            reloaded.email.rules[0].aggregation,
            Aggregation::OncePerMatchedTerm
        );
    }
}
