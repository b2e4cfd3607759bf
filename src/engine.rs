use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Aggregation, AnalyzerConfig, Matcher};

/// Normalized view of one submission. URL analysis fills `host` and `scheme`;
/// email analysis leaves them empty. `text` is always lower-cased.
#[derive(Debug, Default, Clone)]
pub struct AnalysisInput {
    pub subject: String,
    pub text: String,
    pub host: Option<String>,
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// Matched evidence for one rule category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// The sole data structure handed back to callers: plain data, no references
/// into the rule corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub subject: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub indicators: Vec<IndicatorGroup>,
    pub recommendations: Vec<String>,
}

/// Applies one analyzer profile to normalized input: evaluate every rule,
/// sum contributed weights, classify, and attach recommendations.
pub struct RuleEngine {
    config: AnalyzerConfig,
    ip_host: Regex,
}

impl RuleEngine {
    pub fn new(config: AnalyzerConfig) -> Self {
        RuleEngine {
            config,
            ip_host: Regex::new(r"^\d+\.\d+\.\d+\.\d+").unwrap(),
        }
    }

    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let mut risk_score = 0u32;
        let mut indicators: Vec<IndicatorGroup> = Vec::new();

        for rule in &self.config.rules {
            let matched = self.matched_terms(&rule.matcher, input);
            if matched.is_empty() {
                continue;
            }

            let items = match rule.aggregation {
                Aggregation::OncePerCategory => {
                    risk_score += rule.weight;
                    vec![rule.description.clone()]
                }
                Aggregation::OncePerMatchedTerm => {
                    risk_score += rule.weight * matched.len() as u32;
                    matched
                        .iter()
                        .map(|term| rule.description.replace("{term}", term))
                        .collect()
                }
            };

            log::debug!(
                "rule '{}' matched ({} item(s)), score now {}",
                rule.category,
                items.len(),
                risk_score
            );
            push_items(&mut indicators, &rule.category, items);
        }

        if indicators.is_empty() {
            indicators.push(IndicatorGroup {
                category: self.config.fallback.category.clone(),
                items: vec![self.config.fallback.message.clone()],
            });
        }

        let risk_level = self.config.thresholds.classify(risk_score);
        let recommendations = self.config.recommendations.for_level(risk_level).to_vec();

        AnalysisResult {
            subject: input.subject.clone(),
            risk_score,
            risk_level,
            indicators,
            recommendations,
        }
    }

    /// Terms that triggered the matcher, in declaration order. Structural
    /// matchers report the offending value as a single pseudo-term.
    fn matched_terms(&self, matcher: &Matcher, input: &AnalysisInput) -> Vec<String> {
        match matcher {
            Matcher::HostContains { terms } => match &input.host {
                Some(host) => terms
                    .iter()
                    .filter(|term| host.contains(term.as_str()))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            },
            Matcher::TextContains { terms } => terms
                .iter()
                .filter(|term| input.text.contains(term.as_str()))
                .cloned()
                .collect(),
            Matcher::IpAddressHost => match &input.host {
                Some(host) if self.ip_host.is_match(host) => vec![host.clone()],
                _ => Vec::new(),
            },
            Matcher::ExcessiveSubdomains { max_labels } => match &input.host {
                Some(host) if host.split('.').count() > *max_labels => vec![host.clone()],
                _ => Vec::new(),
            },
            Matcher::InsecureTransport => match input.scheme.as_deref() {
                Some(scheme) if scheme != "https" => vec![scheme.to_string()],
                _ => Vec::new(),
            },
        }
    }
}

fn push_items(indicators: &mut Vec<IndicatorGroup>, category: &str, items: Vec<String>) {
    if let Some(group) = indicators.iter_mut().find(|g| g.category == category) {
        group.items.extend(items);
    } else {
        indicators.push(IndicatorGroup {
            category: category.to_string(),
            items,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackNotice, RecommendationSet, Rule, Thresholds};

    fn create_test_config() -> AnalyzerConfig {
        AnalyzerConfig {
            rules: vec![
                Rule {
                    category: "Urgency Tactics".to_string(),
                    weight: 15,
                    aggregation: Aggregation::OncePerMatchedTerm,
                    matcher: Matcher::TextContains {
                        terms: vec!["urgent".to_string(), "hurry".to_string()],
                    },
                    description: "Contains \"{term}\"".to_string(),
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
                high: vec!["stop".to_string()],
                medium: vec!["caution".to_string()],
                low: vec!["fine".to_string()],
            },
            fallback: FallbackNotice {
                category: "Analysis Results".to_string(),
                message: "Nothing detected".to_string(),
            },
        }
    }

    fn text_input(text: &str) -> AnalysisInput {
        AnalysisInput {
            subject: text.to_string(),
            text: text.to_lowercase(),
            host: None,
            scheme: None,
        }
    }

    #[test]
    fn test_per_term_weighting() {
        let engine = RuleEngine::new(create_test_config());
        let result = engine.analyze(&text_input("urgent, please hurry"));

        assert_eq!(result.risk_score, 30);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(
            result.indicators[0].items,
            vec!["Contains \"urgent\"", "Contains \"hurry\""]
        );
        assert_eq!(result.recommendations, vec!["caution".to_string()]);
    }

    #[test]
    fn test_repeated_term_counted_once() {
        let engine = RuleEngine::new(create_test_config());
        let result = engine.analyze(&text_input("urgent urgent urgent"));

        assert_eq!(result.risk_score, 15);
        assert_eq!(result.indicators[0].items.len(), 1);
    }

    #[test]
    fn test_once_per_category() {
        let engine = RuleEngine::new(create_test_config());
        let input = AnalysisInput {
            subject: "http://example.com".to_string(),
            text: "http://example.com".to_string(),
            host: Some("example.com".to_string()),
            scheme: Some("http".to_string()),
        };
        let result = engine.analyze(&input);

        assert_eq!(result.risk_score, 15);
        assert_eq!(
            result.indicators[0].items,
            vec!["Not using secure HTTPS protocol"]
        );
    }

    #[test]
    fn test_no_match_fallback() {
        let engine = RuleEngine::new(create_test_config());
        let result = engine.analyze(&text_input("nothing interesting here"));

        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].category, "Analysis Results");
        assert_eq!(result.indicators[0].items, vec!["Nothing detected"]);
    }

    #[test]
    fn test_same_category_rules_merge() {
        let mut config = create_test_config();
        config.rules.push(Rule {
            category: "Urgency Tactics".to_string(),
            weight: 5,
            aggregation: Aggregation::OncePerMatchedTerm,
            matcher: Matcher::TextContains {
                terms: vec!["act now".to_string()],
            },
            description: "Contains \"{term}\"".to_string(),
        });

        let engine = RuleEngine::new(config);
        let result = engine.analyze(&text_input("urgent: act now"));

        assert_eq!(result.risk_score, 20);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(
            result.indicators[0].items,
            vec!["Contains \"urgent\"", "Contains \"act now\""]
        );
    }

    #[test]
    fn test_determinism() {
        let engine = RuleEngine::new(create_test_config());
        let first = engine.analyze(&text_input("urgent, please hurry"));
        let second = engine.analyze(&text_input("urgent, please hurry"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonicity() {
        let engine = RuleEngine::new(create_test_config());
        let one = engine.analyze(&text_input("urgent"));
        let two = engine.analyze(&text_input("urgent, please hurry"));

        assert!(two.risk_score >= one.risk_score);
        assert!(two.risk_level >= one.risk_level);
    }
}
