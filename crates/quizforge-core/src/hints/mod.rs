//! Hint Filter Module
//!
//! Keeps agent-produced hints conceptual. A regex gate blocks anything that
//! looks like code outright; an optional classifier capability catches what
//! the patterns miss. Hints that pass are sanitized of code fences and
//! backticks. A failing classifier never blocks the pipeline; filtering
//! falls back to the regex gate alone.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Classifier probability above which a hint counts as code
pub const CODE_PROBABILITY_THRESHOLD: f64 = 0.35;

const REGEX_BLOCK_MESSAGE: &str =
    "Hint removed: contains code. Provide conceptual explanation only.";
const CLASSIFIER_BLOCK_MESSAGE: &str =
    "Hint removed: contains code-like content. Use conceptual language.";

const CODE_PATTERNS: &[&str] = &[
    r"\bdef\b",
    r"\bclass\b",
    r"\bimport\b",
    r"\bfor\b",
    r"\bwhile\b",
    r"\{.*\}",
    r"<.*?>",
    r"->",
    r"return\s+",
    r";\s*$",
    r"printf\(",
    r"std::",
];

static COMPILED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    CODE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid code pattern"))
        .collect()
});

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid fence pattern"));

// ============================================================================
// CLASSIFIER CAPABILITY
// ============================================================================

/// Classifier error (provider-specific detail only)
#[derive(Debug, Clone)]
pub struct ClassifierError(pub String);

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Classifier failed: {}", self.0)
    }
}

impl std::error::Error for ClassifierError {}

/// A model that estimates the probability a hint contains code
pub trait HintClassifier: Send + Sync {
    /// Probability in [0, 1] that `text` is code-like
    fn code_probability(&self, text: &str) -> Result<f64, ClassifierError>;
}

/// Classifier capability, dispatched on rather than probed for
#[derive(Clone, Default)]
pub enum Classifier {
    /// A configured classifier model
    Configured(Arc<dyn HintClassifier>),
    /// Regex gate only
    #[default]
    Unconfigured,
}

// ============================================================================
// FILTER
// ============================================================================

/// Outcome of filtering one hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredHint {
    /// The hint was rejected; the message explains what to produce instead
    Blocked(&'static str),
    /// The hint passed, sanitized
    Clean(String),
}

impl FilteredHint {
    /// The text a learner would see
    pub fn text(&self) -> &str {
        match self {
            FilteredHint::Blocked(message) => message,
            FilteredHint::Clean(text) => text,
        }
    }

    /// Whether the hint was rejected
    pub fn is_blocked(&self) -> bool {
        matches!(self, FilteredHint::Blocked(_))
    }
}

/// Conceptual-hint filter
#[derive(Clone, Default)]
pub struct HintFilter {
    classifier: Classifier,
}

impl HintFilter {
    /// Create a regex-only filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter backed by a classifier model
    pub fn with_classifier(classifier: Arc<dyn HintClassifier>) -> Self {
        Self {
            classifier: Classifier::Configured(classifier),
        }
    }

    /// Filter one hint
    pub fn filter(&self, text: &str) -> FilteredHint {
        if COMPILED_PATTERNS.iter().any(|p| p.is_match(text)) {
            return FilteredHint::Blocked(REGEX_BLOCK_MESSAGE);
        }

        if let Classifier::Configured(model) = &self.classifier {
            match model.code_probability(text) {
                Ok(probability) if probability > CODE_PROBABILITY_THRESHOLD => {
                    return FilteredHint::Blocked(CLASSIFIER_BLOCK_MESSAGE);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "hint classifier failed, using regex gate only");
                }
            }
        }

        let sanitized = CODE_FENCE.replace_all(text, "").replace('`', "");
        FilteredHint::Clean(sanitized.trim().to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier(f64);

    impl HintClassifier for FixedClassifier {
        fn code_probability(&self, _text: &str) -> Result<f64, ClassifierError> {
            Ok(self.0)
        }
    }

    struct BrokenClassifier;

    impl HintClassifier for BrokenClassifier {
        fn code_probability(&self, _text: &str) -> Result<f64, ClassifierError> {
            Err(ClassifierError("model offline".to_string()))
        }
    }

    #[test]
    fn test_code_keywords_blocked() {
        let filter = HintFilter::new();
        assert!(filter.filter("Use a for loop to iterate the array.").is_blocked());
        assert!(filter.filter("def solve(): pass").is_blocked());
        assert!(filter.filter("import heapq first").is_blocked());
        assert!(filter.filter("call std::sort on it").is_blocked());
    }

    #[test]
    fn test_conceptual_hint_passes() {
        let filter = HintFilter::new();
        let result = filter.filter("Think about which element dominates the others.");
        assert!(!result.is_blocked());
        assert_eq!(result.text(), "Think about which element dominates the others.");
    }

    #[test]
    fn test_fences_and_backticks_sanitized() {
        let filter = HintFilter::new();
        let result = filter.filter("Consider sorting first. ```x = 1``` Then scan `once`.");
        assert_eq!(result, FilteredHint::Clean("Consider sorting first.  Then scan once.".to_string()));
    }

    #[test]
    fn test_classifier_blocks_above_threshold() {
        let filter = HintFilter::with_classifier(Arc::new(FixedClassifier(0.9)));
        let result = filter.filter("Assign the first value to a variable named result.");
        assert!(result.is_blocked());
    }

    #[test]
    fn test_classifier_below_threshold_passes() {
        let filter = HintFilter::with_classifier(Arc::new(FixedClassifier(0.1)));
        assert!(!filter.filter("Compare neighbors pairwise.").is_blocked());
    }

    #[test]
    fn test_broken_classifier_degrades_to_regex_gate() {
        let filter = HintFilter::with_classifier(Arc::new(BrokenClassifier));
        assert!(!filter.filter("Compare neighbors pairwise.").is_blocked());
        assert!(filter.filter("Use a while loop here.").is_blocked());
    }
}
