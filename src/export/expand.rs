//! Expansion button detection.
//!
//! Profile pages collapse long sections behind "See More" / "+N more"
//! style controls. Candidate texts are collected from the page in bulk;
//! the filter decides in Rust which of them are expansion controls, so
//! the rules stay unit-testable without a live page.

// ============================================================================
// Imports
// ============================================================================

use regex::Regex;

// ============================================================================
// Constants
// ============================================================================

/// Selector for the first expansion pass in automatic mode.
///
/// Restricted to elements that are plausibly clickable so the pass does
/// not trip over plain text that happens to mention "more".
pub const CLICKABLE_SELECTOR: &str =
    r#"button, a, [role="button"], span[class*="clickable"], div[class*="clickable"], [onclick]"#;

/// Wide selector for follow-up passes and manual mode.
///
/// "+N more" counters are often bare spans, so the second pass casts a
/// wider net and relies on the stricter pattern to stay precise.
pub const WIDE_SELECTOR: &str = r#"button, a, [role="button"], span, div"#;

/// Anchored "+N more" pattern, matched against trimmed text.
const PLUS_COUNT_PATTERN: &str = r"(?i)^\+\d+\s+more$";

// ============================================================================
// ExpansionRule
// ============================================================================

/// One textual rule for recognizing an expansion control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionRule {
    /// Text contains both "see" and "more" (case-insensitive).
    SeeMore,
    /// Trimmed text is exactly "+N more".
    PlusCount,
    /// Text contains "show more".
    ShowMore,
    /// Text contains "expand".
    Expand,
    /// Text contains "view more".
    ViewMore,
}

// ============================================================================
// ExpansionFilter
// ============================================================================

/// A set of [`ExpansionRule`]s evaluated against candidate texts.
///
/// # Example
///
/// ```
/// use resume_export::export::ExpansionFilter;
///
/// let filter = ExpansionFilter::first_pass();
/// assert!(filter.matches("See 3 More"));
/// assert!(filter.matches("+11 more"));
/// assert!(!filter.matches("Senior Developer"));
/// ```
#[derive(Debug, Clone)]
pub struct ExpansionFilter {
    /// Rules in evaluation order.
    rules: Vec<ExpansionRule>,
    /// Compiled "+N more" pattern, shared by every rule set.
    plus_count: Regex,
}

// ============================================================================
// ExpansionFilter - Constructors
// ============================================================================

impl ExpansionFilter {
    /// Creates a filter from an explicit rule list.
    #[must_use]
    pub fn new(rules: Vec<ExpansionRule>) -> Self {
        Self {
            rules,
            // The pattern is a checked constant.
            plus_count: Regex::new(PLUS_COUNT_PATTERN).unwrap(),
        }
    }

    /// Full rule set for the first automatic pass.
    #[must_use]
    pub fn first_pass() -> Self {
        Self::new(vec![
            ExpansionRule::SeeMore,
            ExpansionRule::PlusCount,
            ExpansionRule::ShowMore,
            ExpansionRule::Expand,
            ExpansionRule::ViewMore,
        ])
    }

    /// Rule set for the first manual pass.
    ///
    /// Manual mode scans the wide selector, where "view more" shows up in
    /// too much prose to be a safe rule.
    #[must_use]
    pub fn manual_first_pass() -> Self {
        Self::new(vec![
            ExpansionRule::SeeMore,
            ExpansionRule::PlusCount,
            ExpansionRule::ShowMore,
            ExpansionRule::Expand,
        ])
    }

    /// Rule set for the second pass.
    ///
    /// After the first expansion only the "+N more" counters keep
    /// appearing, so the follow-up pass matches nothing else.
    #[must_use]
    pub fn second_pass() -> Self {
        Self::new(vec![ExpansionRule::PlusCount])
    }
}

// ============================================================================
// ExpansionFilter - Matching
// ============================================================================

impl ExpansionFilter {
    /// Returns `true` when the text satisfies any rule in the set.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let lower = trimmed.to_lowercase();

        self.rules.iter().any(|rule| match rule {
            ExpansionRule::SeeMore => lower.contains("see") && lower.contains("more"),
            ExpansionRule::PlusCount => self.plus_count.is_match(trimmed),
            ExpansionRule::ShowMore => lower.contains("show more"),
            ExpansionRule::Expand => lower.contains("expand"),
            ExpansionRule::ViewMore => lower.contains("view more"),
        })
    }

    /// Returns the indices of matching candidates, in collection order.
    ///
    /// The indices address the node stash left behind by candidate
    /// collection, so they feed straight into the indexed click.
    #[must_use]
    pub fn select<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, text)| self.matches(text.as_ref()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns the rules in this set.
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[ExpansionRule] {
        &self.rules
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_see_more_needs_both_words() {
        let filter = ExpansionFilter::first_pass();
        assert!(filter.matches("See More"));
        assert!(filter.matches("See 3 More Skills"));
        assert!(filter.matches("see more"));
        assert!(!filter.matches("See all"));
        assert!(!filter.matches("More info"));
    }

    #[test]
    fn test_plus_count_is_anchored() {
        let filter = ExpansionFilter::second_pass();
        assert!(filter.matches("+11 more"));
        assert!(filter.matches("+7 More"));
        assert!(filter.matches("  +1 more  "));
        assert!(!filter.matches("+11 more skills"));
        assert!(!filter.matches("11 more"));
        assert!(!filter.matches("+more"));
    }

    #[test]
    fn test_contains_rules_are_case_insensitive() {
        let filter = ExpansionFilter::first_pass();
        assert!(filter.matches("SHOW MORE"));
        assert!(filter.matches("Expand section"));
        assert!(filter.matches("View More Projects"));
    }

    #[test]
    fn test_manual_first_pass_drops_view_more() {
        let filter = ExpansionFilter::manual_first_pass();
        assert!(filter.matches("show more"));
        assert!(filter.matches("expand"));
        assert!(!filter.matches("view more"));
    }

    #[test]
    fn test_second_pass_only_plus_count() {
        let filter = ExpansionFilter::second_pass();
        assert!(filter.matches("+3 more"));
        assert!(!filter.matches("See More"));
        assert!(!filter.matches("show more"));
        assert!(!filter.matches("expand"));
    }

    #[test]
    fn test_empty_and_blank_never_match() {
        let filter = ExpansionFilter::first_pass();
        assert!(!filter.matches(""));
        assert!(!filter.matches("   "));
        assert!(!filter.matches("\n\t"));
    }

    #[test]
    fn test_select_returns_collection_indices() {
        let filter = ExpansionFilter::first_pass();
        let candidates = [
            "Hire me",        // 0
            "See More",       // 1
            "Top Skills",     // 2
            "+4 more",        // 3
            "Show Less",      // 4
            "show more jobs", // 5
        ];

        assert_eq!(filter.select(&candidates), vec![1, 3, 5]);
    }

    #[test]
    fn test_select_empty_input() {
        let filter = ExpansionFilter::first_pass();
        let empty: [&str; 0] = [];
        assert!(filter.select(&empty).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plus_count_always_matches(n in 1u32..100_000, spaces in 1usize..4) {
                let filter = ExpansionFilter::second_pass();
                let text = format!("+{}{}more", n, " ".repeat(spaces));
                prop_assert!(filter.matches(&text));
            }

            #[test]
            fn plus_count_rejects_trailing_text(n in 1u32..1000, suffix in "[a-z]{1,8}") {
                let filter = ExpansionFilter::second_pass();
                let text = format!("+{n} more {suffix}");
                prop_assert!(!filter.matches(&text));
            }

            #[test]
            fn digits_and_punctuation_never_match(text in "[0-9!?.,-]{0,40}") {
                // No alphabet characters, so none of the keyword rules can
                // fire, and "+N more" needs the literal word "more".
                let filter = ExpansionFilter::first_pass();
                prop_assert!(!filter.matches(&text));
            }

            #[test]
            fn select_indices_are_in_bounds(texts in prop::collection::vec(".{0,20}", 0..50)) {
                let filter = ExpansionFilter::first_pass();
                let indices = filter.select(&texts);
                for index in indices {
                    prop_assert!(index < texts.len());
                }
            }
        }
    }
}
