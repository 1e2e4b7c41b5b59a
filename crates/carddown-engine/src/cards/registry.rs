use std::cmp::Reverse;

use super::kind::CardKind;
use super::kinds::{AnswerCard, MultipleChoiceCard, QuestionCard};

/// The card kinds a document may use.
///
/// Kinds are tried longest marker first, so a marker that contains another
/// one always wins over it. Kinds with equal marker length keep their
/// registration order.
pub struct CardRegistry {
    kinds: Vec<Box<dyn CardKind>>,
}

impl CardRegistry {
    pub fn empty() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Question, answer and multiple choice cards.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(QuestionCard));
        registry.register(Box::new(AnswerCard));
        registry.register(Box::new(MultipleChoiceCard));
        registry
    }

    pub fn register(&mut self, kind: Box<dyn CardKind>) {
        self.kinds.push(kind);
        self.kinds.sort_by_key(|k| Reverse(k.marker().len()));
    }

    /// The kind whose card starts on `line`, if any.
    pub fn match_line(&self, line: &str) -> Option<&dyn CardKind> {
        self.kinds
            .iter()
            .map(Box::as_ref)
            .find(|kind| kind.matches(line))
    }

    pub fn is_card(&self, line: &str) -> bool {
        self.match_line(line).is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &dyn CardKind> {
        self.kinds.iter().map(Box::as_ref)
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct LongQuestion;

    impl CardKind for LongQuestion {
        fn name(&self) -> &'static str {
            "LongQuestion"
        }

        fn marker(&self) -> &'static str {
            "{CARD}{LONG}"
        }
    }

    #[rstest]
    #[case("# What? {CARD}", Some("QuestionCard"))]
    #[case("# Capital? {ANSWER}", Some("AnswerCard"))]
    #[case("# Pick {MULTI}", Some("MultipleChoiceCard"))]
    #[case("## Nested {CARD}", None)]
    #[case("# Plain heading", None)]
    fn builtin_kinds(#[case] line: &str, #[case] expected: Option<&str>) {
        let registry = CardRegistry::builtin();
        assert_eq!(registry.match_line(line).map(|k| k.name()), expected);
    }

    #[test]
    fn longest_marker_wins_regardless_of_registration_order() {
        let mut registry = CardRegistry::builtin();
        registry.register(Box::new(LongQuestion));
        assert_eq!(
            registry.match_line("# Q {CARD}{LONG}").map(|k| k.name()),
            Some("LongQuestion")
        );
        assert_eq!(
            registry.match_line("# Q {CARD}").map(|k| k.name()),
            Some("QuestionCard")
        );
    }

    #[test]
    fn escaped_marker_is_not_a_card() {
        let registry = CardRegistry::builtin();
        let line = crate::escape::protect(r"# Q \{CARD\}");
        assert!(!registry.is_card(&line));
    }
}
