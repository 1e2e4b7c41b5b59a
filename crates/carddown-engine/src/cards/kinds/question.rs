use crate::cards::kind::CardKind;

/// Plain question and answer; the back sits behind the collapse button.
pub struct QuestionCard;

impl QuestionCard {
    pub const MARKER: &'static str = "{CARD}";
}

impl CardKind for QuestionCard {
    fn name(&self) -> &'static str {
        "QuestionCard"
    }

    fn marker(&self) -> &'static str {
        Self::MARKER
    }
}
