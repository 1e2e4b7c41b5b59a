use rand::seq::SliceRandom;
use serde::Serialize;

use super::card::Card;

/// Exported form of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub front: String,
    pub back: String,
}

/// Cards in document order until shuffled.
#[derive(Debug, Clone, Default)]
pub struct CardCollection {
    cards: Vec<Card>,
}

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Reorders the cards randomly. The cards themselves are unchanged.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// One record per card: the markdown source with `include_styles`,
    /// otherwise the rendered text without markup.
    pub fn records(&self, include_styles: bool) -> Vec<CardRecord> {
        self.cards
            .iter()
            .map(|card| {
                let (front, back) = if include_styles {
                    (&card.front, &card.back)
                } else {
                    (&card.front_text, &card.back_text)
                };
                CardRecord {
                    kind: card.kind.to_string(),
                    front: front.clone(),
                    back: back.clone(),
                }
            })
            .collect()
    }

    /// Pretty-printed JSON array of [`records`](Self::records).
    pub fn to_json(&self, include_styles: bool) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records(include_styles))
    }
}

impl<'a> IntoIterator for &'a CardCollection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::kinds::{AnswerCard, QuestionCard};
    use crate::context::ParseContext;
    use crate::options::Options;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn collection() -> CardCollection {
        let options = Options::default();
        let mut ctx = ParseContext::new(&options);
        let mut cards = CardCollection::new();
        let question = ["# One {CARD}", "**first**"];
        let answer = ["# Two {ANSWER}", "It is {2}."];
        cards.push(Card::parse(&QuestionCard, &question, 0, &mut ctx).expect("parses"));
        cards.push(Card::parse(&AnswerCard, &answer, 2, &mut ctx).expect("parses"));
        cards
    }

    #[test]
    fn records_use_source_or_text() {
        let cards = collection();
        let styled = cards.records(true);
        assert_eq!(styled[0].front, "# One");
        assert_eq!(styled[0].back, "**first**");
        let plain = cards.records(false);
        assert_eq!(plain[0].back, "first");
        assert_eq!(plain[1].kind, "AnswerCard");
    }

    #[test]
    fn json_export() {
        let json = collection().to_json(true).expect("serializes");
        assert_snapshot!(json, @r##"
        [
          {
            "type": "QuestionCard",
            "front": "# One",
            "back": "**first**"
          },
          {
            "type": "AnswerCard",
            "front": "# Two",
            "back": "It is {2}."
          }
        ]
        "##);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut cards = collection();
        cards.shuffle();
        let mut ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
        assert!(cards.get(1).is_some());
    }
}
