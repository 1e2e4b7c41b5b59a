//! # Learning Cards
//!
//! A card starts on a level-1 heading carrying a kind marker, e.g.
//! `# Capital of France? {ANSWER}`, and runs until an `{END}` line, the next
//! card, or the end of the document.
//!
//! ## Flow
//!
//! 1. [`CardRegistry::match_line`] recognises the first line.
//! 2. [`find_region`] delimits the card.
//! 3. The kind splits the region into front and back ([`CardKind::split`]).
//! 4. [`Card::parse`] renders both sides; the kind renders the back.
//!
//! An empty back, or a multiple choice card without choices, is a
//! [`CardSyntaxError`](crate::error::CardSyntaxError) and stops the conversion.

pub mod card;
pub mod collection;
pub mod kind;
pub mod kinds;
pub mod region;
pub mod registry;

pub use card::Card;
pub use collection::{CardCollection, CardRecord};
pub use kind::{BACK_MARKER, BackContent, CardInfo, CardKind, END_MARKER};
pub use kinds::{AnswerCard, MultipleChoiceCard, QuestionCard};
pub use region::{CardRegion, find_region};
pub use registry::CardRegistry;
