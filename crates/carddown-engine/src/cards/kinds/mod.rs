pub mod answer;
pub mod multi;
pub mod question;

pub use answer::AnswerCard;
pub use multi::MultipleChoiceCard;
pub use question::QuestionCard;
