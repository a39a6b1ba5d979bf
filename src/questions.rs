use serde::{Deserialize, Serialize};

/// A single interview question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier within the test
    pub id: u32,
    /// Prompt shown to the candidate
    pub text: String,
}

/// Built-in question set used when the collaborator does not supply one
pub fn default_question_set() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            text: "Explain the concept of closures in JavaScript.".to_string(),
        },
        Question {
            id: 2,
            text: "Describe the virtual DOM in React.".to_string(),
        },
        Question {
            id: 3,
            text: "What are React hooks and why are they useful?".to_string(),
        },
    ]
}

/// Outcome of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Index changed
    Moved,
    /// Already at the first question, nothing changed
    AtStart,
    /// Already at the last question, nothing changed
    AtEnd,
}

/// Ordered, immutable question list with a clamped cursor
///
/// Pure index arithmetic; no wraparound. The session controller is
/// responsible for rejecting navigation while a recording is active.
#[derive(Debug, Clone)]
pub struct QuestionNavigator {
    questions: Vec<Question>,
    index: usize,
}

impl QuestionNavigator {
    /// Create a navigator over a non-empty question list.
    ///
    /// An empty list falls back to the built-in default set so a session
    /// always has at least one question to present.
    pub fn new(questions: Vec<Question>) -> Self {
        let questions = if questions.is_empty() {
            default_question_set()
        } else {
            questions
        };

        Self {
            questions,
            index: 0,
        }
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    /// Advance to the next question; clamped at the last index.
    pub fn next(&mut self) -> Step {
        if self.is_last() {
            Step::AtEnd
        } else {
            self.index += 1;
            Step::Moved
        }
    }

    /// Go back to the previous question; clamped at index 0.
    pub fn previous(&mut self) -> Step {
        if self.is_first() {
            Step::AtStart
        } else {
            self.index -= 1;
            Step::Moved
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_questions() -> Vec<Question> {
        (1..=3)
            .map(|id| Question {
                id,
                text: format!("question {}", id),
            })
            .collect()
    }

    #[test]
    fn starts_at_first_question() {
        let nav = QuestionNavigator::new(three_questions());
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current().id, 1);
        assert!(nav.is_first());
        assert!(!nav.is_last());
    }

    #[test]
    fn next_advances_until_clamped() {
        let mut nav = QuestionNavigator::new(three_questions());
        assert_eq!(nav.next(), Step::Moved);
        assert_eq!(nav.next(), Step::Moved);
        assert!(nav.is_last());

        // Clamped: no wraparound, no mutation
        assert_eq!(nav.next(), Step::AtEnd);
        assert_eq!(nav.index(), 2);
        assert_eq!(nav.current().id, 3);
    }

    #[test]
    fn previous_at_start_is_a_no_op() {
        let mut nav = QuestionNavigator::new(three_questions());
        assert_eq!(nav.previous(), Step::AtStart);
        assert_eq!(nav.index(), 0);

        nav.next();
        assert_eq!(nav.previous(), Step::Moved);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn empty_list_falls_back_to_default_set() {
        let nav = QuestionNavigator::new(Vec::new());
        assert_eq!(nav.len(), 3);
        assert_eq!(nav.current().id, 1);
    }
}
