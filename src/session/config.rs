use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::CaptureConstraints;
use crate::questions::{default_question_set, Question};

/// Configuration for one screening session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Identifier of the test being taken, supplied by the listing
    /// collaborator
    pub test_id: String,

    /// Ordered question list; empty means the built-in default set
    pub questions: Vec<Question>,

    /// Fixed capture constraints for every recording cycle
    pub constraints: CaptureConstraints,

    /// Where the collaborator is sent back to after SubmitTest
    pub listing_route: String,
}

impl SessionConfig {
    pub fn new(test_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            ..Self::default()
        }
    }

    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            test_id: format!("test-{}", Uuid::new_v4()),
            questions: default_question_set(),
            constraints: CaptureConstraints::default(),
            listing_route: "/tests".to_string(),
        }
    }
}
