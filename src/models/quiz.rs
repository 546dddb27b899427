use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::question::{Question, NUM_OPTIONS};
use crate::error::QuizDefinitionError;

/// Static quiz definition. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub time_limit_seconds: u32,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Check the invariants a session relies on.
    pub fn validate(&self) -> Result<(), QuizDefinitionError> {
        if self.questions.is_empty() {
            return Err(QuizDefinitionError::NoQuestions {
                quiz_id: self.id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if question.correct_option_index >= NUM_OPTIONS {
                return Err(QuizDefinitionError::CorrectOptionOutOfRange {
                    quiz_id: self.id.clone(),
                    question_id: question.id,
                    index: question.correct_option_index,
                });
            }
            if !seen.insert(question.id) {
                return Err(QuizDefinitionError::DuplicateQuestionId {
                    quiz_id: self.id.clone(),
                    question_id: question.id,
                });
            }
        }

        Ok(())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Sum of base points, ignoring streak bonuses.
    pub fn base_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit_seconds > 0
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}
