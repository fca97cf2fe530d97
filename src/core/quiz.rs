//! Flavor-matching quiz - three questions, three flavor profiles, one cake.
//!
//! Answers tally flavor profiles; the strictly greatest tally wins and ties
//! break toward the first-declared profile (chocolate, fruit, cream), so the
//! outcome is deterministic for any answer sequence. The winner maps to a
//! catalog product through the explicit recommendation table in the content
//! configuration - never by name guessing - with the first catalog product as
//! the last resort.

use crate::core::catalog::{Catalog, CatalogItem};
use serde::Deserialize;
use std::collections::HashMap;

/// The three flavor profiles quiz options are tagged with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorProfile {
    /// Rich chocolate desserts
    Chocolate,
    /// Fresh fruity desserts
    Fruit,
    /// Light creamy desserts
    Cream,
}

impl FlavorProfile {
    /// All profiles in declaration order; this order is the tie-break.
    pub const ALL: [Self; 3] = [Self::Chocolate, Self::Fruit, Self::Cream];

    /// Turkish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chocolate => "Çikolata",
            Self::Fruit => "Meyve",
            Self::Cream => "Krema",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Chocolate => 0,
            Self::Fruit => 1,
            Self::Cream => 2,
        }
    }
}

/// One selectable answer.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizOption {
    /// Answer text shown to the shopper
    pub text: String,
    /// The profile this answer counts toward
    pub profile: FlavorProfile,
}

/// One quiz question with its options.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub text: String,
    /// Selectable answers
    pub options: Vec<QuizOption>,
}

/// Quiz content from configuration: the questions and the explicit
/// winner-profile to product-name mapping.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizContent {
    /// The questions, asked in order
    pub questions: Vec<QuizQuestion>,
    /// Winner profile mapped to an exact catalog product name
    pub recommendations: HashMap<FlavorProfile, String>,
}

/// Where the quiz currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStage {
    /// Not started yet
    Intro,
    /// Asking question `n` (0-based)
    Question(usize),
    /// Finished; the winning profile is decided
    Result(FlavorProfile),
}

/// One shopper's quiz session.
pub struct FlavorQuiz {
    content: QuizContent,
    tallies: [u32; 3],
    stage: QuizStage,
}

impl FlavorQuiz {
    /// Creates a quiz at the intro stage.
    #[must_use]
    pub const fn new(content: QuizContent) -> Self {
        Self {
            content,
            tallies: [0; 3],
            stage: QuizStage::Intro,
        }
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> QuizStage {
        self.stage
    }

    /// Moves from the intro to the first question. No-op elsewhere.
    pub fn start(&mut self) -> bool {
        if self.stage == QuizStage::Intro && !self.content.questions.is_empty() {
            self.stage = QuizStage::Question(0);
            return true;
        }
        false
    }

    /// The question currently being asked, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.stage {
            QuizStage::Question(index) => self.content.questions.get(index),
            _ => None,
        }
    }

    /// Answers the current question with the option at `option_index`
    /// (0-based), tallying its profile and advancing - to the next question,
    /// or to the result after the last one. Returns whether the answer was
    /// accepted.
    pub fn answer(&mut self, option_index: usize) -> bool {
        let QuizStage::Question(question_index) = self.stage else {
            return false;
        };
        let Some(question) = self.content.questions.get(question_index) else {
            return false;
        };
        let Some(option) = question.options.get(option_index) else {
            return false;
        };

        self.tallies[option.profile.index()] += 1;

        self.stage = if question_index + 1 < self.content.questions.len() {
            QuizStage::Question(question_index + 1)
        } else {
            QuizStage::Result(self.winning_profile())
        };
        true
    }

    /// The decided profile, once the quiz has finished.
    #[must_use]
    pub const fn result(&self) -> Option<FlavorProfile> {
        match self.stage {
            QuizStage::Result(profile) => Some(profile),
            _ => None,
        }
    }

    /// Resolves the finished quiz to a catalog product via the recommendation
    /// table, falling back to the first catalog product when the configured
    /// name is missing from the catalog. `None` before the result stage.
    #[must_use]
    pub fn matched_item<'a>(&self, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        let profile = self.result()?;
        self.content
            .recommendations
            .get(&profile)
            .and_then(|name| catalog.by_name(name))
            .or_else(|| catalog.first())
    }

    /// Clears the tallies and returns to the intro.
    pub fn restart(&mut self) {
        self.tallies = [0; 3];
        self.stage = QuizStage::Intro;
    }

    /// Strictly greatest tally wins; ties go to the first-declared profile.
    fn winning_profile(&self) -> FlavorProfile {
        let mut winner = FlavorProfile::ALL[0];
        for profile in FlavorProfile::ALL {
            if self.tallies[profile.index()] > self.tallies[winner.index()] {
                winner = profile;
            }
        }
        winner
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{test_catalog, test_quiz_content};

    /// Answer every question with the option tagged with `profile`.
    fn answer_all_with(quiz: &mut FlavorQuiz, profile: FlavorProfile) {
        quiz.start();
        while let Some(question) = quiz.current_question() {
            let index = question
                .options
                .iter()
                .position(|o| o.profile == profile)
                .unwrap();
            assert!(quiz.answer(index));
        }
    }

    #[test]
    fn test_consistent_answers_pick_that_profile() {
        for profile in FlavorProfile::ALL {
            let mut quiz = FlavorQuiz::new(test_quiz_content());
            answer_all_with(&mut quiz, profile);
            assert_eq!(quiz.result(), Some(profile));
        }
    }

    #[test]
    fn test_result_maps_through_recommendation_table() {
        let catalog = test_catalog();
        let mut quiz = FlavorQuiz::new(test_quiz_content());
        answer_all_with(&mut quiz, FlavorProfile::Chocolate);

        let item = quiz.matched_item(&catalog).unwrap();
        assert_eq!(item.name, "Çikolatalı Cupcake Seti");
    }

    #[test]
    fn test_unknown_recommendation_falls_back_to_first_item() {
        let catalog = test_catalog();
        let mut content = test_quiz_content();
        content
            .recommendations
            .insert(FlavorProfile::Fruit, "Menüden Kalkan Pasta".to_string());

        let mut quiz = FlavorQuiz::new(content);
        answer_all_with(&mut quiz, FlavorProfile::Fruit);

        let item = quiz.matched_item(&catalog).unwrap();
        assert_eq!(item.id, catalog.first().unwrap().id);
    }

    #[test]
    fn test_tie_breaks_toward_first_declared_profile() {
        // One answer per profile: a three-way tie.
        let mut quiz = FlavorQuiz::new(test_quiz_content());
        quiz.start();
        for profile in [FlavorProfile::Cream, FlavorProfile::Fruit, FlavorProfile::Chocolate] {
            let index = quiz
                .current_question()
                .unwrap()
                .options
                .iter()
                .position(|o| o.profile == profile)
                .unwrap();
            quiz.answer(index);
        }

        assert_eq!(quiz.result(), Some(FlavorProfile::Chocolate));
    }

    #[test]
    fn test_answer_outside_question_stage_is_rejected() {
        let mut quiz = FlavorQuiz::new(test_quiz_content());
        assert!(!quiz.answer(0), "intro stage takes no answers");

        answer_all_with(&mut quiz, FlavorProfile::Cream);
        assert!(!quiz.answer(0), "result stage takes no answers");
    }

    #[test]
    fn test_bad_option_index_is_rejected_in_place() {
        let mut quiz = FlavorQuiz::new(test_quiz_content());
        quiz.start();
        assert!(!quiz.answer(99));
        assert_eq!(quiz.stage(), QuizStage::Question(0));
    }

    #[test]
    fn test_restart_resets_tallies_and_stage() {
        let mut quiz = FlavorQuiz::new(test_quiz_content());
        answer_all_with(&mut quiz, FlavorProfile::Fruit);
        assert!(quiz.result().is_some());

        quiz.restart();
        assert_eq!(quiz.stage(), QuizStage::Intro);

        // A fresh run is unaffected by the previous tallies.
        answer_all_with(&mut quiz, FlavorProfile::Cream);
        assert_eq!(quiz.result(), Some(FlavorProfile::Cream));
    }
}
