use foundit_types::models::{Question, Score};

/// Highest `min_correct` filter value a founder can pick.
pub const MAX_THRESHOLD: usize = 3;

/// Compare submitted answers against the question key.
///
/// Positions past the end of `answers`, or left empty, count as incorrect.
pub fn score(questions: Option<&[Question]>, answers: &[Option<u8>]) -> Score {
    let questions = questions.unwrap_or_default();

    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i).copied().flatten() == Some(q.correct_index))
        .count();

    Score {
        correct,
        total: questions.len(),
    }
}

/// Applicant filter: keep a claim when it has at least `min_correct` right.
pub fn meets_threshold(score: &Score, min_correct: usize) -> bool {
    score.correct >= min_correct
}
