use foundit_types::models::{OPTIONS_PER_QUESTION, Question};
use thiserror::Error;

pub const MIN_QUESTIONS: usize = 2;
pub const MAX_QUESTIONS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("Please add at least 2 questions.")]
    TooFew,
    #[error("An item can have at most 3 questions.")]
    TooMany,
    #[error("Question {0} is empty.")]
    EmptyQuestion(usize),
    #[error("Question {0} must have exactly 3 options.")]
    WrongOptionCount(usize),
    #[error("Option {option} in Question {question} is empty.")]
    EmptyOption { question: usize, option: char },
    #[error("Please select the correct option for Question {0}.")]
    BadCorrectIndex(usize),
    #[error("Expected {expected} answers, got {got}.")]
    AnswerCount { expected: usize, got: usize },
    #[error("Please answer all questions.")]
    Unanswered,
    #[error("Answer {0} is not one of the offered options.")]
    AnswerOutOfRange(usize),
}

/// Check a founder's question set. Messages use 1-based question numbers and
/// A/B/C option letters.
pub fn validate_questions(questions: &[Question]) -> Result<(), QuestionError> {
    if questions.len() < MIN_QUESTIONS {
        return Err(QuestionError::TooFew);
    }
    if questions.len() > MAX_QUESTIONS {
        return Err(QuestionError::TooMany);
    }

    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestion(n));
        }
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::WrongOptionCount(n));
        }
        if let Some(j) = q.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption {
                question: n,
                option: (b'A' + j as u8) as char,
            });
        }
        if usize::from(q.correct_index) >= OPTIONS_PER_QUESTION {
            return Err(QuestionError::BadCorrectIndex(n));
        }
    }

    Ok(())
}

/// Check a seeker's answer sheet against the number of questions it answers.
/// Every position must be filled with a valid option index.
pub fn validate_answers(question_count: usize, answers: &[Option<u8>]) -> Result<(), QuestionError> {
    if answers.len() != question_count {
        return Err(QuestionError::AnswerCount {
            expected: question_count,
            got: answers.len(),
        });
    }
    if question_count == 0 || answers.iter().any(Option::is_none) {
        return Err(QuestionError::Unanswered);
    }
    if let Some(i) = answers
        .iter()
        .position(|a| matches!(a, Some(idx) if usize::from(*idx) >= OPTIONS_PER_QUESTION))
    {
        return Err(QuestionError::AnswerOutOfRange(i + 1));
    }
    Ok(())
}
