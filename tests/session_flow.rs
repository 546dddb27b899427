use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use quiz_session::{
    Catalog, CompletionReason, Difficulty, GradeLetter, LiveSession, Question, Quiz, QuizSession,
    SessionError, SessionStatus,
};

fn question(id: u32, correct: usize, points: u32, difficulty: Difficulty) -> Question {
    Question {
        id,
        text: format!("Q{}", id),
        options: ["a".into(), "b".into(), "c".into(), "d".into()],
        correct_option_index: correct,
        explanation: String::new(),
        difficulty,
        points,
    }
}

fn three_question_quiz(time_limit_seconds: u32) -> Arc<Quiz> {
    Arc::new(Quiz {
        id: "scenario".into(),
        title: "Scenario".into(),
        description: String::new(),
        time_limit_seconds,
        questions: vec![
            question(1, 0, 10, Difficulty::Easy),
            question(2, 1, 20, Difficulty::Medium),
            question(3, 2, 30, Difficulty::Hard),
        ],
    })
}

#[test]
fn correct_correct_incorrect_scores_32_and_grades_c() {
    let mut session = QuizSession::start(three_question_quiz(0)).unwrap();

    session.select_answer(0).unwrap();
    session.submit_answer().unwrap();
    assert_eq!((session.score(), session.streak()), (10, 1));
    session.advance().unwrap();

    session.select_answer(1).unwrap();
    let outcome = session.submit_answer().unwrap();
    assert_eq!(outcome.earned_points, 22);
    assert_eq!((session.score(), session.streak()), (32, 2));
    session.advance().unwrap();

    session.select_answer(0).unwrap();
    session.submit_answer().unwrap();
    assert_eq!((session.score(), session.streak()), (32, 0));
    assert_eq!(session.advance().unwrap(), SessionStatus::Completed);

    let grade = session.grade().unwrap();
    assert_eq!(grade.letter, GradeLetter::C);
    assert_eq!(grade.message, "Pas mal ! Encore un peu d'effort !");

    let restarted = session.restart().unwrap();
    assert_eq!(restarted.score(), 0);
    assert_eq!(restarted.max_streak(), 0);
    assert!(restarted.answer_log().is_empty());
}

#[test]
fn malformed_quiz_is_rejected_before_session_exists() {
    let mut quiz = (*three_question_quiz(0)).clone();
    quiz.questions.clear();
    assert!(matches!(
        QuizSession::start(Arc::new(quiz)),
        Err(SessionError::InvalidQuizDefinition(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn one_second_quiz_expires_untouched() {
    let live = LiveSession::start(three_question_quiz(1)).unwrap();
    tokio::time::sleep(Duration::from_millis(1050)).await;

    let session = live.snapshot().await;
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.completion(), Some(CompletionReason::TimeExpired));
    assert_eq!(session.score(), 0);
    assert_eq!(session.correct_count(), 0);
    assert!(session.answer_log().is_empty());
    assert_eq!(session.grade().unwrap().letter, GradeLetter::F);
}

#[test]
fn catalog_file_round_trip_into_session() {
    let quiz = (*three_question_quiz(90)).clone();
    let json = serde_json::to_string(&vec![quiz]).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalog = Catalog::from_path(file.path()).unwrap();
    let session = QuizSession::start(catalog.get("scenario").unwrap()).unwrap();
    assert_eq!(session.time_remaining_seconds(), 90);
    assert_eq!(session.quiz().questions[2].difficulty, Difficulty::Hard);
}
