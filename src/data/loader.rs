use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::LoadError;
use crate::models::Quiz;

/// Parse and validate a catalog from its JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<Quiz>, LoadError> {
    let quizzes: Vec<Quiz> = serde_json::from_str(json)?;
    validate_catalog(&quizzes)?;
    Ok(quizzes)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Quiz>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let quizzes = parse_catalog(&json_content)?;
    info!(path = %path.display(), quizzes = quizzes.len(), "Loaded quiz catalog");
    Ok(quizzes)
}

pub fn validate_catalog(quizzes: &[Quiz]) -> Result<(), LoadError> {
    if quizzes.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut ids = HashSet::with_capacity(quizzes.len());
    for quiz in quizzes {
        quiz.validate()?;
        if !ids.insert(quiz.id.as_str()) {
            return Err(LoadError::DuplicateQuizId(quiz.id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::QuizDefinitionError;

    const ONE_QUIZ: &str = r#"[{
        "id": "rust",
        "title": "Rust",
        "time_limit_seconds": 30,
        "questions": [{
            "id": 1,
            "text": "Which keyword makes a binding mutable?",
            "options": ["mut", "var", "let", "ref"],
            "correct_option_index": 0,
            "explanation": "Bindings are immutable unless declared with mut.",
            "difficulty": "easy",
            "points": 10
        }]
    }]"#;

    #[test]
    fn test_parse_catalog() {
        let quizzes = parse_catalog(ONE_QUIZ).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, "rust");
        assert_eq!(quizzes[0].description, "");
        assert_eq!(quizzes[0].questions[0].options[0], "mut");
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(parse_catalog("{"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_empty_catalog() {
        assert!(matches!(parse_catalog("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_parse_rejects_invalid_quiz() {
        let json = ONE_QUIZ.replace("\"correct_option_index\": 0", "\"correct_option_index\": 7");
        assert!(matches!(
            parse_catalog(&json),
            Err(LoadError::Invalid(
                QuizDefinitionError::CorrectOptionOutOfRange { index: 7, .. }
            ))
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_quiz_ids() {
        let mut quizzes = parse_catalog(ONE_QUIZ).unwrap();
        quizzes.push(quizzes[0].clone());
        assert!(matches!(
            validate_catalog(&quizzes),
            Err(LoadError::DuplicateQuizId(id)) if id == "rust"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONE_QUIZ.as_bytes()).unwrap();
        let quizzes = load_catalog_from_json(file.path()).unwrap();
        assert_eq!(quizzes[0].title, "Rust");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
