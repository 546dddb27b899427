use clap::Parser;
use quiz_session::config::Args;
use quiz_session::{telemetry, QuizError, QuizRunner};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    telemetry::init(args.log_file.as_deref(), args.log_level.as_deref())?;

    let catalog = args.load_catalog()?;

    if args.list {
        for quiz in catalog.quizzes() {
            println!(
                "{:<12} {} ({} questions, {}s)",
                quiz.id,
                quiz.title,
                quiz.total_questions(),
                quiz.time_limit_seconds
            );
        }
        return Ok(());
    }

    let mut runner = QuizRunner::new(catalog);
    if let Some(id) = &args.quiz {
        runner = runner.with_quiz(id)?;
    }

    let summary = runner.run().await?;

    if args.summary {
        if let Some(summary) = summary {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| QuizError::Io(std::io::Error::other(e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}
