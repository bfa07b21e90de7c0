use std::sync::Arc;

use clap::{Parser, Subcommand};
use school_quiz::api::HttpBackend;
use school_quiz::client::{self, Mode};
use school_quiz::models::{QuizKey, Viewer};
use school_quiz::{Config, Error, logging};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the school backend (overrides SCHOOL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take a timed quiz as the signed-in student
    Take {
        #[arg(long)]
        course: String,
        #[arg(long)]
        quiz: String,
    },
    /// Review a graded submission
    Review {
        #[arg(long)]
        course: String,
        #[arg(long)]
        quiz: String,
        /// Student whose submission to open (defaults to SCHOOL_STUDENT_ID)
        #[arg(long)]
        student: Option<String>,
        /// Who is viewing the submission
        #[arg(long = "as", value_enum, default_value_t = Viewer::Student)]
        viewer: Viewer,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let config = Config::from_env_with_api_url(args.api_url.as_deref())?;
    let _log_guard = logging::init(&config);

    let mode = match args.command {
        Command::Take { course, quiz } => Mode::Take(QuizKey::new(course, quiz)),
        Command::Review {
            course,
            quiz,
            student,
            viewer,
        } => {
            let student = student.or_else(|| config.student_id.clone()).ok_or_else(|| {
                Error::Config("--student is required (or set SCHOOL_STUDENT_ID)".to_string())
            })?;
            Mode::Review {
                viewer,
                key: QuizKey::new(course, quiz).for_student(student),
            }
        }
    };

    tracing::info!(?mode, "Starting school-quiz against {}", config.api_base_url);
    let backend = Arc::new(HttpBackend::new(&config)?);
    client::run(backend, mode).await
}
