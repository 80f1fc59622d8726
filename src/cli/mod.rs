use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod auth;
pub mod create;
pub mod inspect;
pub mod preview;
pub mod serve;

use crate::calendar::locale::Language;
use crate::calendar::{CalendarInput, LayoutSelector, RawCalendarInput, Theme};
use crate::core::AppConfig;

/// Calendar contents shared by `create` and `preview`. Date lists are
/// comma separated `YYYY-MM-DD` values.
#[derive(Args, Debug, Clone)]
pub struct CalendarArgs {
    /// Semester: W (winter, Jan-Apr), S (spring, May-Aug) or F (fall, Sep-Dec)
    #[arg(long)]
    semester: String,
    #[arg(long)]
    year: String,
    #[arg(long)]
    classes: Option<String>,
    #[arg(long)]
    labs: Option<String>,
    #[arg(long)]
    exams: Option<String>,
    #[arg(long)]
    quizzes: Option<String>,
    #[arg(long)]
    holidays: Option<String>,
    /// Layout index in the last master or layout name (overrides SLIDECAL_LAYOUT)
    #[arg(long)]
    layout: Option<String>,
    /// Label language, fr or en (overrides SLIDECAL_LANGUAGE)
    #[arg(long)]
    language: Option<String>,
}

impl CalendarArgs {
    /// Validate the arguments against the configuration defaults.
    pub fn resolve(self, config: &AppConfig) -> Result<(CalendarInput, Theme, LayoutSelector)> {
        let layout = match self.layout {
            Some(layout) => layout.parse()?,
            None => config.layout.clone(),
        };
        let language: Language = match self.language {
            Some(language) => language.parse()?,
            None => config.language,
        };
        let input = CalendarInput::try_from(RawCalendarInput {
            semester: self.semester,
            year: self.year,
            classes: self.classes,
            labs: self.labs,
            exams: self.exams,
            quizzes: self.quizzes,
            holidays: self.holidays,
        })?;
        Ok((input, Theme::default().with_labels(language.labels()), layout))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Create one slide per month of a semester in the configured deck
    Create {
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Print the requests a calendar would send, without calling Google
    Preview {
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Print the element ids and positions of a slide
    Inspect {
        /// 0-based slide index
        #[arg(long)]
        slide: usize,
        #[arg(long, action, default_value = "false")]
        json: bool,
    },
    /// Perform OAuth authentication and print the refresh token
    Auth {},
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Log to stderr so command output on stdout stays machine readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Create { calendar }) => {
            init_tracing();
            create::run(calendar).await?;
        }
        Some(Command::Preview { calendar }) => {
            init_tracing();
            preview::run(calendar).await?;
        }
        Some(Command::Inspect { slide, json }) => {
            init_tracing();
            inspect::run(slide, json).await?;
        }
        Some(Command::Auth {}) => {
            auth::run().await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        None => {}
    }

    Ok(())
}
