//! Command line front end for survey-builder.
//!
//! Commands that talk to the API read their settings from the environment
//! (or a `.env` file):
//! - SURVEY_API_URL
//! - SURVEY_API_TOKEN (optional)
//! - SURVEY_API_TIMEOUT_SECS (optional)
//! - SURVEY_API_PAGE_SIZE (optional)

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use survey_builder::{PageSource, Survey, SurveyId, SurveyStore, metric_cards};
use survey_builder_client::{ApiClient, ClientConfig, ClientError, LoadOutcome, PageLoader};
use survey_builder_report::{ReportOptions, render_report, report_to_text, responses_to_csv};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Build surveys and read their results")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print a sample survey as the JSON the API accepts
    Sample {
        #[arg(value_enum, default_value_t = SampleName::CustomerFeedback)]
        name: SampleName,
    },
    /// Create a sample survey on the server
    Push {
        #[arg(value_enum)]
        name: SampleName,
    },
    /// List the surveys on the server
    List,
    /// List the question types the server offers
    Types,
    /// Show the dashboard numbers
    Dashboard,
    /// Print a paginated analytics report for a survey
    Report {
        survey: u64,
        #[arg(long, default_value_t = 80)]
        width: usize,
        #[arg(long, default_value_t = 50)]
        lines_per_page: usize,
        /// Use the built-in sample data instead of the API
        #[arg(long)]
        offline: bool,
    },
    /// Export a survey's responses as CSV
    Export {
        survey: u64,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Use the built-in sample data instead of the API
        #[arg(long)]
        offline: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SampleName {
    CustomerFeedback,
    EventRegistration,
}

impl SampleName {
    fn build(self) -> anyhow::Result<Survey> {
        let survey = match self {
            Self::CustomerFeedback => example_surveys::customer_feedback()?,
            Self::EventRegistration => example_surveys::event_registration()?,
        };
        Ok(survey)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!("running {:?}", args.command);

    match args.command {
        Command::Sample { name } => {
            let record = name.build()?.to_record()?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Push { name } => {
            let survey = name.build()?;
            let created = client()?.create_survey(&survey).await?;
            match created.id {
                Some(id) => println!("Created survey {id}: {}", created.title),
                None => bail!("server did not assign an id to {:?}", created.title),
            }
        }
        Command::List => {
            for survey in client()?.list_surveys().await? {
                let status = if survey.is_active { "active" } else { "closed" };
                println!(
                    "{:>5}  {:<40} {:>6} responses  {status}",
                    survey.id, survey.title, survey.response_count
                );
            }
        }
        Command::Types => {
            for question_type in client()?.question_types().await? {
                println!("{:>3}  {}", question_type.id, question_type.name);
            }
        }
        Command::Dashboard => {
            let stats = client()?.dashboard_stats().await?;
            for card in metric_cards(&stats) {
                println!("{:<18} {}", card.label, card.value);
            }
        }
        Command::Report {
            survey,
            width,
            lines_per_page,
            offline,
        } => {
            let options = ReportOptions::new()
                .with_width(width)
                .with_lines_per_page(lines_per_page);
            let (title, analytics) = if offline {
                let sample = example_surveys::customer_feedback()?;
                let analytics = example_surveys::customer_feedback_analytics(&sample);
                (sample.title, analytics)
            } else {
                let client = client()?;
                let id = SurveyId::new(survey);
                let loaded = client
                    .load_survey(id)
                    .await?
                    .with_context(|| format!("survey {id} not found"))?;
                let analytics = load_all(&client.analytics_loader(id)).await?;
                (loaded.title, analytics)
            };
            println!("{}", report_to_text(&render_report(&title, &analytics, &options)));
        }
        Command::Export {
            survey,
            out,
            offline,
        } => {
            let (loaded, responses) = if offline {
                let sample = example_surveys::customer_feedback()?;
                let responses = example_surveys::customer_feedback_responses(&sample);
                (sample, responses)
            } else {
                let client = client()?;
                let id = SurveyId::new(survey);
                let loaded = client
                    .load_survey(id)
                    .await?
                    .with_context(|| format!("survey {id} not found"))?;
                let responses = load_all(&client.responses_loader(id)).await?;
                (loaded, responses)
            };
            let csv = responses_to_csv(loaded.questions(), &responses)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    log::info!("wrote {} responses to {}", responses.len(), path.display());
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

fn client() -> anyhow::Result<ApiClient> {
    let config = ClientConfig::from_env().context("could not load API configuration")?;
    Ok(ApiClient::new(&config)?)
}

/// Page through a listing until it is exhausted. Ctrl-C cancels the loader.
async fn load_all<S, T>(loader: &PageLoader<S, T>) -> anyhow::Result<Vec<T>>
where
    S: PageSource<T, Error = ClientError>,
{
    let token = loader.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    loop {
        match loader.load_more().await? {
            LoadOutcome::Loaded(count) => log::debug!("loaded {count} items"),
            LoadOutcome::Exhausted => return Ok(loader.take_items()),
            LoadOutcome::Busy => tokio::task::yield_now().await,
            LoadOutcome::Cancelled => bail!("interrupted"),
        }
    }
}
