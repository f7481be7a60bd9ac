use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use mailtopic::config::Config;
use mailtopic::features::FeatureGeneratorRegistry;
use mailtopic::output::terminal;
use mailtopic::pipeline::{catalog, classify, ClassificationMode};
use mailtopic::scoring::TopicScorer;
use mailtopic::store::models::{Email, StoredEmail};
use mailtopic::store::{JsonStore, TopicStore};

/// mailtopic: classify emails into topics with simple text heuristics.
///
/// Topics and labeled example emails live as JSON files in the data
/// directory (MAILTOPIC_DATA_DIR, default ./data).
#[derive(Parser)]
#[command(name = "mailtopic", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and empty topic/email files
    Init,

    /// Run the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: MAILTOPIC_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: MAILTOPIC_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Classify a single email
    Classify {
        subject: String,
        body: String,

        /// Which classifier to use
        #[arg(long, value_enum, default_value = "topic")]
        mode: ClassificationMode,

        /// Comma-separated feature generators to run (topic mode only)
        #[arg(long, value_delimiter = ',')]
        generators: Option<Vec<String>>,
    },

    /// List feature generators and the features they produce
    Features,

    /// List topics with their descriptions
    Topics,

    /// Add a new topic
    AddTopic { name: String, description: String },

    /// Store an email, optionally labeled with a topic
    StoreEmail {
        subject: String,
        body: String,

        /// Topic label; must name an existing topic
        #[arg(long)]
        ground_truth: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mailtopic=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = JsonStore::new(&config.data_dir);

    match cli.command {
        Commands::Init => {
            info!(data_dir = %config.data_dir.display(), "Initializing data directory");
            let created = store.initialize().await?;
            println!("Data directory: {}", store.data_dir().display());
            println!("Files created: {created}");
            println!("\nNext: add topics with `mailtopic add-topic <name> <description>`");
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            use std::sync::Arc;

            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let store = Arc::new(store);
            let state = mailtopic::web::AppState::new(config, store.clone(), store);
            mailtopic::web::run_server(state, port, &bind).await?;
        }

        Commands::Classify {
            subject,
            body,
            mode,
            generators,
        } => {
            let email = Email::new(subject, body);
            match mode {
                ClassificationMode::Topic => {
                    let registry = FeatureGeneratorRegistry::builtin();
                    let scorer = TopicScorer::new(config.decay_scale);
                    let names: Option<Vec<&str>> = generators
                        .as_ref()
                        .map(|names| names.iter().map(String::as_str).collect());

                    let result = classify::classify_by_topic(
                        &registry,
                        &scorer,
                        &store,
                        &email,
                        names.as_deref(),
                    )
                    .await?;
                    terminal::display_topic_classification(&result);
                }
                ClassificationMode::NearestEmail => {
                    let result = classify::classify_by_nearest(&store, &email).await?;
                    terminal::display_nearest_match(&result);
                }
            }
        }

        Commands::Features => {
            let registry = FeatureGeneratorRegistry::builtin();
            terminal::display_generators(&registry.list_generators());
        }

        Commands::Topics => {
            let topics = store.load().await?;
            terminal::display_topics(&topics);
        }

        Commands::AddTopic { name, description } => {
            let topics = catalog::add_topic(&store, &name, &description).await?;
            println!(
                "{} Topic '{}' added ({} total).",
                "OK".green().bold(),
                name,
                topics.len()
            );
        }

        Commands::StoreEmail {
            subject,
            body,
            ground_truth,
        } => {
            let email = StoredEmail::new(Email::new(subject, body), ground_truth);
            let email_id = catalog::store_email(&store, &store, email).await?;
            println!("{} Email stored (id {email_id}).", "OK".green().bold());
        }
    }

    Ok(())
}
