use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nusantara_common::{logger, AppConfig};
use nusantara_llm::build_client;
use nusantara_pdf::{render_analysis_pdf, render_narrative_pdf};
use nusantara_story::{AnalysisRecord, ObjectDescription, StoryGenerator, StyleTag};
use serde::Serialize;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "nusantara")]
#[command(about = "Nusantara Story AI - narratives and promotional analysis for cultural and tourism objects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (default: SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default: SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate a narrative and its analysis once, then exit
    Generate {
        /// Object name, e.g. "Kopi Gayo"
        #[arg(long)]
        title: String,

        /// Where the object is
        #[arg(long)]
        location: String,

        /// Key facts, history, notable details
        #[arg(long)]
        facts: String,

        /// Intended readers
        #[arg(long)]
        audience: Option<String>,

        /// Narrative style (e.g. educational, poetic, "Cerita Rakyat")
        #[arg(long)]
        style: Option<String>,

        /// Write narrative.pdf and analysis.pdf into OUTPUT_DIR
        #[arg(long)]
        pdf: bool,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// `generate --json` output
#[derive(Serialize)]
struct GenerateOutput<'a> {
    narrative: &'a str,
    analysis: Option<&'a AnalysisRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis_error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(host, port).await,
        Some(Commands::Generate {
            title,
            location,
            facts,
            audience,
            style,
            pdf,
            json,
        }) => {
            let style = match style {
                Some(style) => style.parse::<StyleTag>()?,
                None => StyleTag::Unspecified,
            };
            let mut description = ObjectDescription::new(title, location, facts).with_style(style);
            if let Some(audience) = audience {
                description = description.with_audience(audience);
            }
            generate(description, pdf, json).await
        }
        None => serve(None, None).await,
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;
    config.ensure_directories()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Nusantara Story starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Address: {}", config.server_bind_address());
    tracing::info!("  Provider: {:?}", config.llm_provider);
    tracing::info!("  Locale: {}", config.locale);
    tracing::info!("  Output: {}", config.output_dir.display());

    println!("Server listening on http://{}", config.server_bind_address());

    nusantara_server::start_server(config).await?;
    Ok(())
}

async fn generate(description: ObjectDescription, pdf: bool, json: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;

    let client = build_client(&config)?;
    let generator = StoryGenerator::from_config(client, &config);

    let outcome = generator.generate_story(&description).await?;
    let narrative = outcome.narrative.text();

    if json {
        let output = GenerateOutput {
            narrative,
            analysis: outcome.analysis.as_ref().ok(),
            analysis_error: outcome.analysis.as_ref().err().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}\n", narrative);
        match &outcome.analysis {
            Ok(record) => print_analysis(record),
            Err(e) => {
                eprintln!("Analysis unavailable: {}", e);
                if let Some(raw) = e.raw_response() {
                    eprintln!("Last raw response:\n{}", raw);
                }
            }
        }
    }

    if pdf {
        config.ensure_directories()?;

        let narrative_path = config.get_output_path("narrative.pdf");
        let bytes = render_narrative_pdf(description.title.trim(), narrative)?;
        std::fs::write(&narrative_path, bytes)
            .with_context(|| format!("Failed to write {}", narrative_path.display()))?;
        eprintln!("Narrative PDF saved to {}", narrative_path.display());

        if let Ok(record) = &outcome.analysis {
            let analysis_path = config.get_output_path("analysis.pdf");
            let bytes = render_analysis_pdf(record)?;
            std::fs::write(&analysis_path, bytes)
                .with_context(|| format!("Failed to write {}", analysis_path.display()))?;
            eprintln!("Analysis PDF saved to {}", analysis_path.display());
        }
    }

    Ok(())
}

fn print_analysis(record: &AnalysisRecord) {
    let locale = record.locale();
    for (category, items) in record.sections() {
        println!("## {}", category.key(locale));
        for item in items {
            println!("- {}", item.point);
            println!("  {}", item.description);
        }
        println!();
    }
}
