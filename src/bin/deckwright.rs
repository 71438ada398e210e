//! Command-line front end for deckwright.
//!
//! # Usage
//!
//! Render a saved request:
//! ```sh
//! deckwright render request.json -o deck.pptx
//! ```
//!
//! Generate a deck from a document, with the model from a config file:
//! ```sh
//! deckwright --config deckwright.yaml generate notes.md --type board_update --max-slides 10
//! ```
//!
//! With `--llm-annotations` (or `llm.annotations: true`), placeholder chart
//! labels and difference-line positions are settled by the model first.
//!
//! Outline a deck from a topic, or list the color schemes:
//! ```sh
//! deckwright topic "Cloud Strategy" --slides 6
//! deckwright schemes
//! ```
//!
//! Logging follows `RUST_LOG`; `--verbose` raises the default to `debug`.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use deckwright::agent::{SlideDeckAgent, TopicOptions};
use deckwright::config::AppConfig;
use deckwright::generation::ContentGenerator;
use deckwright::model::{GenerationResult, PresentationRequest};
use deckwright::skills::{AnnotationPass, design_optimizer};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Generate consulting-style PowerPoint decks
#[derive(Parser, Debug)]
#[command(name = "deckwright", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output .pptx path, overriding the request or configuration
    #[arg(short, long, global = true, value_name = "OUTPUT")]
    output: Option<String>,

    /// Template name (`main`, `default` or a classic template)
    #[arg(long, global = true)]
    template: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settle chart annotations with the configured model before rendering
    #[arg(long, global = true)]
    llm_annotations: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a PresentationRequest saved as JSON
    Render {
        #[arg(value_name = "REQUEST")]
        request: PathBuf,
    },
    /// Generate slide content from a document or raw text, then render it
    Generate {
        /// Path to a .txt/.md file, or the text itself
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Presentation type (investor_pitch, board_update, ...)
        #[arg(long = "type")]
        presentation_type: Option<String>,

        #[arg(long)]
        max_slides: Option<usize>,

        /// Override the generated title
        #[arg(long)]
        title: Option<String>,

        /// Company shown on the title and closing slides
        #[arg(long)]
        company: Option<String>,

        /// Also save the generated request as JSON
        #[arg(long, value_name = "FILE")]
        save_request: Option<PathBuf>,
    },
    /// Render the outline deck for a topic
    Topic {
        topic: String,

        #[arg(long, default_value_t = 10)]
        slides: usize,

        /// Color scheme for classic templates
        #[arg(long)]
        scheme: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },
    /// List the color schemes
    Schemes,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn report(result: GenerationResult) -> Result<()> {
    if !result.success {
        bail!(
            "generation failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
    println!(
        "Wrote {} slides to {}",
        result.slide_count,
        result.output_path.unwrap_or_default()
    );
    for (key, value) in &result.metadata {
        debug!("{key}: {value}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    let template = cli.template.clone().unwrap_or_else(|| config.output.template.clone());
    let mut agent = SlideDeckAgent::new(&template);
    if cli.llm_annotations || config.llm.annotations {
        let provider = config.llm.build_provider().context("configuring the LLM provider")?;
        if provider.is_none() {
            info!("No LLM provider configured; annotations use the local rules");
        }
        agent = agent.with_annotation_pass(AnnotationPass::new(provider));
    }

    match cli.command {
        Command::Render { request } => {
            let mut request = PresentationRequest::load(&request)
                .with_context(|| format!("reading request {}", request.display()))?;
            if let Some(output) = cli.output {
                request.output_path = output;
            }
            let problems = agent.validate_presentation_request(&request);
            if !problems.is_empty() {
                bail!("invalid request: {}", problems.join("; "));
            }
            report(agent.create_settled_presentation(&request).await)
        },
        Command::Generate {
            source,
            presentation_type,
            max_slides,
            title,
            company,
            save_request,
        } => {
            let provider = config.llm.build_provider().context("configuring the LLM provider")?;
            let generator = ContentGenerator::new(provider);
            if generator.is_mock() {
                info!("No LLM provider configured; using offline content generation");
            }

            let mut options = config.generation.options();
            if let Some(presentation_type) = presentation_type {
                options.presentation_type = presentation_type;
            }
            if let Some(max_slides) = max_slides {
                options.max_slides = max_slides;
            }
            options.title = title;
            options.company = company;

            let mut request = generator
                .generate_from_document(&source, &options)
                .await
                .context("generating slide content")?;
            request.template = template;
            request.output_path = cli.output.unwrap_or(config.output.path);
            if let Some(path) = save_request {
                request
                    .save(&path)
                    .with_context(|| format!("saving request to {}", path.display()))?;
            }
            report(agent.create_settled_presentation(&request).await)
        },
        Command::Topic {
            topic,
            slides,
            scheme,
            author,
            company,
        } => {
            let options = TopicOptions {
                num_slides: slides,
                output_path: cli.output.unwrap_or(config.output.path),
                color_scheme: scheme,
                author,
                company,
                template: None,
            };
            report(agent.create_presentation_from_topic(&topic, &options))
        },
        Command::Schemes => {
            for name in design_optimizer::available_schemes() {
                let scheme = design_optimizer::scheme_colors(name);
                println!(
                    "{:<20} primary #{}  secondary #{}  accent #{}",
                    name,
                    scheme.primary.to_hex(),
                    scheme.secondary.to_hex(),
                    scheme.accent.to_hex()
                );
            }
            Ok(())
        },
    }
}
