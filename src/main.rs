use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use std::path::PathBuf;
use std::sync::Arc;

use janus::core::config::Config;
use janus::lenses::{name_persona, LensCatalog, LensNode};
use janus::orchestrator::{AnalysisMode, LensSelection, Orchestrator, RunRequest};
use janus::prompts::build_analysis_prompt;
use janus::providers::ServiceFactory;
use janus::work::{Modality, Work};

#[derive(Parser)]
#[clap(
    author,
    version,
    about = "Critical analysis of creative works through interpretive lenses"
)]
struct Cli {
    /// Path to config file
    #[clap(short, long, default_value = "janus.toml", global = true)]
    config: String,

    /// Debug mode
    #[clap(short, long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available lenses
    Lenses {
        /// Show categories, descriptions and sub-lenses
        #[clap(long)]
        tree: bool,
    },
    /// Show the debate persona of each lens key
    Persona {
        #[clap(required = true)]
        keys: Vec<String>,
    },
    /// Print the analysis prompt for a lens and a work without calling the service
    Prompt {
        #[clap(short, long)]
        lens: String,

        #[clap(flatten)]
        work: WorkArgs,
    },
    /// Analyze a work
    Analyze {
        #[clap(short, long, value_enum, default_value_t = AnalysisMode::Single)]
        mode: AnalysisMode,

        /// Lens key; repeat for dialectical and symposium modes
        #[clap(short, long = "lens", required = true)]
        lenses: Vec<String>,

        #[clap(flatten)]
        work: WorkArgs,

        /// Title of the second work (comparative mode)
        #[clap(long)]
        second_title: Option<String>,

        /// Text of the second work (comparative mode)
        #[clap(long, conflicts_with = "second_file")]
        second_text: Option<String>,

        /// File holding the second work (comparative mode)
        #[clap(long)]
        second_file: Option<PathBuf>,

        /// Append the source analyses beneath a synthesis
        #[clap(long)]
        sources: bool,

        /// Print the outcome as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(Args)]
struct WorkArgs {
    /// Title of the work
    #[clap(short, long)]
    title: Option<String>,

    /// The work itself, as text
    #[clap(long, conflicts_with = "file")]
    text: Option<String>,

    /// File holding the work (text, image or audio)
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Override the modality inferred from the file extension
    #[clap(long, value_enum)]
    modality: Option<Modality>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(log_level).init();

    let catalog = Arc::new(LensCatalog::builtin()?);

    match cli.command {
        Command::Lenses { tree } => {
            if tree {
                print_tree(&catalog);
            } else {
                for key in catalog.sorted_keys() {
                    println!("{}", key);
                }
            }
        }
        Command::Persona { keys } => {
            for key in keys {
                println!("{} -> {}", key, name_persona(&key));
            }
        }
        Command::Prompt { lens, work } => {
            check_lens_keys(&catalog, std::slice::from_ref(&lens))?;
            let work = load_work(work.title, work.text, work.file, work.modality)?;
            let lens = catalog.resolve(&lens)?;
            println!("{}", build_analysis_prompt(lens, &work));
            if let Some(media) = work.attachment() {
                eprintln!(
                    "[attachment: {}, {} bytes]",
                    media.mime_type,
                    media.data.len()
                );
            }
        }
        Command::Analyze {
            mode,
            lenses,
            work,
            second_title,
            second_text,
            second_file,
            sources,
            json,
        } => {
            check_lens_keys(&catalog, &lenses)?;

            let config = Config::from_file(&cli.config)?;
            let service = ServiceFactory::create(&config.generation, &config.transcript)?;

            let first = load_work(work.title, work.text, work.file, work.modality)?;
            let second_work = if second_text.is_some() || second_file.is_some() {
                Some(load_work(second_title, second_text, second_file, None)?)
            } else {
                None
            };

            print_banner();
            info!(
                "Running {} with {} service (model {})",
                mode,
                service.name(),
                config.generation.model
            );

            let mut orchestrator = Orchestrator::new(Arc::clone(&catalog), service)
                .with_parallel_analyses(config.analysis.parallel_analyses);
            let request = RunRequest {
                selection: LensSelection::new(mode, lenses),
                work: first,
                second_work,
                credential: config.generation.resolve_api_key(),
            };

            match orchestrator.run(request).await {
                Ok(outcome) if json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                Ok(outcome) => println!("{}", outcome.render_markdown(sources)),
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Reject lens keys the catalog does not know, listing the valid ones
fn check_lens_keys(catalog: &LensCatalog, keys: &[String]) -> Result<()> {
    let unknown: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| !key.trim().is_empty() && !catalog.contains(key.trim()))
        .collect();

    if !unknown.is_empty() {
        bail!(
            "Unknown lens key(s): {}\nValid keys:\n  {}",
            unknown.join(", "),
            catalog.sorted_keys().join("\n  ")
        );
    }
    Ok(())
}

fn load_work(
    title: Option<String>,
    text: Option<String>,
    file: Option<PathBuf>,
    modality: Option<Modality>,
) -> Result<Work> {
    match (text, file) {
        (Some(text), _) => {
            if let Some(modality) = modality.filter(|m| *m != Modality::Text) {
                bail!("--text provides a text work, not {}", modality);
            }
            Ok(Work::text(title, text))
        }
        (None, Some(path)) => Work::from_path(path, title, modality),
        (None, None) => bail!("Provide the work with --text or --file"),
    }
}

fn print_tree(catalog: &LensCatalog) {
    for node in catalog.categories() {
        println!("{}", node.name());
        println!("    {}", node.description());
        if let LensNode::Branch { .. } = node {
            for sub_lens in node.sub_lens_names() {
                println!("  - {}", sub_lens);
            }
        }
    }
}

fn print_banner() {
    eprintln!("\n====================================================");
    eprintln!("  JANUS - Critical Analysis Engine v0.1.0");
    eprintln!("====================================================\n");
}
