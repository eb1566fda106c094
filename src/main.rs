use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use taskgen::config::{self, Overrides};
use taskgen::tasks::render::{render_json, render_text};
use taskgen::tasks::{Category, Complexity, TaskGenerator};
use tracing_subscriber::EnvFilter;

/// Ask an LLM for five whimsical tasks.
#[derive(Parser)]
#[command(name = "taskgen", version)]
struct Args {
    /// Groq API key (defaults to GROQ_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Task category
    #[arg(long, default_value_t = Category::default())]
    category: Category,

    /// Task complexity
    #[arg(long, default_value_t = Complexity::default())]
    complexity: Complexity,

    /// Model identifier (defaults to GROQ_MODEL or llama-3.1-8b-instant)
    #[arg(long)]
    model: Option<String>,

    /// API base URL (defaults to GROQ_API_ENDPOINT or the Groq endpoint)
    #[arg(long)]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Environment file to load before reading GROQ_* variables
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Print tasks as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "taskgen=debug" } else { "taskgen=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    config::load_dotenv(args.env_file.as_deref())?;
    let groq = config::resolve(Overrides {
        api_key: args.api_key,
        base_url: args.base_url,
        model: args.model,
        timeout_secs: args.timeout,
    });

    let mut generator = TaskGenerator::new(groq);
    generator.set_category(args.category);
    generator.set_complexity(args.complexity);

    if !args.json {
        eprintln!("Generating…");
    }
    let outcome = generator.generate().await;

    if args.json && outcome.is_ok() {
        println!("{}", render_json(&generator.state().tasks)?);
    } else {
        print!("{}", render_text(generator.state()));
    }

    // The error was already rendered above.
    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
