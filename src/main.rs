use anyhow::{Context, Result};
use arxiv_to_prompt::arxiv_to_prompt;
use arxiv_to_prompt::config::Config;
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Extract and expand LaTeX source from arXiv papers
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// arXiv URL, ID, or PDF link (e.g., 2402.02392)
    identifier: String,
    /// Clean LaTeX output (remove comments and extra blank lines)
    #[arg(long)]
    clean: bool,
    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Seconds latexpand may run before it is killed
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

fn run(args: &Args) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(secs) = args.timeout {
        config.latexpand_timeout = Duration::from_secs(secs);
    }

    let content = arxiv_to_prompt(&args.identifier, args.clean, &config)?;

    // Write output to file or stdout
    if let Some(output_file) = &args.output {
        fs::write(output_file, &content)
            .with_context(|| format!("Failed to write output to {:?}", output_file))?;
        info!("Output written to {:?}", output_file);
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Configure logging
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
