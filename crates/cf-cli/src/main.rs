//! Cosmetic Filter CLI
//!
//! CLI tool for compiling cosmetic filter lists into a userscript.

mod fetch;
mod logging;
mod pipeline;

use std::fs;
use std::path::Path;

use clap::{Args, Parser, Subcommand};

use cf_compiler::{render, RenderOptions, DEFAULT_TEMPLATE};

use crate::pipeline::PipelineOptions;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "Cosmetic filter list compiler")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// File listing filter list URLs or paths, one per line
    #[arg(short, long)]
    input: Option<String>,

    /// Local filter list files
    #[arg(short, long)]
    local: Vec<String>,

    /// Ranked top domains CSV (`rank,domain`); enables the lite build
    #[arg(long)]
    top: Option<String>,

    /// Keep filters for domains ranked up to this bound, only used with --top
    #[arg(long, default_value_t = 1_000_000)]
    top_count: usize,

    /// Maximum concurrent downloads
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile filter lists into a userscript
    Compile {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output script file
        #[arg(short, long, default_value = "cosmetic.user.js")]
        output: String,

        /// Script template overriding the built-in one
        #[arg(long)]
        template: Option<String>,

        /// Version stamp (defaults to today's date)
        #[arg(long)]
        version_stamp: Option<String>,
    },

    /// Run the pipeline and print statistics without writing a script
    Stats {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

impl InputArgs {
    fn into_options(self) -> PipelineOptions {
        PipelineOptions {
            list_file: self.input,
            local: self.local,
            top_domains: self.top,
            top_count: self.top_count,
            concurrency: self.concurrency,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            inputs,
            output,
            template,
            version_stamp,
        } => cmd_compile(inputs.into_options(), &output, template.as_deref(), version_stamp).await,
        Commands::Stats { inputs } => cmd_stats(inputs.into_options()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn cmd_compile(
    opts: PipelineOptions,
    output: &str,
    template_path: Option<&str>,
    version_stamp: Option<String>,
) -> Result<(), String> {
    let template = match template_path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read template '{}': {}", path, e))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let (compiled, stats) = pipeline::run(&opts).await?;

    let render_options = RenderOptions {
        version: version_stamp
            .unwrap_or_else(|| chrono::Local::now().format("%Y.%m.%d").to_string()),
        top_domain_count: opts.top_domains.as_ref().map(|_| opts.top_count),
    };
    let script = render(&template, &compiled, &render_options)
        .map_err(|e| format!("Failed to render script: {}", e))?;

    pipeline::write_output(Path::new(output), &script)?;

    println!(
        "Compiled {} filter lists to '{}' ({})",
        stats.lists,
        output,
        if render_options.is_lite() { "lite" } else { "full" }
    );
    pipeline::print_stats(&stats);
    println!("  Size:     {} bytes ({:.1} KB)", script.len(), script.len() as f64 / 1024.0);

    Ok(())
}

async fn cmd_stats(opts: PipelineOptions) -> Result<(), String> {
    let (_, stats) = pipeline::run(&opts).await?;
    println!("Statistics");
    pipeline::print_stats(&stats);
    Ok(())
}
