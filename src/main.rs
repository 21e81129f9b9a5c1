use anyhow::Context;
use billscope::prelude::*;
use billscope::publish;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Keyword-driven policy analysis of children's online safety legislation
#[derive(Parser, Debug)]
#[command(name = "billscope")]
#[command(about = "Score bills, tag policy provisions and compare jurisdictions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a state legislation export
    Analyze {
        /// State bills (CSV with State, Name, Description, Themes, Status columns)
        input: PathBuf,

        /// Federal bills to compare enactment counts against
        #[arg(long)]
        federal: Option<PathBuf>,

        /// Input format (default: guessed from the file extension)
        #[arg(long, value_parser = ["csv", "jsonl"])]
        format: Option<String>,

        /// Write the full JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write per-bill outcomes as JSON lines here
        #[arg(long)]
        bills: Option<PathBuf>,

        /// Minimum relevance score
        #[arg(long, default_value_t = 3)]
        threshold: u32,

        /// Consensus tiering: three-tier or four-tier
        #[arg(long, default_value = "three-tier", value_parser = ["three-tier", "four-tier"])]
        scheme: String,

        /// YAML file overriding the built-in keyword taxonomy
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Number of parallel classification workers
        #[arg(long, env = "BILLSCOPE_JOBS", default_value_t = 1)]
        jobs: usize,

        /// Status substring that marks a bill as passed
        #[arg(long, default_value = "passed")]
        passed_marker: String,
    },

    /// Print the provision taxonomy and its keywords
    Taxonomy {
        /// YAML file overriding the built-in keyword taxonomy
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  analyze   Analyze a state legislation export");
    println!("  taxonomy  Print the provision taxonomy and its keywords");
}

fn input_format(path: &std::path::Path, format: Option<&str>) -> anyhow::Result<InputFormat> {
    match format {
        Some(f) => Ok(f.parse()?),
        None => Ok(InputFormat::from_path(path)),
    }
}

async fn run_analyze_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Analyze {
        input,
        federal,
        format,
        output,
        bills,
        threshold,
        scheme,
        taxonomy,
        jobs,
        passed_marker,
    } = cmd
    else {
        unreachable!()
    };

    let mut builder = ConfigBuilder::new()
        .relevance_threshold(threshold)
        .consensus_scheme_str(&scheme)?
        .passed_marker(passed_marker)
        .jobs(jobs);
    if let Some(path) = taxonomy {
        builder = builder.taxonomy_path(path);
    }
    let config = builder.build()?;

    let processor = Arc::new(AnalysisProcessor::from_config(config)?);

    let loaded = load_bills(&input, input_format(&input, format.as_deref())?)
        .with_context(|| format!("Failed to load bills: {}", input.display()))?;

    let mut analysis = if processor.config().jobs > 1 {
        Arc::clone(&processor).run_parallel(loaded).await?
    } else {
        processor.run(loaded)
    };

    if let Some(path) = federal {
        let federal_bills = load_bills(&path, input_format(&path, format.as_deref())?)
            .with_context(|| format!("Failed to load federal bills: {}", path.display()))?;
        analysis.federal = Some(processor.federal_comparison(&analysis, &federal_bills.records));
    }

    if let Some(path) = output {
        publish::write_report(&path, &analysis)?;
        tracing::info!(path = %path.display(), "wrote report");
    }
    if let Some(path) = bills {
        publish::write_bills(&path, &analysis.bills)?;
        tracing::info!(path = %path.display(), "wrote bill outcomes");
    }

    print!("{}", publish::render_summary(&analysis));
    Ok(())
}

fn run_taxonomy_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Taxonomy { taxonomy } = cmd else {
        unreachable!()
    };

    let taxonomy = match taxonomy {
        Some(path) => Taxonomy::load(&path)
            .with_context(|| format!("Failed to load taxonomy: {}", path.display()))?,
        None => Taxonomy::default(),
    };

    for (provision, keywords) in taxonomy.provisions() {
        println!("{} ({})", provision.key(), provision.label());
        println!("  {}", keywords.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Analyze { .. }) => run_analyze_command(cmd).await,
        Some(cmd @ Command::Taxonomy { .. }) => run_taxonomy_command(cmd),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
