use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use hotel_graph::{save, DirectorySource, LoaderConfig, ValidationPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "hotel-graph",
    version,
    about = "Load, check and export hotel room/reservation/person documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the documents and print a summary
    Check(SourceArgs),

    /// Load the documents and write them back out to another directory
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory to write roomsData.json, personData.json and reservationData.json into
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON config file (data_dir, prefix, validation)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory of the data sets (overrides config and HOTEL_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Data set name, 3-10 lowercase letters (overrides config and HOTEL_DATA_PREFIX)
    #[arg(long)]
    prefix: Option<String>,

    /// Enforce every validation rule instead of the configured modes
    #[arg(long)]
    strict: bool,
}

impl SourceArgs {
    fn resolve(&self) -> Result<LoaderConfig> {
        let mut config = LoaderConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if self.strict {
            config.validation = ValidationPolicy::strict();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hotel_graph=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Export { source, out } => run_export(&source, out),
    }
}

fn run_check(args: &SourceArgs) -> Result<()> {
    let config = args.resolve()?;
    let source = config.source()?;

    println!("🏨 Loading hotel data from {}", source.dir().display());

    let mut loader = config.loader();
    loader.load_from(&source)?;
    let report = loader.report();
    if report.is_clean() {
        println!("✓ {}", report.summary());
    } else {
        println!("⚠️  {}", report.summary());
        for issue in &report.issues {
            println!("   - {}", issue);
        }
    }

    let graph = loader.into_graph()?;
    println!("✓ Loaded {}", graph.summary());

    for room in graph.rooms() {
        println!(
            "   Room {:>4}  {:<16} {:>5}  {} reservations, {} nights  [{}]",
            room.number(),
            room.room_type().description(),
            room.price(),
            room.reservation_count(),
            room.nights_booked(),
            room.amenity_descriptions()
        );
    }

    Ok(())
}

fn run_export(args: &SourceArgs, out: PathBuf) -> Result<()> {
    let config = args.resolve()?;
    let graph = config.load_graph()?;

    let target = DirectorySource::new(out);
    target.write(&save(&graph))?;

    println!("✓ Exported {} to {}", graph.summary(), target.dir().display());
    Ok(())
}
