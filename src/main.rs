use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use targetscope::commands::{self, GraphOptions, QueryOptions, TargetsOptions};
use targetscope::export::{ExportFormat, ListStyle};
use targetscope::filter::NameFilter;
use targetscope::logging;
use targetscope::project::Workspace;

const DEFAULT_MANIFEST: &str = "targetscope.json";

#[derive(Parser)]
#[command(name = "targetscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Build-target dependency queries and dependency graph export", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the project description comes from.
#[derive(Args)]
struct ManifestArgs {
    /// Project manifest; repeat to combine several projects
    #[arg(
        short,
        long = "manifest",
        env = "TARGETSCOPE_MANIFEST",
        value_delimiter = ','
    )]
    manifests: Vec<PathBuf>,
}

impl ManifestArgs {
    fn load(&self) -> Result<Workspace> {
        let paths = if self.manifests.is_empty() {
            vec![PathBuf::from(DEFAULT_MANIFEST)]
        } else {
            self.manifests.clone()
        };

        Workspace::load(&paths).with_context(|| {
            let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            format!("Could not load project manifest(s): {}", shown.join(", "))
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List all targets of the project
    Targets {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Only list targets whose name matches this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Print a comma-separated list instead of one name per line
        #[arg(long)]
        comma_separated: bool,
    },
    /// Show the transitive dependencies of a target
    Query {
        /// Target to resolve
        target: String,

        #[command(flatten)]
        manifest: ManifestArgs,

        /// Show the targets that depend on TARGET instead
        #[arg(long)]
        reverse: bool,

        /// Also follow frameworks and libraries named in linker flags
        #[arg(long)]
        implicit_dependencies: bool,

        /// Only report names matching this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Print a comma-separated list instead of one name per line
        #[arg(long, conflicts_with = "format")]
        comma_separated: bool,

        /// Output style: lines, comma or json
        #[arg(long)]
        format: Option<ListStyle>,
    },
    /// Export the whole dependency graph
    Graph {
        #[command(flatten)]
        manifest: ManifestArgs,

        /// Only keep targets (and edges between them) matching this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Output format: dot or json
        #[arg(long, default_value = "dot")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn list_style(comma_separated: bool) -> ListStyle {
    if comma_separated {
        ListStyle::CommaSeparated
    } else {
        ListStyle::Lines
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();

    match cli.command {
        Commands::Targets {
            manifest,
            filter,
            comma_separated,
        } => {
            let options = TargetsOptions {
                filter: NameFilter::from_option(filter.as_deref())?,
                style: list_style(comma_separated),
            };
            let workspace = manifest.load()?;
            commands::list_targets(&workspace, &options, &mut stdout.lock())?;
        }
        Commands::Query {
            target,
            manifest,
            reverse,
            implicit_dependencies,
            filter,
            comma_separated,
            format,
        } => {
            let options = QueryOptions {
                target,
                reverse,
                implicit_dependencies,
                filter: NameFilter::from_option(filter.as_deref())?,
                style: format.unwrap_or_else(|| list_style(comma_separated)),
            };
            let workspace = manifest.load()?;
            commands::query(&workspace, &options, &mut stdout.lock())?;
        }
        Commands::Graph {
            manifest,
            filter,
            format,
            output,
        } => {
            let options = GraphOptions {
                filter: NameFilter::from_option(filter.as_deref())?,
                format,
            };
            let workspace = manifest.load()?;

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    commands::dependency_graph(&workspace, &options, &mut writer)?;
                    writer
                        .flush()
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Wrote dependency graph");
                }
                None => commands::dependency_graph(&workspace, &options, &mut stdout.lock())?,
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    run(cli)
}
