use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studio_migrate::commands::configure::ConfigureArgs;
use studio_migrate::output::Format;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "studio-migrate",
    version,
    about = "Migrate and configure game project data"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring the project's data up to date
    Migrate {
        /// Version to migrate from (defaults to the project's studioVersion)
        #[arg(long)]
        from: Option<String>,
    },
    /// List the steps a version would run
    Steps {
        /// Recorded project version
        version: String,
    },
    /// Run one migration step by id
    RunStep {
        /// Step id (see `steps`)
        id: String,
    },
    /// Configure a freshly extracted project template
    Configure {
        /// JSON file with the project descriptor to install
        #[arg(long)]
        project_data: PathBuf,
        /// JSON file written as the language config
        #[arg(long)]
        language_config: PathBuf,
        /// Game title
        #[arg(long)]
        title: String,
        /// Icon to install (defaults to the template's game icon)
        #[arg(long)]
        icon: Option<PathBuf>,
        /// Enable language selection in game
        #[arg(long)]
        multi_language: bool,
    },
}

fn run(cli: Cli, format: Format) -> studio_migrate::error::Result<()> {
    let root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Migrate { from } => studio_migrate::commands::migrate::run(&root, from, format),
        Commands::Steps { version } => studio_migrate::commands::steps::run(&version, format),
        Commands::RunStep { id } => studio_migrate::commands::run_step::run(&root, &id, format),
        Commands::Configure {
            project_data,
            language_config,
            title,
            icon,
            multi_language,
        } => studio_migrate::commands::configure::run(
            &root,
            ConfigureArgs {
                project_data,
                language_config,
                title,
                icon,
                multi_language,
            },
            format,
        ),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_migrate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
