mod compare;
mod config_cmd;
mod leaderboard;
mod movement;
mod rank;
mod shots;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, OutputFormat};

pub use compare::CompareCommand;
pub use leaderboard::LeaderboardCommand;
pub use movement::MovementCommand;
pub use rank::RankCommand;
pub use shots::ShotsCommand;

#[derive(Parser)]
#[command(name = "tt-coach")]
#[command(about = "Rank progression and training video analysis for table-tennis clubs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TT_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show rank and progress for an Elo rating and XP total
    Rank(RankCommand),

    /// Group a roster of players by rank
    Leaderboard(LeaderboardCommand),

    /// Analyse movement quality of a repetitive stroke drill
    Movement(MovementCommand),

    /// Detect and classify strokes in a recording
    Shots(ShotsCommand),

    /// Compare the pose in one frame against a reference frame
    Compare(CompareCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings shared by every analysis command
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();
        let json = self.json;

        match self.command {
            Commands::Rank(cmd) => cmd.execute(&Context::load(config_path, json)?),
            Commands::Leaderboard(cmd) => cmd.execute(&Context::load(config_path, json)?),
            Commands::Movement(cmd) => cmd.execute(&Context::load(config_path, json)?),
            Commands::Shots(cmd) => cmd.execute(&Context::load(config_path, json)?),
            Commands::Compare(cmd) => cmd.execute(&Context::load(config_path, json)?),
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path),
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

impl Context {
    fn load(config_path: Option<&Path>, json: bool) -> Result<Self> {
        let config = Config::load(config_path)?;
        if !config.output.color {
            colored::control::set_override(false);
        }

        Ok(Self {
            json: json || config.output.format == OutputFormat::Json,
            config,
        })
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
