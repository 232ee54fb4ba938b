//! rolemine - mine roles from a user/permission pair file.
//!
//! Reads a UPA in one-to-one pair format (`<user> <permission>` per line),
//! runs FastMiner + basic RMP and prints the resulting PA / UA.

mod render;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use rolemine_core::dataset::generate::{generate_upa, GeneratorParams};
use rolemine_core::dataset::{load_one2one, to_one2one};
use rolemine_core::rmp::config::parse_miner_config;
use rolemine_core::{fast_miner_report, MinerConfig, RoleLabeler, RoleMiner, ScanMode};

#[derive(Parser)]
#[command(name = "rolemine")]
#[command(about = "Role mining over a user-permission assignment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine roles (PA) and user assignments (UA)
    Mine {
        /// Pair file, one `<user> <permission>` per line
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Uncovered cells tolerated at termination
        #[arg(long, short = 'd', env = "ROLEMINE_DELTA_FACTOR")]
        delta_factor: Option<usize>,

        /// Evaluate candidate areas in parallel
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// JSON miner config; flags override its fields
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Show FastMiner candidate roles with their counts
    Candidates {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Print a synthetic dataset in pair format
    Generate {
        #[arg(long)]
        roles: usize,

        #[arg(long)]
        users: usize,

        #[arg(long)]
        permissions: usize,

        #[arg(long)]
        max_roles_per_user: usize,

        #[arg(long)]
        max_permissions_per_role: usize,

        #[arg(long, default_value_t = 1)]
        min_permissions_per_role: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rolemine_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Mine {
            file,
            delta_factor,
            parallel,
            config,
            json,
        } => {
            let config = miner_config(config.as_deref(), delta_factor, parallel)?;
            info!(file = %file.display(), ?config, "mining");

            let upa = load_one2one(&file)?;
            let result = RoleMiner::new(config)
                .mine(&upa)
                .with_context(|| format!("mining {}", file.display()))?;

            if json {
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", render::mining_tables(&result))?;
            }
        }
        Commands::Candidates { file, json } => {
            let upa = load_one2one(&file)?;
            let mut labeler = RoleLabeler::new();
            let report = fast_miner_report(&upa, &mut labeler)
                .with_context(|| format!("generating candidates for {}", file.display()))?;

            if json {
                serde_json::to_writer_pretty(&mut stdout, &report.candidates)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", render::candidate_table(&report))?;
            }
        }
        Commands::Generate {
            roles,
            users,
            permissions,
            max_roles_per_user,
            max_permissions_per_role,
            min_permissions_per_role,
            seed,
        } => {
            let mut params = GeneratorParams::new(
                roles,
                users,
                permissions,
                max_roles_per_user,
                max_permissions_per_role,
            );
            params.min_permissions_per_role = min_permissions_per_role;

            let mut rng = match seed {
                Some(seed) => ChaCha20Rng::seed_from_u64(seed),
                None => ChaCha20Rng::from_os_rng(),
            };
            let upa = generate_upa(&params, &mut rng)?;
            write!(stdout, "{}", to_one2one(&upa))?;
        }
    }

    Ok(())
}

/// Config file first, then explicit flags on top.
fn miner_config(
    path: Option<&Path>,
    delta_factor: Option<usize>,
    parallel: bool,
) -> anyhow::Result<MinerConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_miner_config(&json)?
        }
        None => MinerConfig::default(),
    };
    if let Some(delta_factor) = delta_factor {
        config.delta_factor = delta_factor;
    }
    if parallel {
        config.scan = ScanMode::Parallel;
    }
    Ok(config)
}
