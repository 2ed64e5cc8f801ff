use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Select;
use dotenvy::dotenv;
use kiwitrain::{Dashboard, TrainingSnapshot};
use kiwitrain_auth::{Session, effective_permissions, has_permission_str};
use kiwitrain_cli::report::{render_dashboard, render_permissions};
use kiwitrain_cli::seeder::{self, HierarchyPerDepartment, SeedConfig};
use kiwitrain_config::{ReportConfig, SnapshotConfig};
use kiwitrain_core::PermissionKey;
use kiwitrain_models::UserId;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(name = "kiwitrain-cli")]
#[command(about = "KiwiTrain CLI - Training progress reports and permission checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard as seen by one user
    Report {
        /// Snapshot file (defaults to KIWITRAIN_SNAPSHOT_PATH)
        #[arg(short = 's', long)]
        snapshot: Option<PathBuf>,

        /// Id of the viewing user (prompted for if not provided)
        #[arg(short = 'u', long)]
        user: Option<String>,

        /// Leaderboard rows per department, 0 for all (defaults to KIWITRAIN_LEADERBOARD_LIMIT)
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Check whether a user holds a permission
    Check {
        /// Snapshot file (defaults to KIWITRAIN_SNAPSHOT_PATH)
        #[arg(short = 's', long)]
        snapshot: Option<PathBuf>,

        /// Id of the user to check
        #[arg(short = 'u', long)]
        user: String,

        /// Permission key; lists every permission when omitted
        #[arg(short = 'p', long)]
        permission: Option<String>,
    },
    /// Generate a fake training snapshot
    Seed {
        /// Where to write the snapshot (defaults to KIWITRAIN_SNAPSHOT_PATH)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Number of departments
        #[arg(short = 'd', long, default_value = "3")]
        departments: usize,

        /// Number of phases per department
        #[arg(long, default_value = "3")]
        phases: usize,

        /// Number of modules per phase
        #[arg(long, default_value = "4")]
        modules: usize,

        /// Number of modules per department outside every phase
        #[arg(long, default_value = "1")]
        unassigned: usize,

        /// Number of tasks per module
        #[arg(long, default_value = "5")]
        tasks: usize,

        /// Number of users per department (the first is the team leader)
        #[arg(long, default_value = "8")]
        users: usize,

        /// Chance that a task is completed, between 0 and 1
        #[arg(long, default_value = "0.6")]
        completion: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    kiwitrain_observability::init_basic_console_logging();

    let cli = Cli::parse();
    let snapshot_config = SnapshotConfig::from_env();

    match cli.command {
        Commands::Report {
            snapshot,
            user,
            limit,
            format,
        } => {
            let path = snapshot.unwrap_or(snapshot_config.path);
            let report_config = ReportConfig::from_env().with_leaderboard_limit(limit);
            handle_report(path, user, report_config, format).await
        }
        Commands::Check {
            snapshot,
            user,
            permission,
        } => {
            let path = snapshot.unwrap_or(snapshot_config.path);
            handle_check(path, user, permission).await
        }
        Commands::Seed {
            output,
            departments,
            phases,
            modules,
            unassigned,
            tasks,
            users,
            completion,
        } => {
            let config = SeedConfig::new(departments)
                .with_hierarchy(HierarchyPerDepartment {
                    phases,
                    modules_per_phase: modules,
                    unassigned_modules: unassigned,
                    tasks_per_module: tasks,
                })
                .with_users(users)
                .with_completion_ratio(completion);
            let path = output.unwrap_or(snapshot_config.path);
            seeder::seed_snapshot(&config, &path)
                .await
                .with_context(|| format!("Error seeding snapshot at {}", path.display()))?;
            Ok(())
        }
    }
}

async fn load_snapshot(path: &Path) -> Result<TrainingSnapshot> {
    TrainingSnapshot::load(path)
        .await
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))
}

/// Session for `user_id`; unknown ids are treated as signed out.
fn session_for(snapshot: &TrainingSnapshot, user_id: &str) -> Session {
    match snapshot.find_user(&UserId::from(user_id)) {
        Some(user) => Session::for_user(user.clone()),
        None => {
            warn!(user_id, "User not found in snapshot, continuing signed out");
            Session::anonymous()
        }
    }
}

fn prompt_for_user(snapshot: &TrainingSnapshot) -> Result<String> {
    if snapshot.users.is_empty() {
        bail!("Snapshot has no users; pass --user to choose one");
    }

    let labels: Vec<String> = snapshot
        .users
        .iter()
        .map(|user| {
            let role = user.role.map(|r| r.as_str()).unwrap_or("unknown");
            format!("{} ({}, {})", user.name, role, user.id)
        })
        .collect();

    let selected = Select::new()
        .with_prompt("View dashboard as")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read user selection")?;

    Ok(snapshot.users[selected].id.to_string())
}

async fn handle_report(
    path: PathBuf,
    user: Option<String>,
    config: ReportConfig,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = load_snapshot(&path).await?;
    let user_id = match user {
        Some(user_id) => user_id,
        None => prompt_for_user(&snapshot)?,
    };

    let session = session_for(&snapshot, &user_id);
    let mut dashboard = Dashboard::compose(&session, &snapshot);
    dashboard.truncate_leaderboards(config.leaderboard_limit);

    match format {
        OutputFormat::Text => print!("{}", render_dashboard(&dashboard)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&dashboard).context("Failed to encode dashboard")?
        ),
    }
    Ok(())
}

async fn handle_check(path: PathBuf, user: String, permission: Option<String>) -> Result<()> {
    let snapshot = load_snapshot(&path).await?;
    let session = session_for(&snapshot, &user);

    match permission {
        Some(key) => {
            if PermissionKey::parse(&key).is_none() {
                warn!(permission = %key, "Unknown permission key");
            }
            let granted = has_permission_str(session.user(), &key);
            println!("{}: {}", key, if granted { "granted" } else { "denied" });
        }
        None => {
            println!("Permissions for {}:", user);
            print!("{}", render_permissions(&effective_permissions(session.user())));
        }
    }
    Ok(())
}
