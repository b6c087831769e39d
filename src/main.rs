//! rbac - inspect and evaluate tenant role permissions
//!
//! Reads role, user and tenant snapshots from JSON files and runs them through
//! the permission engine. Results are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tenant_rbac::core::models::{Tenant, User};
use tenant_rbac::utils::logging::init_logging;
use tenant_rbac::{AccessContext, Config, RbacError, RbacSystem, Result, Role, authorize, merge};

#[derive(Debug, Parser)]
#[command(name = "rbac", version, about = "Inspect and evaluate tenant role permissions")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "RBAC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the permission schema discovery document
    Schema,
    /// Print the effective permission set of a list of roles
    Effective {
        /// JSON array of roles
        #[arg(long)]
        roles: PathBuf,
        /// JSON user; limits the roles to those attached to the user
        #[arg(long)]
        user: Option<PathBuf>,
    },
    /// Evaluate one permission path
    Check {
        #[arg(long)]
        roles: PathBuf,
        /// Dotted permission path, e.g. crm.leads.edit
        #[arg(long)]
        path: String,
        #[arg(long)]
        user: Option<PathBuf>,
        /// Owner of the resource being accessed
        #[arg(long)]
        owner: Option<String>,
        /// Acting user ID (defaults to the user's ID)
        #[arg(long)]
        actor: Option<String>,
        /// Acting user's team ID
        #[arg(long)]
        team: Option<String>,
    },
    /// Print the claims bundle for a user
    Claims {
        #[arg(long)]
        user: PathBuf,
        #[arg(long)]
        roles: PathBuf,
        #[arg(long)]
        tenant: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `false` only for a denied `check`
async fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    }
    .with_env_overrides()?;
    config.validate()?;

    init_logging(config.logging())?;

    let rbac = RbacSystem::new(config.rbac()).await?;

    match cli.command {
        Command::Schema => {
            print_json(&rbac.schema().to_json()?)?;
        }
        Command::Effective { roles, user } => {
            let roles: Vec<Role> = read_json(&roles).await?;
            let permissions = match user {
                Some(path) => {
                    let user: User = read_json(&path).await?;
                    rbac.effective_permissions(&user, &rbac.roles_for_user(&user, &roles))
                }
                None => merge(&roles, rbac.schema()),
            };
            print_json(&permissions)?;
        }
        Command::Check {
            roles,
            path,
            user,
            owner,
            actor,
            team,
        } => {
            let roles: Vec<Role> = read_json(&roles).await?;
            let user: Option<User> = match user {
                Some(path) => Some(read_json(&path).await?),
                None => None,
            };

            let mut ctx = user.as_ref().map(AccessContext::for_user).unwrap_or_default();
            if let Some(owner) = owner {
                ctx = ctx.owned_by(owner);
            }
            if let Some(actor) = actor {
                ctx = ctx.actor(actor);
            }
            if let Some(team) = team {
                ctx = ctx.team(team);
            }

            let granted = match &user {
                Some(user) => {
                    let principal = rbac.principal(user, &rbac.roles_for_user(user, &roles));
                    rbac.authorize(&principal, &path, &ctx)
                }
                None => authorize(&merge(&roles, rbac.schema()), &path, &ctx),
            };

            println!("{}", if granted { "allow" } else { "deny" });
            return Ok(granted);
        }
        Command::Claims {
            user,
            roles,
            tenant,
        } => {
            let user: User = read_json(&user).await?;
            let roles: Vec<Role> = read_json(&roles).await?;
            let tenant: Option<Tenant> = match tenant {
                Some(path) => Some(read_json(&path).await?),
                None => None,
            };

            let claims = rbac.project_claims(
                &user,
                tenant.as_ref(),
                &rbac.roles_for_user(&user, &roles),
            );
            print_json(&claims)?;
        }
    }

    Ok(true)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RbacError::config(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
