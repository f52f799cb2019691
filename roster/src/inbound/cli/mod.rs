//! Terminal commands over the cached user collection.
//!
//! Parsing lives in [`Cli`]; [`run`] executes one command against a
//! [`Loader`] and writes the rendered view to any writer, so commands can be
//! exercised in tests without spawning a process. Mutating commands persist
//! through listeners registered on the [`UserList`], mirroring how any other
//! consumer would keep the cache slot current.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use crate::domain::{Error, Loader, NewUser, User, UserKey, UserKeyGenerator, UserList};

mod details_link;
mod render;

pub use details_link::{DetailsTargetError, resolve_details_target};
pub use render::{render_details, render_list, user_summary};

/// Command line for the `roster` binary.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Browse the cached user directory")]
pub struct Cli {
    /// Command to run; defaults to `list`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every user with their post count.
    List,
    /// Show one user and their posts.
    Details {
        /// User key or a `details.html?uid=<key>` link.
        target: String,
    },
    /// Add a user locally and persist the collection.
    Add {
        /// Display name.
        name: String,
        /// Account handle.
        #[arg(long)]
        username: Option<String>,
    },
    /// Delete every user with the given key and persist the collection.
    Delete {
        /// User key.
        uid: String,
    },
    /// Discard the cache and fetch the directory again.
    Reset,
}

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] Error),
    /// The details target could not be resolved.
    #[error(transparent)]
    Target(#[from] DetailsTargetError),
    /// Writing the view failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Execute `command`, writing its view to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when loading, persisting, target resolution, or
/// writing fails.
pub async fn run<W>(
    command: Command,
    loader: &Loader,
    keys: Box<dyn UserKeyGenerator>,
    out: &mut W,
) -> Result<(), CliError>
where
    W: Write,
{
    match command {
        Command::List => {
            let users = load_users(loader).await?;
            out.write_all(render_list(&users).as_bytes())?;
        }
        Command::Details { target } => {
            let key = resolve_details_target(&target)?;
            let list = UserList::new(load_users(loader).await?, keys);
            out.write_all(render_details(list.find(&key)).as_bytes())?;
        }
        Command::Add { name, username } => {
            let mut list = persisting_list(loader, keys).await?;
            list.add_user(NewUser {
                id: None,
                name: Some(name),
                username,
            })?;
            out.write_all(render_list(list.users()).as_bytes())?;
        }
        Command::Delete { uid } => {
            let mut list = persisting_list(loader, keys).await?;
            list.delete_user(&UserKey::parse(uid.trim()))?;
            out.write_all(render_list(list.users()).as_bytes())?;
        }
        Command::Reset => {
            let roster = loader.clear_cache_and_reload().await?;
            warn_if_degraded(roster.is_degraded());
            out.write_all(render_list(&roster.users).as_bytes())?;
        }
    }
    Ok(())
}

async fn load_users(loader: &Loader) -> Result<Vec<User>, Error> {
    let roster = loader.load().await?;
    warn_if_degraded(roster.is_degraded());
    Ok(roster.users)
}

async fn persisting_list(
    loader: &Loader,
    keys: Box<dyn UserKeyGenerator>,
) -> Result<UserList, Error> {
    let mut list = UserList::new(load_users(loader).await?, keys);
    let on_add = loader.clone();
    list.on_add_user(move |users, _added| on_add.persist(users));
    let on_delete = loader.clone();
    list.on_delete_user(move |users, _key| on_delete.persist(users));
    Ok(list)
}

fn warn_if_degraded(degraded: bool) {
    if degraded {
        warn!("posts were unavailable; post counts show zero until the next reset");
    }
}

#[cfg(test)]
mod tests {
    //! Command line parsing coverage.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["roster"], None)]
    #[case(&["roster", "list"], Some(Command::List))]
    #[case(&["roster", "details", "details.html?uid=1"], Some(Command::Details { target: "details.html?uid=1".to_owned() }))]
    #[case(&["roster", "add", "Ann", "--username", "ann"], Some(Command::Add { name: "Ann".to_owned(), username: Some("ann".to_owned()) }))]
    #[case(&["roster", "delete", "2"], Some(Command::Delete { uid: "2".to_owned() }))]
    #[case(&["roster", "reset"], Some(Command::Reset))]
    fn parses_commands(#[case] args: &[&str], #[case] expected: Option<Command>) {
        let cli = Cli::try_parse_from(args).expect("arguments parse");
        assert_eq!(cli.command, expected);
    }

    #[test]
    fn add_requires_a_name() {
        assert!(Cli::try_parse_from(["roster", "add"]).is_err());
    }
}
