//! Command dispatch and handler modules.

mod check;
mod rules;
mod select;

use std::path::PathBuf;

use miette::Result;

use depsel_maven::project::PROJECT_POM_FILE;
use depsel_util::errors::DepselError;
use depsel_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Select {
            offline,
            update_snapshots,
            local_repository,
            settings,
            output,
            format,
        } => select::exec(
            offline,
            update_snapshots,
            local_repository,
            settings,
            output,
            &format,
        ),
        Command::Rules => rules::exec(),
        Command::Check { coordinate, rule } => check::exec(&coordinate, rule),
    }
}

/// The nearest directory at or above the working directory with a `pom.xml`.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(DepselError::Io)?;
    find_ancestor_with(&cwd, PROJECT_POM_FILE).ok_or_else(|| {
        DepselError::Config {
            message: format!(
                "Could not find {PROJECT_POM_FILE} in this directory or any parent"
            ),
        }
        .into()
    })
}
