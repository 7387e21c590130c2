//! Handler for `depsel select`.

use std::path::PathBuf;

use miette::Result;

use depsel_ops::ops_select::{self, OutputFormat, SelectOptions};
use depsel_util::errors::DepselError;

pub fn exec(
    offline: bool,
    update_snapshots: bool,
    local_repository: Option<PathBuf>,
    settings: Option<PathBuf>,
    output: Option<PathBuf>,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format).ok_or_else(|| DepselError::Generic {
        message: format!("Unknown output format '{format}' (expected text or json)"),
    })?;
    let project_root = super::project_root()?;

    let opts = SelectOptions {
        offline,
        update_snapshots,
        local_repository,
        settings,
        output,
        format,
    };
    ops_select::select(&project_root, &opts)?;
    Ok(())
}
