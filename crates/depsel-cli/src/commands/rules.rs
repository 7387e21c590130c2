use miette::Result;

use depsel_ops::ops_rules;

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;
    ops_rules::rules(&project_root)
}
