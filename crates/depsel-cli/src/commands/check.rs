//! Handler for `depsel check`.

use miette::Result;

use depsel_ops::ops_check;

pub fn exec(coordinate: &str, rule: Option<usize>) -> Result<()> {
    let project_root = super::project_root()?;
    let verdicts = ops_check::check(&project_root, coordinate, rule)?;
    let selected = verdicts.iter().filter(|v| v.selected).count();
    println!(
        "{coordinate}: selected by {selected} of {} rules",
        verdicts.len()
    );
    Ok(())
}
