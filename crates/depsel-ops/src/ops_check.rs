//! Operation: explain how the configured rules treat one coordinate.

use std::path::Path;

use depsel_core::artifact::ArtifactCoordinate;
use depsel_core::matcher::{all_of, matches_any, ArtifactFilter};
use depsel_core::rule::FilterRule;
use depsel_util::errors::DepselError;
use depsel_util::progress::{status, status_warn};

/// How one rule treats the checked artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    /// 1-based rule position.
    pub index: usize,
    /// The artifact would be a seed for this rule.
    pub seed: bool,
    pub scope_ok: bool,
    pub included: bool,
    pub excluded: bool,
    /// Passes the scope, include and exclude filters together.
    pub selected: bool,
}

/// Evaluate `rule` against `artifact`.
pub fn evaluate(index: usize, rule: &FilterRule, artifact: &ArtifactCoordinate) -> RuleVerdict {
    let filters = rule.filters();
    let include = rule.include_patterns();
    let exclude = rule.exclude_patterns();
    RuleVerdict {
        index,
        seed: matches_any(artifact, &include),
        scope_ok: filters
            .iter()
            .filter(|f| matches!(f, ArtifactFilter::Scope(_)))
            .all(|f| f.include(artifact)),
        included: include.is_empty() || matches_any(artifact, &include),
        excluded: !exclude.is_empty() && matches_any(artifact, &exclude),
        selected: all_of(&filters, artifact),
    }
}

/// Check `coordinate` against every rule, or only rule `only` (1-based).
pub fn check(
    project_root: &Path,
    coordinate: &str,
    only: Option<usize>,
) -> miette::Result<Vec<RuleVerdict>> {
    let artifact = ArtifactCoordinate::parse(coordinate).ok_or_else(|| DepselError::Generic {
        message: format!(
            "Invalid coordinate '{coordinate}': expected group:artifact:version, \
             group:artifact:type:version or group:artifact:type:classifier:version"
        ),
    })?;
    let config = crate::load_project_config(project_root)?;

    let selected_rules: Vec<(usize, &FilterRule)> = match only {
        Some(n) => {
            let rule = n
                .checked_sub(1)
                .and_then(|i| config.filters.get(i))
                .ok_or_else(|| DepselError::Config {
                    message: format!(
                        "Rule #{n} does not exist ({} rules configured)",
                        config.filters.len()
                    ),
                })?;
            vec![(n, rule)]
        }
        None => config
            .filters
            .iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r))
            .collect(),
    };

    let verdicts: Vec<RuleVerdict> = selected_rules
        .into_iter()
        .map(|(index, rule)| evaluate(index, rule, &artifact))
        .collect();

    for v in &verdicts {
        let detail = format!(
            "rule #{}: seed={} scope={} include={} exclude={}",
            v.index,
            yes_no(v.seed),
            yes_no(v.scope_ok),
            yes_no(v.included),
            yes_no(v.excluded)
        );
        if v.selected {
            status("Selected", &detail);
        } else {
            status_warn("Rejected", &detail);
        }
    }
    Ok(verdicts)
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
