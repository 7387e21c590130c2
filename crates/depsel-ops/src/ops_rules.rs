//! Operation: show the configured filter rules with their normalized
//! patterns.

use std::fmt::Write as _;
use std::path::Path;

use depsel_core::pattern::{is_degenerate, segment_count, PatternList};
use depsel_core::rule::FilterRule;
use depsel_util::progress::status_warn;

/// Print every `[[filter]]` rule from `Depsel.toml`.
pub fn rules(project_root: &Path) -> miette::Result<()> {
    let config = crate::load_project_config(project_root)?;
    if config.filters.is_empty() {
        println!("No filter rules configured.");
        return Ok(());
    }
    for (i, rule) in config.filters.iter().enumerate() {
        print!("{}", describe_rule(i + 1, rule));
        for token in degenerate_tokens(rule) {
            status_warn(
                "Warning",
                &format!(
                    "rule #{}: pattern '{token}' has {} segments",
                    i + 1,
                    segment_count(&token)
                ),
            );
        }
    }
    Ok(())
}

/// Multi-line description of one rule.
pub fn describe_rule(index: usize, rule: &FilterRule) -> String {
    let mut out = format!(
        "Rule #{index} ({})\n",
        if rule.transitive {
            "transitive"
        } else {
            "direct"
        }
    );
    describe_patterns(&mut out, "include", &rule.include_patterns());
    describe_patterns(&mut out, "exclude", &rule.exclude_patterns());
    out
}

fn describe_patterns(out: &mut String, label: &str, list: &PatternList) {
    if list.is_empty() {
        let _ = writeln!(out, "  {label}: (none)");
        return;
    }
    let _ = writeln!(out, "  {label}:");
    for (token, pattern) in list.iter() {
        let [g, a, t, c] = pattern.segments();
        let flag = if is_degenerate(token) { "  [degenerate]" } else { "" };
        let _ = writeln!(out, "    {token:<32} ({g}, {a}, {t}, {c}){flag}");
    }
}

/// Include and exclude tokens outside the one-to-four segment shapes.
pub fn degenerate_tokens(rule: &FilterRule) -> Vec<String> {
    rule.include_patterns()
        .tokens()
        .iter()
        .chain(rule.exclude_patterns().tokens())
        .filter(|t| is_degenerate(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_normalized_patterns() {
        let rule = FilterRule::new("com.foo, org.bar:baz:war", "", true);
        let text = describe_rule(2, &rule);
        assert!(text.starts_with("Rule #2 (transitive)\n"));
        assert!(text.contains("(com.foo, *, *, *)"));
        assert!(text.contains("(org.bar, baz, war, *)"));
        assert!(text.contains("exclude: (none)"));
        assert!(!text.contains("[degenerate]"));
    }

    #[test]
    fn flags_degenerate_tokens() {
        let rule = FilterRule::new("a:b:c:d:e", "x", false);
        let text = describe_rule(1, &rule);
        assert!(text.contains("(a, b, c, d)  [degenerate]"));
        assert_eq!(degenerate_tokens(&rule), ["a:b:c:d:e"]);
    }
}
