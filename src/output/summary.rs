use std::fmt::Write;

use crate::launch::Launch;

use super::styling::{bright, bright_green, bright_red, cyan, dim};

/// Prints a human-readable summary of a resolved launch to stderr.
///
/// stdout is reserved for the machine-readable launch handed to the step
/// executor.
pub fn print_summary(launch: &Launch) {
    eprintln!("{}", render_summary(launch));
}

/// Prints a failed resolution with its full cause chain to stderr.
pub fn print_failure(err: &anyhow::Error) {
    eprintln!("{}", render_failure(err));
}

fn add_field(output: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(output, "  {} {}", dim(format!("{label:<10}")), cyan(value));
}

fn render_summary(launch: &Launch) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "{} {}",
        bright_green("✓"),
        bright(format!("Build {} resolved", launch.build_id)).underlined()
    );
    add_field(&mut output, "host", &launch.scm.host);
    add_field(&mut output, "org", &launch.scm.org);
    add_field(&mut output, "repo", &launch.scm.repo);
    add_field(&mut output, "branch", &launch.scm.branch);
    add_field(&mut output, "checkout", launch.scm.checkout_url());
    add_field(&mut output, "workspace", &launch.workspace);

    output
}

fn render_failure(err: &anyhow::Error) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{} {}", bright_red("✗"), bright_red(err));
    for cause in err.chain().skip(1) {
        let _ = writeln!(output, "  {} {}", dim("caused by:"), cause);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scm::ScmLocation;
    use console::strip_ansi_codes;

    #[test]
    fn test_render_summary_lists_location_and_workspace() {
        let launch = Launch {
            build_id: "1234".to_string(),
            workspace: "/opt/screwdriver/workspace/src/screwdriver-cd/launcher.git".to_string(),
            scm: ScmLocation::parse("git@github.com:screwdriver-cd/launcher.git#master").unwrap(),
        };

        let rendered = render_summary(&launch);
        let plain = strip_ansi_codes(&rendered);

        assert!(plain.contains("Build 1234 resolved"));
        assert!(plain.contains("git@github.com"));
        assert!(plain.contains("master"));
        assert!(plain.contains("/opt/screwdriver/workspace/src/screwdriver-cd/launcher.git"));
    }

    #[test]
    fn test_render_failure_includes_causes() {
        let err = anyhow::anyhow!("testing error returns").context("fetching build ID \"42\"");

        let rendered = render_failure(&err);
        let plain = strip_ansi_codes(&rendered);

        assert!(plain.contains("fetching build ID \"42\""));
        assert!(plain.contains("caused by: testing error returns"));
    }
}
