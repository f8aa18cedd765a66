//! One-line-per-violation reporting.
//!
//! The output format is consumed by CI diffs, so rendering is fully
//! deterministic: violations are sorted by location before printing and the
//! line format never varies.

use crate::violation::Violation;

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pos = self.location.to_string();
        // Positions under GOPATH-style roots render relative to /src/.
        let pos = match pos.find("/src/") {
            Some(i) => &pos[i + "/src/".len()..],
            None => pos.as_str(),
        };
        write!(
            f,
            "{}\t{}  // {} argument of '{}' requires '&'",
            pos,
            strip_comment(&self.line),
            ordinal(self.argument + 1),
            self.method,
        )
    }
}

/// Sort violations into report order and render them, one line each.
pub fn render(violations: &mut [Violation]) -> String {
    violations.sort();
    let mut out = String::new();
    for v in violations.iter() {
        out.push_str(&v.to_string());
        out.push('\n');
    }
    out
}

/// Terminal failure message stating the total count.
pub fn summary_message(count: usize) -> String {
    format!(
        "{}; the parameters listed above require the use of '&', for example f(&x) instead of f(x)",
        plural(count, "error", "errors"),
    )
}

/// "1 error" / "3 errors".
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Drop a trailing line comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

/// Humanized ordinal: 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st, ...
fn ordinal(n: usize) -> String {
    let suffix = if (11..=13).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}
