//! Per-unit analysis: walk a unit, match calls against the rule table, and
//! classify the configured arguments.

use std::collections::HashMap;

use outguard_diagnostics::violation::{Location, Violation};
use outguard_ir::ast::{Expr, ExprKind, Pos, Unit};

use crate::addr::{is_addr, IdentPolicy};
use crate::resolve::resolve_callee;
use crate::rules::RuleTable;
use crate::walk::{walk_file, ExprVisitor};

/// Check one compilation unit against the rule table; returns the unit's
/// violations in traversal order (the reporter sorts globally).
pub fn check_unit(unit: &Unit, rules: &RuleTable, policy: IdentPolicy) -> Vec<Violation> {
    let mut checker = UnitChecker {
        unit,
        rules,
        policy,
        lines: HashMap::new(),
        violations: Vec::new(),
    };
    for file in &unit.files {
        walk_file(&mut checker, file);
    }
    checker.violations
}

/// Visitor over one unit's expressions. Owns its line cache and violation
/// list; shares nothing with other workers.
struct UnitChecker<'a> {
    unit: &'a Unit,
    rules: &'a RuleTable,
    policy: IdentPolicy,
    /// File path -> split source lines, read lazily on first violation.
    lines: HashMap<String, Vec<String>>,
    violations: Vec<Violation>,
}

impl ExprVisitor for UnitChecker<'_> {
    fn visit(&mut self, expr: &Expr) {
        let ExprKind::Call { callee, args } = &expr.kind else {
            return;
        };
        let Some(resolved) = resolve_callee(callee) else {
            return;
        };
        for (_, indices) in self.rules.matching(&resolved.identity) {
            for &index in indices {
                // Rules may be written for a different arity of a same-named
                // symbol; an out-of-range index skips that entry.
                let Some(arg) = args.get(index) else {
                    continue;
                };
                if !is_addr(self.unit, arg, self.policy) {
                    self.record(arg.pos.as_ref(), &resolved.method, index);
                }
            }
        }
    }
}

impl UnitChecker<'_> {
    fn record(&mut self, pos: Option<&Pos>, method: &str, argument: usize) {
        let location = match pos {
            Some(p) => Location {
                file: p.file.clone(),
                line: p.line,
                column: p.column,
            },
            None => Location::default(),
        };
        let line = self.source_line(&location.file, location.line);
        self.violations.push(Violation {
            location,
            line,
            method: method.to_string(),
            argument,
        });
    }

    /// The trimmed source line, from the per-file cache. An unreadable file
    /// caches as empty; the violation still reports with an empty excerpt.
    fn source_line(&mut self, file: &str, line: u32) -> String {
        let lines = self.lines.entry(file.to_string()).or_insert_with(|| {
            std::fs::read_to_string(file)
                .unwrap_or_default()
                .split('\n')
                .map(str::to_string)
                .collect()
        });
        let index = line.saturating_sub(1) as usize;
        lines
            .get(index)
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }
}
