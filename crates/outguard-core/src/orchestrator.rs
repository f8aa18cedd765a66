//! Analysis orchestrator — parallel per-unit execution and deterministic
//! post-processing.

use outguard_check::addr::IdentPolicy;
use outguard_check::analysis::check_unit;
use outguard_check::rules::RuleTable;
use outguard_diagnostics::violation::Violation;
use outguard_ir::ast::Unit;
use rayon::prelude::*;

/// Pseudo-modules the front-end may hand over that are not real units.
const PSEUDO_MODULES: &[&str] = &["unsafe"];

/// Complete output from an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Sorted into report order: file, line, column, source text.
    pub violations: Vec<Violation>,
    pub summary: AnalysisSummary,
}

/// Summary statistics for the run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub units_analyzed: usize,
    pub units_skipped: usize,
}

/// Run the pass over every unit in parallel. One worker per unit, each with
/// its own line cache and local violation list; the join point concatenates
/// the local lists, so no output is produced before every worker finished.
pub fn analyze_units(units: &[Unit], rules: &RuleTable, policy: IdentPolicy) -> AnalysisOutput {
    let real: Vec<&Unit> = units.iter().filter(|u| !is_pseudo_unit(u)).collect();
    let units_skipped = units.len() - real.len();

    let per_unit: Vec<Vec<Violation>> = real
        .par_iter()
        .map(|unit| {
            let violations = check_unit(unit, rules, policy);
            tracing::debug!(
                unit = %unit.module_path,
                violations = violations.len(),
                "unit checked"
            );
            violations
        })
        .collect();

    let mut violations: Vec<Violation> = per_unit.into_iter().flatten().collect();
    violations.sort();

    AnalysisOutput {
        summary: AnalysisSummary {
            total: violations.len(),
            units_analyzed: real.len(),
            units_skipped,
        },
        violations,
    }
}

fn is_pseudo_unit(unit: &Unit) -> bool {
    PSEUDO_MODULES.contains(&unit.module_path.as_str())
}
