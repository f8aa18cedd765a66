//! Address classifier: does an argument expression satisfy an
//! output-parameter position?
//!
//! This is a syntactic, single-hop heuristic, not a data-flow analysis.
//! Identifiers are traced through at most their single defining simple
//! assignment; reassignment, branching, and shadowing are outside its reach.

use std::collections::HashSet;

use outguard_ir::ast::{Binding, Expr, ExprKind, Unit};

/// How bare identifiers with no address-taking defining assignment are
/// classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentPolicy {
    /// Trace the single defining assignment only.
    #[default]
    TraceAssignment,
    /// Additionally accept any identifier whose static type is a pointer.
    AcceptPointerTyped,
}

/// Whether `expr` is an acceptable address-taking expression:
/// `&x`, the explicit no-op `*&x`, literal `nil`, or an identifier whose
/// single defining assignment classifies as one.
pub fn is_addr(unit: &Unit, expr: &Expr, policy: IdentPolicy) -> bool {
    // single_defs comes from external input; the guard keeps self-referential
    // definition chains finite.
    let mut seen = HashSet::new();
    classify(unit, expr, policy, &mut seen)
}

fn classify(unit: &Unit, expr: &Expr, policy: IdentPolicy, seen: &mut HashSet<u64>) -> bool {
    match &expr.kind {
        ExprKind::Unary { op, .. } => op == "&",
        // *&x signals "no fresh address intended here" and is accepted as-is.
        ExprKind::Star { expr } => {
            matches!(&expr.kind, ExprKind::Unary { op, .. } if op == "&")
        }
        ExprKind::Ident { name, binding } => match binding {
            Some(Binding::Local { def, type_name }) => {
                if policy == IdentPolicy::AcceptPointerTyped
                    && type_name.as_deref().is_some_and(|t| t.starts_with('*'))
                {
                    return true;
                }
                match def {
                    Some(id) if seen.insert(*id) => unit
                        .single_defs
                        .get(id)
                        .is_some_and(|rhs| classify(unit, rhs, policy, seen)),
                    _ => false,
                }
            }
            // The universe `nil` carries no binding.
            None => name == "nil",
            Some(_) => false,
        },
        _ => false,
    }
}
