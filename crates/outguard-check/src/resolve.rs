//! Call-site resolution: deriving a qualified identity for a callee.
//!
//! Three callee shapes can yield an identity; anything else (calls through
//! local function values, unresolved symbols) is a known blind spot and is
//! skipped rather than guessed at.

use outguard_ir::ast::{Binding, Expr, ExprKind};

/// A resolved call site: the identity used for rule matching plus the bare
/// name used for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    /// `<owning-module-or-type>.<member>`; compared by suffix, never parsed.
    pub identity: String,
    /// Bare member/function name, for human-readable reporting only.
    pub method: String,
}

/// The callee shapes that can be resolved, in precedence order.
#[derive(Debug, PartialEq, Eq)]
enum CalleeForm<'a> {
    /// Bare identifier bound to a package-level object (covers same-package
    /// and dot-imported calls).
    Bare { module: &'a str, name: &'a str },
    /// Selector whose receiver is an imported-module alias.
    ModuleMember { module: &'a str, member: &'a str },
    /// Selector on a value with a known static type (method calls).
    TypedMember {
        type_name: &'a str,
        member: &'a str,
    },
}

impl CalleeForm<'_> {
    fn resolve(&self) -> ResolvedCall {
        match self {
            CalleeForm::Bare { module, name } => ResolvedCall {
                identity: format!("{module}.{name}"),
                method: (*name).to_string(),
            },
            CalleeForm::ModuleMember { module, member } => ResolvedCall {
                identity: format!("{module}.{member}"),
                method: (*member).to_string(),
            },
            CalleeForm::TypedMember { type_name, member } => ResolvedCall {
                identity: format!("{type_name}.{member}"),
                method: (*member).to_string(),
            },
        }
    }
}

/// Derive the identity and display name of a call's callee expression.
/// Returns `None` when no qualified identity exists.
pub fn resolve_callee(callee: &Expr) -> Option<ResolvedCall> {
    classify(callee).map(|form| form.resolve())
}

fn classify(callee: &Expr) -> Option<CalleeForm<'_>> {
    match &callee.kind {
        ExprKind::Ident {
            name,
            binding: Some(Binding::Object { module }),
        } => Some(CalleeForm::Bare { module, name }),
        ExprKind::Selector {
            recv,
            member,
            recv_type,
        } => {
            // A module-alias receiver wins over its (nonexistent) value type.
            if let ExprKind::Ident {
                binding: Some(Binding::Module { module }),
                ..
            } = &recv.kind
            {
                return Some(CalleeForm::ModuleMember { module, member });
            }
            recv_type
                .as_deref()
                .map(|type_name| CalleeForm::TypedMember { type_name, member })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, binding: Option<Binding>) -> Expr {
        Expr::new(ExprKind::Ident {
            name: name.into(),
            binding,
        })
    }

    #[test]
    fn test_bare_name_with_object_binding() {
        let callee = ident(
            "Unmarshal",
            Some(Binding::Object {
                module: "encoding/json".into(),
            }),
        );
        let resolved = resolve_callee(&callee).unwrap();
        assert_eq!(resolved.identity, "encoding/json.Unmarshal");
        assert_eq!(resolved.method, "Unmarshal");
    }

    #[test]
    fn test_bare_name_without_binding_is_skipped() {
        assert!(resolve_callee(&ident("f", None)).is_none());
    }

    #[test]
    fn test_bare_local_function_value_is_skipped() {
        let callee = ident(
            "handler",
            Some(Binding::Local {
                def: None,
                type_name: Some("func()".into()),
            }),
        );
        assert!(resolve_callee(&callee).is_none());
    }

    #[test]
    fn test_module_alias_member() {
        let callee = Expr::new(ExprKind::Selector {
            recv: Box::new(ident(
                "json",
                Some(Binding::Module {
                    module: "encoding/json".into(),
                }),
            )),
            member: "Unmarshal".into(),
            recv_type: None,
        });
        let resolved = resolve_callee(&callee).unwrap();
        assert_eq!(resolved.identity, "encoding/json.Unmarshal");
        assert_eq!(resolved.method, "Unmarshal");
    }

    #[test]
    fn test_module_alias_wins_over_recv_type() {
        // A front-end may attach a type to the selector anyway; the alias
        // resolution takes precedence.
        let callee = Expr::new(ExprKind::Selector {
            recv: Box::new(ident(
                "yaml",
                Some(Binding::Module {
                    module: "gopkg.in/yaml.v2".into(),
                }),
            )),
            member: "Unmarshal".into(),
            recv_type: Some("invalid".into()),
        });
        let resolved = resolve_callee(&callee).unwrap();
        assert_eq!(resolved.identity, "gopkg.in/yaml.v2.Unmarshal");
    }

    #[test]
    fn test_typed_member_method_call() {
        let callee = Expr::new(ExprKind::Selector {
            recv: Box::new(ident(
                "dec",
                Some(Binding::Local {
                    def: None,
                    type_name: Some("*encoding/json.Decoder".into()),
                }),
            )),
            member: "Decode".into(),
            recv_type: Some("*encoding/json.Decoder".into()),
        });
        let resolved = resolve_callee(&callee).unwrap();
        assert_eq!(resolved.identity, "*encoding/json.Decoder.Decode");
        assert_eq!(resolved.method, "Decode");
    }

    #[test]
    fn test_selector_without_type_is_skipped() {
        let callee = Expr::new(ExprKind::Selector {
            recv: Box::new(ident("mystery", None)),
            member: "Do".into(),
            recv_type: None,
        });
        assert!(resolve_callee(&callee).is_none());
    }

    #[test]
    fn test_non_callee_shapes_are_skipped() {
        let paren = Expr::new(ExprKind::Paren {
            expr: Box::new(ident(
                "f",
                Some(Binding::Object { module: "p".into() }),
            )),
        });
        assert!(resolve_callee(&paren).is_none(), "parenthesized callees are a known miss");
    }
}
