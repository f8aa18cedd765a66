//! Two-tier syntax-tree walk.
//!
//! The statement level extracts the expression sub-trees each statement
//! shape holds and recurses into child statements; the expression level
//! calls the visitor pre-order on every node, then descends into nested
//! expressions. Every expression reachable from a statement is visited
//! exactly once.

use outguard_ir::ast::{CaseClause, Expr, ExprKind, Field, File, Stmt, StmtKind};

/// Receives every expression node encountered during a walk, pre-order.
pub trait ExprVisitor {
    fn visit(&mut self, expr: &Expr);
}

/// Walk every top-level declaration of a file.
pub fn walk_file<V: ExprVisitor>(v: &mut V, file: &File) {
    for decl in &file.decls {
        walk_stmt(v, decl);
    }
}

pub fn walk_stmt<V: ExprVisitor>(v: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Labeled { label, stmt } => {
            walk_expr(v, label);
            walk_stmt(v, stmt);
        }
        StmtKind::Expr { expr } => walk_expr(v, expr),
        StmtKind::Send { chan, value } => {
            walk_expr(v, chan);
            walk_expr(v, value);
        }
        StmtKind::IncDec { expr } => walk_expr(v, expr),
        StmtKind::Assign { lhs, rhs } => {
            walk_exprs(v, lhs);
            walk_exprs(v, rhs);
        }
        StmtKind::Go { call } => walk_expr(v, call),
        StmtKind::Defer { call } => walk_expr(v, call),
        StmtKind::Return { results } => walk_exprs(v, results),
        StmtKind::Branch { label } => {
            if let Some(label) = label {
                walk_expr(v, label);
            }
        }
        StmtKind::Block { stmts } => walk_stmts(v, stmts),
        StmtKind::If {
            init,
            cond,
            then,
            else_branch,
        } => {
            if let Some(init) = init {
                walk_stmt(v, init);
            }
            walk_expr(v, cond);
            walk_stmts(v, then);
            if let Some(else_branch) = else_branch {
                walk_stmt(v, else_branch);
            }
        }
        StmtKind::Switch { init, tag, cases } => {
            if let Some(init) = init {
                walk_stmt(v, init);
            }
            if let Some(tag) = tag {
                walk_expr(v, tag);
            }
            for CaseClause { list, body } in cases {
                walk_exprs(v, list);
                walk_stmts(v, body);
            }
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                walk_stmt(v, init);
            }
            if let Some(cond) = cond {
                walk_expr(v, cond);
            }
            if let Some(post) = post {
                walk_stmt(v, post);
            }
            walk_stmts(v, body);
        }
        StmtKind::Range {
            key,
            value,
            expr,
            body,
        } => {
            if let Some(key) = key {
                walk_expr(v, key);
            }
            if let Some(value) = value {
                walk_expr(v, value);
            }
            walk_expr(v, expr);
            walk_stmts(v, body);
        }
        StmtKind::VarDecl { specs } => {
            for spec in specs {
                walk_exprs(v, &spec.names);
                if let Some(ty) = &spec.ty {
                    walk_expr(v, ty);
                }
                walk_exprs(v, &spec.values);
            }
        }
        StmtKind::TypeDecl { specs } => {
            for spec in specs {
                walk_expr(v, &spec.name);
                walk_expr(v, &spec.ty);
            }
        }
        StmtKind::FuncDecl {
            name,
            recv,
            sig,
            body,
        } => {
            walk_fields(v, recv);
            walk_expr(v, name);
            walk_expr(v, sig);
            walk_stmts(v, body);
        }
    }
}

pub fn walk_expr<V: ExprVisitor>(v: &mut V, expr: &Expr) {
    v.visit(expr);
    match &expr.kind {
        ExprKind::Ident { .. } | ExprKind::BasicLit { .. } => {}
        ExprKind::Unary { expr, .. } => walk_expr(v, expr),
        ExprKind::Star { expr } => walk_expr(v, expr),
        ExprKind::Paren { expr } => walk_expr(v, expr),
        ExprKind::Selector { recv, .. } => walk_expr(v, recv),
        ExprKind::Index { expr, index } => {
            walk_expr(v, expr);
            walk_expr(v, index);
        }
        ExprKind::Slice {
            expr,
            low,
            high,
            max,
        } => {
            walk_expr(v, expr);
            for bound in [low, high, max].into_iter().flatten() {
                walk_expr(v, bound);
            }
        }
        ExprKind::TypeAssert { expr, ty } => {
            walk_expr(v, expr);
            if let Some(ty) = ty {
                walk_expr(v, ty);
            }
        }
        ExprKind::Call { callee, args } => {
            walk_expr(v, callee);
            walk_exprs(v, args);
        }
        ExprKind::Binary { left, right, .. } => {
            walk_expr(v, left);
            walk_expr(v, right);
        }
        ExprKind::CompositeLit { ty, elems } => {
            if let Some(ty) = ty {
                walk_expr(v, ty);
            }
            walk_exprs(v, elems);
        }
        ExprKind::KeyValue { key, value } => {
            walk_expr(v, key);
            walk_expr(v, value);
        }
        ExprKind::Ellipsis { elem } => {
            if let Some(elem) = elem {
                walk_expr(v, elem);
            }
        }
        ExprKind::FuncLit { sig, body } => {
            walk_expr(v, sig);
            walk_stmts(v, body);
        }
        ExprKind::ArrayType { len, elem } => {
            if let Some(len) = len {
                walk_expr(v, len);
            }
            walk_expr(v, elem);
        }
        ExprKind::StructType { fields } => walk_fields(v, fields),
        ExprKind::FuncType { params, results } => {
            walk_fields(v, params);
            walk_fields(v, results);
        }
        ExprKind::InterfaceType { methods } => walk_fields(v, methods),
        ExprKind::MapType { key, value } => {
            walk_expr(v, key);
            walk_expr(v, value);
        }
        ExprKind::ChanType { elem } => walk_expr(v, elem),
    }
}

fn walk_stmts<V: ExprVisitor>(v: &mut V, stmts: &[Stmt]) {
    for stmt in stmts {
        walk_stmt(v, stmt);
    }
}

fn walk_exprs<V: ExprVisitor>(v: &mut V, exprs: &[Expr]) {
    for expr in exprs {
        walk_expr(v, expr);
    }
}

fn walk_fields<V: ExprVisitor>(v: &mut V, fields: &[Field]) {
    for field in fields {
        walk_exprs(v, &field.names);
        if let Some(ty) = &field.ty {
            walk_expr(v, ty);
        }
        if let Some(tag) = &field.tag {
            walk_expr(v, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outguard_ir::ast::ValueSpec;

    /// Collects the callee member/name of every call expression visited.
    #[derive(Default)]
    struct CallCollector {
        calls: Vec<String>,
        visited: usize,
    }

    impl ExprVisitor for CallCollector {
        fn visit(&mut self, expr: &Expr) {
            self.visited += 1;
            if let ExprKind::Call { callee, .. } = &expr.kind {
                let name = match &callee.kind {
                    ExprKind::Ident { name, .. } => name.clone(),
                    ExprKind::Selector { member, .. } => member.clone(),
                    _ => "?".into(),
                };
                self.calls.push(name);
            }
        }
    }

    fn ident(name: &str) -> Expr {
        Expr::new(ExprKind::Ident {
            name: name.into(),
            binding: None,
        })
    }

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::new(ExprKind::Call {
            callee: Box::new(ident(name)),
            args,
        })
    }

    fn collect(stmt: Stmt) -> CallCollector {
        let mut collector = CallCollector::default();
        walk_stmt(&mut collector, &Stmt::new(StmtKind::Block { stmts: vec![stmt] }));
        collector
    }

    #[test]
    fn test_call_in_expr_stmt() {
        let collector = collect(Stmt::new(StmtKind::Expr {
            expr: call("f", vec![ident("x")]),
        }));
        assert_eq!(collector.calls, vec!["f"]);
    }

    #[test]
    fn test_call_in_assign_both_sides() {
        let collector = collect(Stmt::new(StmtKind::Assign {
            lhs: vec![Expr::new(ExprKind::Index {
                expr: Box::new(ident("m")),
                index: Box::new(call("key", vec![])),
            })],
            rhs: vec![call("g", vec![])],
        }));
        assert_eq!(collector.calls, vec!["key", "g"]);
    }

    #[test]
    fn test_call_in_go_defer_send_return() {
        let stmts = vec![
            Stmt::new(StmtKind::Go {
                call: call("worker", vec![]),
            }),
            Stmt::new(StmtKind::Defer {
                call: call("cleanup", vec![]),
            }),
            Stmt::new(StmtKind::Send {
                chan: ident("ch"),
                value: call("produce", vec![]),
            }),
            Stmt::new(StmtKind::Return {
                results: vec![call("result", vec![])],
            }),
        ];
        let collector = collect(Stmt::new(StmtKind::Block { stmts }));
        assert_eq!(collector.calls, vec!["worker", "cleanup", "produce", "result"]);
    }

    #[test]
    fn test_call_in_switch_tag_and_case_labels() {
        let collector = collect(Stmt::new(StmtKind::Switch {
            init: None,
            tag: Some(call("tag", vec![])),
            cases: vec![CaseClause {
                list: vec![call("label", vec![])],
                body: vec![Stmt::new(StmtKind::Expr {
                    expr: call("handle", vec![]),
                })],
            }],
        }));
        assert_eq!(collector.calls, vec!["tag", "label", "handle"]);
    }

    #[test]
    fn test_call_in_if_cond_and_nested_blocks() {
        let collector = collect(Stmt::new(StmtKind::If {
            init: Some(Box::new(Stmt::new(StmtKind::Assign {
                lhs: vec![ident("err")],
                rhs: vec![call("try", vec![])],
            }))),
            cond: Expr::new(ExprKind::Binary {
                op: "!=".into(),
                left: Box::new(ident("err")),
                right: Box::new(ident("nil")),
            }),
            then: vec![Stmt::new(StmtKind::Expr {
                expr: call("log", vec![]),
            })],
            else_branch: Some(Box::new(Stmt::new(StmtKind::Block {
                stmts: vec![Stmt::new(StmtKind::Expr {
                    expr: call("ok", vec![]),
                })],
            }))),
        }));
        assert_eq!(collector.calls, vec!["try", "log", "ok"]);
    }

    #[test]
    fn test_call_in_loop_and_range() {
        let collector = collect(Stmt::new(StmtKind::Block {
            stmts: vec![
                Stmt::new(StmtKind::For {
                    init: None,
                    cond: Some(call("more", vec![])),
                    post: None,
                    body: vec![Stmt::new(StmtKind::Expr {
                        expr: call("step", vec![]),
                    })],
                }),
                Stmt::new(StmtKind::Range {
                    key: Some(ident("i")),
                    value: None,
                    expr: call("items", vec![]),
                    body: vec![],
                }),
            ],
        }));
        assert_eq!(collector.calls, vec!["more", "step", "items"]);
    }

    #[test]
    fn test_call_nested_in_expressions() {
        // f(g(h())) visits all three, outermost first.
        let collector = collect(Stmt::new(StmtKind::Expr {
            expr: call("f", vec![call("g", vec![call("h", vec![])])]),
        }));
        assert_eq!(collector.calls, vec!["f", "g", "h"]);
    }

    #[test]
    fn test_call_in_composite_literal_and_keyvalue() {
        let collector = collect(Stmt::new(StmtKind::Expr {
            expr: Expr::new(ExprKind::CompositeLit {
                ty: Some(Box::new(ident("T"))),
                elems: vec![Expr::new(ExprKind::KeyValue {
                    key: Box::new(ident("field")),
                    value: Box::new(call("init", vec![])),
                })],
            }),
        }));
        assert_eq!(collector.calls, vec!["init"]);
    }

    #[test]
    fn test_call_in_var_decl_values() {
        let collector = collect(Stmt::new(StmtKind::VarDecl {
            specs: vec![ValueSpec {
                names: vec![ident("x")],
                ty: None,
                values: vec![call("make_x", vec![])],
            }],
        }));
        assert_eq!(collector.calls, vec!["make_x"]);
    }

    #[test]
    fn test_call_in_func_lit_body() {
        let collector = collect(Stmt::new(StmtKind::Go {
            call: Expr::new(ExprKind::Call {
                callee: Box::new(Expr::new(ExprKind::FuncLit {
                    sig: Box::new(Expr::new(ExprKind::FuncType {
                        params: vec![],
                        results: vec![],
                    })),
                    body: vec![Stmt::new(StmtKind::Expr {
                        expr: call("inner", vec![]),
                    })],
                })),
                args: vec![],
            }),
        }));
        assert_eq!(collector.calls, vec!["?", "inner"]);
    }

    #[test]
    fn test_func_decl_walks_recv_sig_body() {
        let decl = Stmt::new(StmtKind::FuncDecl {
            name: ident("Method"),
            recv: vec![Field {
                names: vec![ident("s")],
                ty: Some(Expr::new(ExprKind::Star {
                    expr: Box::new(ident("Server")),
                })),
                tag: None,
            }],
            sig: Expr::new(ExprKind::FuncType {
                params: vec![],
                results: vec![],
            }),
            body: vec![Stmt::new(StmtKind::Expr {
                expr: call("body_call", vec![]),
            })],
        });
        let collector = collect(decl);
        assert_eq!(collector.calls, vec!["body_call"]);
        assert!(collector.visited > 4, "receiver/name/sig nodes visited too");
    }

    #[test]
    fn test_each_node_visited_once() {
        // A single call statement: call + callee ident + one arg ident.
        let collector = collect(Stmt::new(StmtKind::Expr {
            expr: call("f", vec![ident("x")]),
        }));
        assert_eq!(collector.visited, 3);
    }
}
