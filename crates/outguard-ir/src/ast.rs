//! Syntax-tree wrappers mirroring the JSON schema produced by the front-end
//! bridge.
//!
//! One [`Unit`] per resolved Go package. The bridge embeds every resolution
//! result the analysis needs directly on the nodes: identifier bindings
//! ([`Binding`]), receiver static types (`Selector::recv_type`), and the
//! single-defining-assignment table ([`Unit::single_defs`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A resolved compilation unit — one Go package as emitted by the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Import path of the package (e.g., "example.com/demo").
    pub module_path: String,
    /// Package name.
    pub name: String,
    #[serde(default)]
    pub files: Vec<File>,
    /// RHS expressions of single defining assignments, keyed by the local
    /// object's definition id. Objects with multi-path (control-flow-merged)
    /// definitions are absent.
    #[serde(default)]
    pub single_defs: HashMap<u64, Expr>,
}

impl Unit {
    /// Deserialize a bridge JSON document into an owned `Unit`.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// One source file of a unit: its path plus top-level declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub path: String,
    #[serde(default)]
    pub decls: Vec<Stmt>,
}

/// Source position, 1-based line and column (matching Go's `token.Position`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// How the front-end resolved an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// A package-level object (function, var, const); `module` is the import
    /// path of the owning package. Covers same-package and dot-imported names.
    Object { module: String },
    /// The identifier is an alias for an imported module.
    Module { module: String },
    /// A local object. `def` keys into [`Unit::single_defs`] when the object
    /// has exactly one simple defining assignment; `type_name` is the static
    /// type string when known.
    Local {
        #[serde(default)]
        def: Option<u64>,
        #[serde(default)]
        type_name: Option<String>,
    },
}

/// An expression node: optional position plus shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(default)]
    pub pos: Option<Pos>,
    #[serde(flatten)]
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { pos: None, kind }
    }

    pub fn at(kind: ExprKind, pos: Pos) -> Self {
        Self {
            pos: Some(pos),
            kind,
        }
    }
}

/// Expression shapes. Unary operators are carried as their Go spelling
/// (`"&"`, `"-"`, `"!"`, ...), the way the bridge emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    Ident {
        name: String,
        #[serde(default)]
        binding: Option<Binding>,
    },
    BasicLit {
        value: String,
    },
    Unary {
        op: String,
        expr: Box<Expr>,
    },
    /// Pointer dereference (Go `*x`; distinct from unary operators).
    Star {
        expr: Box<Expr>,
    },
    Paren {
        expr: Box<Expr>,
    },
    Selector {
        recv: Box<Expr>,
        member: String,
        /// Static type of the receiver, when the front-end resolved one.
        #[serde(default)]
        recv_type: Option<String>,
    },
    Index {
        expr: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        expr: Box<Expr>,
        #[serde(default)]
        low: Option<Box<Expr>>,
        #[serde(default)]
        high: Option<Box<Expr>>,
        #[serde(default)]
        max: Option<Box<Expr>>,
    },
    TypeAssert {
        expr: Box<Expr>,
        #[serde(default)]
        ty: Option<Box<Expr>>,
    },
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    CompositeLit {
        #[serde(default)]
        ty: Option<Box<Expr>>,
        #[serde(default)]
        elems: Vec<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    Ellipsis {
        #[serde(default)]
        elem: Option<Box<Expr>>,
    },
    /// Function literal; its body is statement-level like a declaration's.
    FuncLit {
        sig: Box<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
    },
    ArrayType {
        #[serde(default)]
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    StructType {
        #[serde(default)]
        fields: Vec<Field>,
    },
    FuncType {
        #[serde(default)]
        params: Vec<Field>,
        #[serde(default)]
        results: Vec<Field>,
    },
    InterfaceType {
        #[serde(default)]
        methods: Vec<Field>,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType {
        elem: Box<Expr>,
    },
}

/// A field group in a struct type, function signature, interface, or method
/// receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub names: Vec<Expr>,
    #[serde(default)]
    pub ty: Option<Expr>,
    #[serde(default)]
    pub tag: Option<Expr>,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    #[serde(flatten)]
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self { kind }
    }
}

/// Statement shapes that can contain expressions or nested statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKind {
    Labeled {
        label: Expr,
        stmt: Box<Stmt>,
    },
    Expr {
        expr: Expr,
    },
    Send {
        chan: Expr,
        value: Expr,
    },
    IncDec {
        expr: Expr,
    },
    Assign {
        #[serde(default)]
        lhs: Vec<Expr>,
        #[serde(default)]
        rhs: Vec<Expr>,
    },
    Go {
        call: Expr,
    },
    Defer {
        call: Expr,
    },
    Return {
        #[serde(default)]
        results: Vec<Expr>,
    },
    Branch {
        #[serde(default)]
        label: Option<Expr>,
    },
    Block {
        #[serde(default)]
        stmts: Vec<Stmt>,
    },
    If {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        cond: Expr,
        #[serde(default)]
        then: Vec<Stmt>,
        #[serde(default)]
        else_branch: Option<Box<Stmt>>,
    },
    Switch {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        #[serde(default)]
        tag: Option<Expr>,
        #[serde(default)]
        cases: Vec<CaseClause>,
    },
    For {
        #[serde(default)]
        init: Option<Box<Stmt>>,
        #[serde(default)]
        cond: Option<Expr>,
        #[serde(default)]
        post: Option<Box<Stmt>>,
        #[serde(default)]
        body: Vec<Stmt>,
    },
    Range {
        #[serde(default)]
        key: Option<Expr>,
        #[serde(default)]
        value: Option<Expr>,
        expr: Expr,
        #[serde(default)]
        body: Vec<Stmt>,
    },
    VarDecl {
        #[serde(default)]
        specs: Vec<ValueSpec>,
    },
    TypeDecl {
        #[serde(default)]
        specs: Vec<TypeSpec>,
    },
    FuncDecl {
        name: Expr,
        #[serde(default)]
        recv: Vec<Field>,
        sig: Expr,
        #[serde(default)]
        body: Vec<Stmt>,
    },
}

/// One `case` clause of a switch statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseClause {
    #[serde(default)]
    pub list: Vec<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

/// One name group of a `var`/`const` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    #[serde(default)]
    pub names: Vec<Expr>,
    #[serde(default)]
    pub ty: Option<Expr>,
    #[serde(default)]
    pub values: Vec<Expr>,
}

/// One `type` spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: Expr,
    pub ty: Expr,
}
