//! AST node representation.
//!
//! Every node is a `Node` header (source range) plus a `NodeData` payload.
//! `NodeData` is a closed set of variants; consumers match on it and treat
//! anything they do not handle as an explicit "unhandled kind" outcome.
//! Child links are `NodeIndex` values into the owning `NodeArena`.

use std::sync::Arc;

use sigchan_common::{Span, Spanned};
use sigchan_scanner::{CommentRange, SyntaxKind};

use super::base::{NodeIndex, NodeList};

#[derive(Clone, Debug)]
pub struct Node {
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset, exclusive)
    pub end: u32,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

impl Spanned for Node {
    fn span(&self) -> Span {
        Span::new(self.pos, self.end)
    }
}

/// Fieldless discriminant of `NodeData`, used for traversal filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,
    Bad,
    // Declarations
    GenDecl,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    FuncDecl,
    Field,
    // Statements
    Block,
    ExprStmt,
    AssignStmt,
    IncDecStmt,
    SendStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    LabeledStmt,
    DeclStmt,
    EmptyStmt,
    IfStmt,
    ForStmt,
    RangeStmt,
    SwitchStmt,
    TypeSwitchStmt,
    CaseClause,
    SelectStmt,
    CommClause,
    // Expressions
    Ident,
    BasicLit,
    CompositeLit,
    KeyValueExpr,
    FuncLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    Ellipsis,
    // Types
    ArrayType,
    MapType,
    ChanType,
    FuncType,
    StructType,
    InterfaceType,
}

/// Direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: Arc<str>,
    pub package_name: NodeIndex,
    pub imports: NodeList,
    pub decls: NodeList,
    pub comments: Vec<CommentRange>,
}

/// `import`, `var`, `const` or `type` declaration, possibly grouped.
#[derive(Clone, Debug)]
pub struct GenDeclData {
    pub keyword: SyntaxKind,
    pub grouped: bool,
    pub specs: NodeList,
}

#[derive(Clone, Debug)]
pub struct ImportSpecData {
    /// Local name (`Ident`, possibly `.` or `_`), or NONE.
    pub name: NodeIndex,
    /// Import path without quotes.
    pub path: String,
}

/// `a, b T = x, y` inside a `var` or `const` declaration.
#[derive(Clone, Debug)]
pub struct ValueSpecData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    pub values: NodeList,
}

#[derive(Clone, Debug)]
pub struct TypeSpecData {
    pub name: NodeIndex,
    /// `type A = B` declares an alias.
    pub is_alias: bool,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FuncDeclData {
    /// Receiver parameter list (Fields), empty for plain functions.
    pub receiver: NodeList,
    pub name: NodeIndex,
    /// `FuncType` node.
    pub signature: NodeIndex,
    /// `Block`, or NONE for external functions.
    pub body: NodeIndex,
}

/// Parameter, result, struct field or interface method.
#[derive(Clone, Debug)]
pub struct FieldData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    /// Struct tag literal, or NONE.
    pub tag: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

/// `lhs op rhs` where op is `=`, `:=` or an operator assignment.
#[derive(Clone, Debug)]
pub struct AssignData {
    pub lhs: NodeList,
    pub op: SyntaxKind,
    pub rhs: NodeList,
}

impl AssignData {
    /// `:=` declares the identifiers on its left-hand side.
    pub fn is_define(&self) -> bool {
        self.op == SyntaxKind::ColonEqualsToken
    }
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub then_block: NodeIndex,
    /// `Block`, nested `IfStmt`, or NONE.
    pub else_branch: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub post: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct RangeData {
    pub key: NodeIndex,
    pub value: NodeIndex,
    /// `:=`, `=`, or `Unknown` for `for range x`.
    pub op: SyntaxKind,
    pub expression: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub init: NodeIndex,
    /// Tag expression (`SwitchStmt`) or the guard statement (`TypeSwitchStmt`).
    pub tag: NodeIndex,
    pub clauses: NodeList,
}

#[derive(Clone, Debug)]
pub struct CaseClauseData {
    /// Empty for `default`.
    pub list: NodeList,
    pub is_default: bool,
    pub body: NodeList,
}

#[derive(Clone, Debug)]
pub struct CommClauseData {
    /// Send or receive statement, or NONE for `default`.
    pub comm: NodeIndex,
    pub body: NodeList,
}

#[derive(Clone, Debug)]
pub struct IdentData {
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub kind: SyntaxKind,
    /// Literal text exactly as written.
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct CompositeLitData {
    /// Literal type, or NONE for elided inner literals.
    pub type_node: NodeIndex,
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct SelectorData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IndexData {
    pub expression: NodeIndex,
    pub indices: NodeList,
}

#[derive(Clone, Debug)]
pub struct SliceData {
    pub expression: NodeIndex,
    pub low: NodeIndex,
    pub high: NodeIndex,
    pub max: NodeIndex,
    pub three_index: bool,
}

/// A function or method call, or a conversion.
#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    pub arguments: NodeList,
    /// Final argument is followed by `...`.
    pub has_ellipsis: bool,
}

#[derive(Clone, Debug)]
pub struct UnaryData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub operator: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ChanTypeData {
    pub dir: ChanDir,
    pub element: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FuncTypeData {
    pub params: NodeList,
    pub results: NodeList,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    SourceFile(SourceFileData),
    /// Placeholder for input that failed to parse.
    Bad,

    GenDecl(GenDeclData),
    ImportSpec(ImportSpecData),
    ValueSpec(ValueSpecData),
    TypeSpec(TypeSpecData),
    FuncDecl(FuncDeclData),
    Field(FieldData),

    Block(BlockData),
    ExprStmt { expression: NodeIndex },
    AssignStmt(AssignData),
    IncDecStmt { expression: NodeIndex, operator: SyntaxKind },
    SendStmt { channel: NodeIndex, value: NodeIndex },
    GoStmt { call: NodeIndex },
    DeferStmt { call: NodeIndex },
    ReturnStmt { results: NodeList },
    BranchStmt { keyword: SyntaxKind, label: NodeIndex },
    LabeledStmt { label: NodeIndex, statement: NodeIndex },
    DeclStmt { declaration: NodeIndex },
    EmptyStmt,
    IfStmt(IfData),
    ForStmt(ForData),
    RangeStmt(RangeData),
    SwitchStmt(SwitchData),
    TypeSwitchStmt(SwitchData),
    CaseClause(CaseClauseData),
    SelectStmt { clauses: NodeList },
    CommClause(CommClauseData),

    Ident(IdentData),
    BasicLit(LiteralData),
    CompositeLit(CompositeLitData),
    KeyValueExpr { key: NodeIndex, value: NodeIndex },
    FuncLit { signature: NodeIndex, body: NodeIndex },
    ParenExpr { expression: NodeIndex },
    SelectorExpr(SelectorData),
    IndexExpr(IndexData),
    SliceExpr(SliceData),
    /// `x.(T)`; `type_node` is NONE for `x.(type)`.
    TypeAssertExpr { expression: NodeIndex, type_node: NodeIndex },
    CallExpr(CallData),
    /// `*x`: pointer type or dereference.
    StarExpr { expression: NodeIndex },
    UnaryExpr(UnaryData),
    BinaryExpr(BinaryData),
    /// `...T` in a parameter list or `[...]T` array length (element NONE).
    Ellipsis { element: NodeIndex },

    /// `[len]T`; `length` is NONE for slices.
    ArrayType { length: NodeIndex, element: NodeIndex },
    MapType { key: NodeIndex, value: NodeIndex },
    ChanType(ChanTypeData),
    FuncType(FuncTypeData),
    StructType { fields: NodeList },
    InterfaceType { methods: NodeList },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::SourceFile(_) => NodeKind::SourceFile,
            NodeData::Bad => NodeKind::Bad,
            NodeData::GenDecl(_) => NodeKind::GenDecl,
            NodeData::ImportSpec(_) => NodeKind::ImportSpec,
            NodeData::ValueSpec(_) => NodeKind::ValueSpec,
            NodeData::TypeSpec(_) => NodeKind::TypeSpec,
            NodeData::FuncDecl(_) => NodeKind::FuncDecl,
            NodeData::Field(_) => NodeKind::Field,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::ExprStmt { .. } => NodeKind::ExprStmt,
            NodeData::AssignStmt(_) => NodeKind::AssignStmt,
            NodeData::IncDecStmt { .. } => NodeKind::IncDecStmt,
            NodeData::SendStmt { .. } => NodeKind::SendStmt,
            NodeData::GoStmt { .. } => NodeKind::GoStmt,
            NodeData::DeferStmt { .. } => NodeKind::DeferStmt,
            NodeData::ReturnStmt { .. } => NodeKind::ReturnStmt,
            NodeData::BranchStmt { .. } => NodeKind::BranchStmt,
            NodeData::LabeledStmt { .. } => NodeKind::LabeledStmt,
            NodeData::DeclStmt { .. } => NodeKind::DeclStmt,
            NodeData::EmptyStmt => NodeKind::EmptyStmt,
            NodeData::IfStmt(_) => NodeKind::IfStmt,
            NodeData::ForStmt(_) => NodeKind::ForStmt,
            NodeData::RangeStmt(_) => NodeKind::RangeStmt,
            NodeData::SwitchStmt(_) => NodeKind::SwitchStmt,
            NodeData::TypeSwitchStmt(_) => NodeKind::TypeSwitchStmt,
            NodeData::CaseClause(_) => NodeKind::CaseClause,
            NodeData::SelectStmt { .. } => NodeKind::SelectStmt,
            NodeData::CommClause(_) => NodeKind::CommClause,
            NodeData::Ident(_) => NodeKind::Ident,
            NodeData::BasicLit(_) => NodeKind::BasicLit,
            NodeData::CompositeLit(_) => NodeKind::CompositeLit,
            NodeData::KeyValueExpr { .. } => NodeKind::KeyValueExpr,
            NodeData::FuncLit { .. } => NodeKind::FuncLit,
            NodeData::ParenExpr { .. } => NodeKind::ParenExpr,
            NodeData::SelectorExpr(_) => NodeKind::SelectorExpr,
            NodeData::IndexExpr(_) => NodeKind::IndexExpr,
            NodeData::SliceExpr(_) => NodeKind::SliceExpr,
            NodeData::TypeAssertExpr { .. } => NodeKind::TypeAssertExpr,
            NodeData::CallExpr(_) => NodeKind::CallExpr,
            NodeData::StarExpr { .. } => NodeKind::StarExpr,
            NodeData::UnaryExpr(_) => NodeKind::UnaryExpr,
            NodeData::BinaryExpr(_) => NodeKind::BinaryExpr,
            NodeData::Ellipsis { .. } => NodeKind::Ellipsis,
            NodeData::ArrayType { .. } => NodeKind::ArrayType,
            NodeData::MapType { .. } => NodeKind::MapType,
            NodeData::ChanType(_) => NodeKind::ChanType,
            NodeData::FuncType(_) => NodeKind::FuncType,
            NodeData::StructType { .. } => NodeKind::StructType,
            NodeData::InterfaceType { .. } => NodeKind::InterfaceType,
        }
    }
}

/// Arena that owns every node of one package.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
