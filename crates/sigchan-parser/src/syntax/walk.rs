//! Child traversal over the closed set of node variants.

use crate::parser::base::{NodeIndex, NodeList};
use crate::parser::node::{
    AssignData, BinaryData, BlockData, CallData, CaseClauseData, ChanTypeData, CommClauseData,
    CompositeLitData, FieldData, ForData, FuncDeclData, FuncTypeData, GenDeclData, IfData,
    IndexData, NodeArena, NodeData, RangeData, SelectorData, SliceData, SourceFileData,
    SwitchData, TypeSpecData, UnaryData, ValueSpecData,
};

/// Call `f` on every direct child of `data`, in source order.
pub fn for_each_child_of(data: &NodeData, f: &mut dyn FnMut(NodeIndex)) {
    let mut one = |idx: NodeIndex| {
        if idx.is_some() {
            f(idx);
        }
    };
    match data {
        NodeData::SourceFile(d) => {
            one(d.package_name);
            d.imports.iter().chain(d.decls.iter()).for_each(|&i| one(i));
        }
        NodeData::GenDecl(d) => d.specs.iter().for_each(|&i| one(i)),
        NodeData::ImportSpec(d) => one(d.name),
        NodeData::ValueSpec(d) => {
            d.names.iter().for_each(|&i| one(i));
            one(d.type_node);
            d.values.iter().for_each(|&i| one(i));
        }
        NodeData::TypeSpec(d) => {
            one(d.name);
            one(d.type_node);
        }
        NodeData::FuncDecl(d) => {
            d.receiver.iter().for_each(|&i| one(i));
            one(d.name);
            one(d.signature);
            one(d.body);
        }
        NodeData::Field(d) => {
            d.names.iter().for_each(|&i| one(i));
            one(d.type_node);
            one(d.tag);
        }
        NodeData::Block(d) => d.statements.iter().for_each(|&i| one(i)),
        NodeData::ExprStmt { expression } => one(*expression),
        NodeData::AssignStmt(d) => d.lhs.iter().chain(d.rhs.iter()).for_each(|&i| one(i)),
        NodeData::IncDecStmt { expression, .. } => one(*expression),
        NodeData::SendStmt { channel, value } => {
            one(*channel);
            one(*value);
        }
        NodeData::GoStmt { call } | NodeData::DeferStmt { call } => one(*call),
        NodeData::ReturnStmt { results } => results.iter().for_each(|&i| one(i)),
        NodeData::BranchStmt { label, .. } => one(*label),
        NodeData::LabeledStmt { label, statement } => {
            one(*label);
            one(*statement);
        }
        NodeData::DeclStmt { declaration } => one(*declaration),
        NodeData::IfStmt(d) => {
            one(d.init);
            one(d.condition);
            one(d.then_block);
            one(d.else_branch);
        }
        NodeData::ForStmt(d) => {
            one(d.init);
            one(d.condition);
            one(d.post);
            one(d.body);
        }
        NodeData::RangeStmt(d) => {
            one(d.key);
            one(d.value);
            one(d.expression);
            one(d.body);
        }
        NodeData::SwitchStmt(d) | NodeData::TypeSwitchStmt(d) => {
            one(d.init);
            one(d.tag);
            d.clauses.iter().for_each(|&i| one(i));
        }
        NodeData::CaseClause(d) => d.list.iter().chain(d.body.iter()).for_each(|&i| one(i)),
        NodeData::SelectStmt { clauses } => clauses.iter().for_each(|&i| one(i)),
        NodeData::CommClause(d) => {
            one(d.comm);
            d.body.iter().for_each(|&i| one(i));
        }
        NodeData::CompositeLit(d) => {
            one(d.type_node);
            d.elements.iter().for_each(|&i| one(i));
        }
        NodeData::KeyValueExpr { key, value } => {
            one(*key);
            one(*value);
        }
        NodeData::FuncLit { signature, body } => {
            one(*signature);
            one(*body);
        }
        NodeData::ParenExpr { expression }
        | NodeData::StarExpr { expression }
        | NodeData::Ellipsis {
            element: expression,
        } => one(*expression),
        NodeData::SelectorExpr(d) => {
            one(d.expression);
            one(d.name);
        }
        NodeData::IndexExpr(d) => {
            one(d.expression);
            d.indices.iter().for_each(|&i| one(i));
        }
        NodeData::SliceExpr(d) => {
            one(d.expression);
            one(d.low);
            one(d.high);
            one(d.max);
        }
        NodeData::TypeAssertExpr {
            expression,
            type_node,
        } => {
            one(*expression);
            one(*type_node);
        }
        NodeData::CallExpr(d) => {
            one(d.callee);
            d.arguments.iter().for_each(|&i| one(i));
        }
        NodeData::UnaryExpr(d) => one(d.operand),
        NodeData::BinaryExpr(d) => {
            one(d.left);
            one(d.right);
        }
        NodeData::ArrayType { length, element } => {
            one(*length);
            one(*element);
        }
        NodeData::MapType { key, value } => {
            one(*key);
            one(*value);
        }
        NodeData::ChanType(d) => one(d.element),
        NodeData::FuncType(d) => d.params.iter().chain(d.results.iter()).for_each(|&i| one(i)),
        NodeData::StructType { fields } => fields.iter().for_each(|&i| one(i)),
        NodeData::InterfaceType { methods } => methods.iter().for_each(|&i| one(i)),
        NodeData::Bad | NodeData::EmptyStmt | NodeData::Ident(_) | NodeData::BasicLit(_) => {}
    }
}

/// Call `f` on every direct child of `index`, in source order.
pub fn for_each_child(arena: &NodeArena, index: NodeIndex, f: &mut dyn FnMut(NodeIndex)) {
    if let Some(node) = arena.get(index) {
        for_each_child_of(&node.data, f);
    }
}

/// Direct children of `index`, in source order.
pub fn children(arena: &NodeArena, index: NodeIndex) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    for_each_child(arena, index, &mut |child| out.push(child));
    out
}

/// Preorder traversal. `f` returns false to skip the node's children.
pub fn walk_preorder(
    arena: &NodeArena,
    root: NodeIndex,
    f: &mut dyn FnMut(NodeIndex, &NodeData) -> bool,
) {
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(node) = arena.get(index) else {
            continue;
        };
        if !f(index, &node.data) {
            continue;
        }
        let start = stack.len();
        for_each_child_of(&node.data, &mut |child| stack.push(child));
        stack[start..].reverse();
    }
}

fn map_list(list: &NodeList, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) -> NodeList {
    list.iter().map(|&i| map_one(i, f)).collect()
}

fn map_one(index: NodeIndex, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) -> NodeIndex {
    if index.is_none() { index } else { f(index) }
}

/// Clone `data`, replacing every child index with `f(child)`.
///
/// Children are visited in the same order as `for_each_child_of`.
pub fn map_children(data: &NodeData, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) -> NodeData {
    match data {
        NodeData::SourceFile(d) => NodeData::SourceFile(SourceFileData {
            file_name: d.file_name.clone(),
            text: d.text.clone(),
            package_name: map_one(d.package_name, f),
            imports: map_list(&d.imports, f),
            decls: map_list(&d.decls, f),
            comments: d.comments.clone(),
        }),
        NodeData::GenDecl(d) => NodeData::GenDecl(GenDeclData {
            keyword: d.keyword,
            grouped: d.grouped,
            specs: map_list(&d.specs, f),
        }),
        NodeData::ImportSpec(d) => {
            let mut copy = d.clone();
            copy.name = map_one(d.name, f);
            NodeData::ImportSpec(copy)
        }
        NodeData::ValueSpec(d) => NodeData::ValueSpec(ValueSpecData {
            names: map_list(&d.names, f),
            type_node: map_one(d.type_node, f),
            values: map_list(&d.values, f),
        }),
        NodeData::TypeSpec(d) => NodeData::TypeSpec(TypeSpecData {
            name: map_one(d.name, f),
            is_alias: d.is_alias,
            type_node: map_one(d.type_node, f),
        }),
        NodeData::FuncDecl(d) => NodeData::FuncDecl(FuncDeclData {
            receiver: map_list(&d.receiver, f),
            name: map_one(d.name, f),
            signature: map_one(d.signature, f),
            body: map_one(d.body, f),
        }),
        NodeData::Field(d) => NodeData::Field(FieldData {
            names: map_list(&d.names, f),
            type_node: map_one(d.type_node, f),
            tag: map_one(d.tag, f),
        }),
        NodeData::Block(d) => NodeData::Block(BlockData {
            statements: map_list(&d.statements, f),
        }),
        NodeData::ExprStmt { expression } => NodeData::ExprStmt {
            expression: map_one(*expression, f),
        },
        NodeData::AssignStmt(d) => NodeData::AssignStmt(AssignData {
            lhs: map_list(&d.lhs, f),
            op: d.op,
            rhs: map_list(&d.rhs, f),
        }),
        NodeData::IncDecStmt {
            expression,
            operator,
        } => NodeData::IncDecStmt {
            expression: map_one(*expression, f),
            operator: *operator,
        },
        NodeData::SendStmt { channel, value } => NodeData::SendStmt {
            channel: map_one(*channel, f),
            value: map_one(*value, f),
        },
        NodeData::GoStmt { call } => NodeData::GoStmt {
            call: map_one(*call, f),
        },
        NodeData::DeferStmt { call } => NodeData::DeferStmt {
            call: map_one(*call, f),
        },
        NodeData::ReturnStmt { results } => NodeData::ReturnStmt {
            results: map_list(results, f),
        },
        NodeData::BranchStmt { keyword, label } => NodeData::BranchStmt {
            keyword: *keyword,
            label: map_one(*label, f),
        },
        NodeData::LabeledStmt { label, statement } => NodeData::LabeledStmt {
            label: map_one(*label, f),
            statement: map_one(*statement, f),
        },
        NodeData::DeclStmt { declaration } => NodeData::DeclStmt {
            declaration: map_one(*declaration, f),
        },
        NodeData::IfStmt(d) => NodeData::IfStmt(IfData {
            init: map_one(d.init, f),
            condition: map_one(d.condition, f),
            then_block: map_one(d.then_block, f),
            else_branch: map_one(d.else_branch, f),
        }),
        NodeData::ForStmt(d) => NodeData::ForStmt(ForData {
            init: map_one(d.init, f),
            condition: map_one(d.condition, f),
            post: map_one(d.post, f),
            body: map_one(d.body, f),
        }),
        NodeData::RangeStmt(d) => NodeData::RangeStmt(RangeData {
            key: map_one(d.key, f),
            value: map_one(d.value, f),
            op: d.op,
            expression: map_one(d.expression, f),
            body: map_one(d.body, f),
        }),
        NodeData::SwitchStmt(d) => NodeData::SwitchStmt(map_switch(d, f)),
        NodeData::TypeSwitchStmt(d) => NodeData::TypeSwitchStmt(map_switch(d, f)),
        NodeData::CaseClause(d) => NodeData::CaseClause(CaseClauseData {
            list: map_list(&d.list, f),
            is_default: d.is_default,
            body: map_list(&d.body, f),
        }),
        NodeData::SelectStmt { clauses } => NodeData::SelectStmt {
            clauses: map_list(clauses, f),
        },
        NodeData::CommClause(d) => NodeData::CommClause(CommClauseData {
            comm: map_one(d.comm, f),
            body: map_list(&d.body, f),
        }),
        NodeData::CompositeLit(d) => NodeData::CompositeLit(CompositeLitData {
            type_node: map_one(d.type_node, f),
            elements: map_list(&d.elements, f),
        }),
        NodeData::KeyValueExpr { key, value } => NodeData::KeyValueExpr {
            key: map_one(*key, f),
            value: map_one(*value, f),
        },
        NodeData::FuncLit { signature, body } => NodeData::FuncLit {
            signature: map_one(*signature, f),
            body: map_one(*body, f),
        },
        NodeData::ParenExpr { expression } => NodeData::ParenExpr {
            expression: map_one(*expression, f),
        },
        NodeData::StarExpr { expression } => NodeData::StarExpr {
            expression: map_one(*expression, f),
        },
        NodeData::Ellipsis { element } => NodeData::Ellipsis {
            element: map_one(*element, f),
        },
        NodeData::SelectorExpr(d) => NodeData::SelectorExpr(SelectorData {
            expression: map_one(d.expression, f),
            name: map_one(d.name, f),
        }),
        NodeData::IndexExpr(d) => NodeData::IndexExpr(IndexData {
            expression: map_one(d.expression, f),
            indices: map_list(&d.indices, f),
        }),
        NodeData::SliceExpr(d) => NodeData::SliceExpr(SliceData {
            expression: map_one(d.expression, f),
            low: map_one(d.low, f),
            high: map_one(d.high, f),
            max: map_one(d.max, f),
            three_index: d.three_index,
        }),
        NodeData::TypeAssertExpr {
            expression,
            type_node,
        } => NodeData::TypeAssertExpr {
            expression: map_one(*expression, f),
            type_node: map_one(*type_node, f),
        },
        NodeData::CallExpr(d) => NodeData::CallExpr(CallData {
            callee: map_one(d.callee, f),
            arguments: map_list(&d.arguments, f),
            has_ellipsis: d.has_ellipsis,
        }),
        NodeData::UnaryExpr(d) => NodeData::UnaryExpr(UnaryData {
            operator: d.operator,
            operand: map_one(d.operand, f),
        }),
        NodeData::BinaryExpr(d) => NodeData::BinaryExpr(BinaryData {
            left: map_one(d.left, f),
            operator: d.operator,
            right: map_one(d.right, f),
        }),
        NodeData::ArrayType { length, element } => NodeData::ArrayType {
            length: map_one(*length, f),
            element: map_one(*element, f),
        },
        NodeData::MapType { key, value } => NodeData::MapType {
            key: map_one(*key, f),
            value: map_one(*value, f),
        },
        NodeData::ChanType(d) => NodeData::ChanType(ChanTypeData {
            dir: d.dir,
            element: map_one(d.element, f),
        }),
        NodeData::FuncType(d) => NodeData::FuncType(FuncTypeData {
            params: map_list(&d.params, f),
            results: map_list(&d.results, f),
        }),
        NodeData::StructType { fields } => NodeData::StructType {
            fields: map_list(fields, f),
        },
        NodeData::InterfaceType { methods } => NodeData::InterfaceType {
            methods: map_list(methods, f),
        },
        NodeData::Bad | NodeData::EmptyStmt | NodeData::Ident(_) | NodeData::BasicLit(_) => {
            data.clone()
        }
    }
}

fn map_switch(d: &SwitchData, f: &mut dyn FnMut(NodeIndex) -> NodeIndex) -> SwitchData {
    SwitchData {
        init: map_one(d.init, f),
        tag: map_one(d.tag, f),
        clauses: map_list(&d.clauses, f),
    }
}
