//! Tests for expression and type parsing.
use crate::parser::node::ChanDir;
use crate::parser::{NodeData, NodeIndex, NodeKind, ParserState};
use crate::syntax::walk_preorder;
use sigchan_scanner::SyntaxKind;

/// Parse `expr` as the right-hand side of `x := expr` inside a function.
fn parse_expression(expr: &str) -> (ParserState, NodeIndex) {
    let source = format!("package a\nfunc f() {{\n\tx := {expr}\n}}\n");
    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    let mut rhs = NodeIndex::NONE;
    walk_preorder(parser.get_arena(), root, &mut |_, data| {
        if let NodeData::AssignStmt(assign) = data
            && rhs.is_none()
        {
            rhs = assign.rhs[0];
        }
        true
    });
    (parser, rhs)
}

fn data(parser: &ParserState, index: NodeIndex) -> &NodeData {
    &parser.get_arena().get(index).unwrap().data
}

#[test]
fn parse_make_chan_call() {
    let (parser, rhs) = parse_expression("make(chan os.Signal, 1)");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let call = arena.get_call(rhs).unwrap();
    assert_eq!(arena.identifier_text(call.callee), Some("make"));
    assert_eq!(call.arguments.len(), 2);

    let chan = arena.get_chan_type(call.arguments[0]).unwrap();
    assert_eq!(chan.dir, ChanDir::Both);
    let sel = arena.get_selector(chan.element).unwrap();
    assert_eq!(arena.identifier_text(sel.expression), Some("os"));
    assert_eq!(arena.identifier_text(sel.name), Some("Signal"));

    let lit = arena.get_literal(call.arguments[1]).unwrap();
    assert_eq!(lit.kind, SyntaxKind::IntLiteral);
    assert_eq!(lit.value, "1");
}

#[test]
fn parse_directional_channel_types() {
    let (parser, rhs) = parse_expression("make(<-chan int)");
    let arena = parser.get_arena();
    let call = arena.get_call(rhs).unwrap();
    assert_eq!(
        arena.get_chan_type(call.arguments[0]).unwrap().dir,
        ChanDir::Recv
    );

    let (parser, rhs) = parse_expression("make(chan<- int)");
    let arena = parser.get_arena();
    let call = arena.get_call(rhs).unwrap();
    assert_eq!(
        arena.get_chan_type(call.arguments[0]).unwrap().dir,
        ChanDir::Send
    );
}

#[test]
fn parse_binary_precedence() {
    let (parser, rhs) = parse_expression("a + b*c == d || e");
    let NodeData::BinaryExpr(or) = data(&parser, rhs) else {
        panic!("expected binary expression");
    };
    assert_eq!(or.operator, SyntaxKind::BarBarToken);
    let NodeData::BinaryExpr(eq) = data(&parser, or.left) else {
        panic!("expected binary expression");
    };
    assert_eq!(eq.operator, SyntaxKind::EqualsEqualsToken);
    let NodeData::BinaryExpr(add) = data(&parser, eq.left) else {
        panic!("expected binary expression");
    };
    assert_eq!(add.operator, SyntaxKind::PlusToken);
    assert_eq!(
        parser.get_arena().kind(add.right),
        Some(NodeKind::BinaryExpr)
    );
}

#[test]
fn parse_receive_and_unary() {
    let (parser, rhs) = parse_expression("<-c");
    let NodeData::UnaryExpr(unary) = data(&parser, rhs) else {
        panic!("expected unary expression");
    };
    assert_eq!(unary.operator, SyntaxKind::ArrowToken);

    let (parser, rhs) = parse_expression("-*p");
    let NodeData::UnaryExpr(neg) = data(&parser, rhs) else {
        panic!("expected unary expression");
    };
    assert_eq!(
        parser.get_arena().kind(neg.operand),
        Some(NodeKind::StarExpr)
    );
}

#[test]
fn parse_composite_literals() {
    let (parser, rhs) = parse_expression("[]T{{1, 2}, {3, 4}}");
    assert!(parser.get_diagnostics().is_empty());
    let NodeData::CompositeLit(lit) = data(&parser, rhs) else {
        panic!("expected composite literal");
    };
    assert_eq!(lit.elements.len(), 2);
    assert_eq!(
        parser.get_arena().kind(lit.type_node),
        Some(NodeKind::ArrayType)
    );

    let (parser, rhs) = parse_expression("pkg.Config{Name: \"x\", Size: 1,}");
    assert!(parser.get_diagnostics().is_empty());
    let NodeData::CompositeLit(lit) = data(&parser, rhs) else {
        panic!("expected composite literal");
    };
    assert_eq!(lit.elements.len(), 2);
    assert_eq!(
        parser.get_arena().kind(lit.elements[0]),
        Some(NodeKind::KeyValueExpr)
    );
}

#[test]
fn parse_composite_literal_not_allowed_in_if_header() {
    let source = "package a\nfunc f() {\n\tif x == T {\n\t}\n}\n";
    let mut parser = ParserState::new("test.go".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "{:?}",
        parser.get_diagnostics()
    );
    let mut composite = 0;
    walk_preorder(parser.get_arena(), root, &mut |_, data| {
        if matches!(data, NodeData::CompositeLit(_)) {
            composite += 1;
        }
        true
    });
    assert_eq!(composite, 0);
}

#[test]
fn parse_selectors_index_slice_and_assertion() {
    let (parser, rhs) = parse_expression("a.b[1:2].c(x...)[i].(T)");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let NodeData::TypeAssertExpr { expression, type_node } = data(&parser, rhs) else {
        panic!("expected type assertion");
    };
    assert_eq!(arena.identifier_text(*type_node), Some("T"));
    assert_eq!(arena.kind(*expression), Some(NodeKind::IndexExpr));

    let mut has_ellipsis = false;
    let mut slices = 0;
    walk_preorder(arena, rhs, &mut |_, data| {
        match data {
            NodeData::CallExpr(call) => has_ellipsis = call.has_ellipsis,
            NodeData::SliceExpr(_) => slices += 1,
            _ => {}
        }
        true
    });
    assert!(has_ellipsis);
    assert_eq!(slices, 1);
}

#[test]
fn parse_three_index_slice_requires_bounds() {
    let (parser, _rhs) = parse_expression("s[1:2:3]");
    assert!(parser.get_diagnostics().is_empty());

    let (parser, _rhs) = parse_expression("s[1::3]");
    assert!(
        parser
            .get_diagnostics()
            .iter()
            .any(|d| d.message.contains("3-index slice"))
    );
}

#[test]
fn parse_func_literal_with_results() {
    let (parser, rhs) =
        parse_expression("func(a, b int, c ...string) (n int, err error) { return }");
    assert!(
        parser.get_diagnostics().is_empty(),
        "{:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let NodeData::FuncLit { signature, body } = data(&parser, rhs) else {
        panic!("expected function literal");
    };
    assert!(body.is_some());
    let Some(NodeData::FuncType(sig)) = arena.get(*signature).map(|n| &n.data) else {
        panic!("expected function type");
    };
    // `a, b int` groups into one field.
    assert_eq!(sig.params.len(), 2);
    assert_eq!(sig.results.len(), 2);
    let Some(NodeData::Field(variadic)) = arena.get(sig.params[1]).map(|n| &n.data) else {
        panic!("expected field");
    };
    assert_eq!(arena.kind(variadic.type_node), Some(NodeKind::Ellipsis));
}

#[test]
fn parse_unnamed_parameters() {
    let (parser, rhs) = parse_expression("func(int, string) bool { return true }");
    assert!(parser.get_diagnostics().is_empty());
    let NodeData::FuncLit { signature, .. } = data(&parser, rhs) else {
        panic!("expected function literal");
    };
    let Some(NodeData::FuncType(sig)) = parser.get_arena().get(*signature).map(|n| &n.data) else {
        panic!("expected function type");
    };
    assert_eq!(sig.params.len(), 2);
    assert_eq!(sig.results.len(), 1);
}

#[test]
fn parse_mixed_named_and_unnamed_parameters_is_error() {
    let (parser, _rhs) = parse_expression("func(a int, string) {}");
    assert!(
        parser
            .get_diagnostics()
            .iter()
            .any(|d| d.message == "mixed named and unnamed parameters")
    );
}

#[test]
fn parse_missing_operand_produces_bad_node() {
    let (parser, rhs) = parse_expression("make(chan os.Signal, )");
    // Trailing comma is valid; the argument list has one entry.
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(parser.get_arena().get_call(rhs).unwrap().arguments.len(), 1);

    let (parser, rhs) = parse_expression("1 + ");
    assert!(!parser.get_diagnostics().is_empty());
    let NodeData::BinaryExpr(bin) = data(&parser, rhs) else {
        panic!("expected binary expression");
    };
    assert_eq!(parser.get_arena().kind(bin.right), Some(NodeKind::Bad));
}

#[test]
fn parse_map_struct_and_interface_types() {
    let source = r#"package a
type (
	M map[string][]chan int
	S struct {
		io.Reader
		*Base
		a, b int `json:"a"`
	}
	I interface {
		Close() error
		fmt.Stringer
		~int | ~string
	}
	Sig = os.Signal
)
"#;
    let mut parser = ParserState::new("test.go".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "{:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let mut specs = Vec::new();
    walk_preorder(arena, root, &mut |index, data| {
        if matches!(data, NodeData::TypeSpec(_)) {
            specs.push(index);
        }
        true
    });
    assert_eq!(specs.len(), 4);
    let alias = arena.get_type_spec(specs[3]).unwrap();
    assert!(alias.is_alias);
    assert_eq!(arena.kind(alias.type_node), Some(NodeKind::SelectorExpr));

    let Some(NodeData::StructType { fields }) =
        arena.get(arena.get_type_spec(specs[1]).unwrap().type_node).map(|n| &n.data)
    else {
        panic!("expected struct type");
    };
    assert_eq!(fields.len(), 3);
}
