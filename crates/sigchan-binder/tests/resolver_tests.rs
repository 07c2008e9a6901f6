//! `Resolver` queries over bound packages.

use sigchan_binder::{BinderState, QualifiedName, Resolver, TypeRef, bind_package};
use sigchan_parser::parser::node::ChanDir;
use sigchan_parser::syntax::walk_preorder;
use sigchan_parser::{NodeData, NodeIndex, NodeKind, ParsedPackage, parse_package};

fn bind(source: &str) -> (ParsedPackage, BinderState) {
    let parsed = parse_package(vec![("a.go".to_string(), source.to_string())]);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let binder = bind_package(&parsed.arena, &parsed.files);
    (parsed, binder)
}

fn calls(parsed: &ParsedPackage) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    walk_preorder(&parsed.arena, parsed.files[0], &mut |index, data| {
        if matches!(data, NodeData::CallExpr(_)) {
            out.push(index);
        }
        true
    });
    out
}

fn make_chan_element(parsed: &ParsedPackage, call: NodeIndex) -> NodeIndex {
    let call = parsed.arena.get_call(call).unwrap();
    call.arguments[0]
}

const SIGNALS: &str = r#"package a

import (
	ao "os"
	"os/signal"
)

type Alias = ao.Signal
type Alias2 = Alias
type Defined ao.Signal

func f() {
	a := make(chan ao.Signal)
	b := make(chan Alias2)
	c := make(chan Defined)
	d := make(<-chan *ao.Signal)
	signal.Notify(a)
	_, _, _ = b, c, d
}
"#;

#[test]
fn qualified_names_follow_import_aliases() {
    let (parsed, binder) = bind(SIGNALS);
    let resolver = binder.resolver(&parsed.arena);
    let calls = calls(&parsed);
    let notify = parsed.arena.get_call(calls[4]).unwrap();
    let name = resolver.qualified_name_of(notify.callee).unwrap();
    assert!(name.is("os/signal", "Notify"));
    assert_eq!(name.to_string(), "os/signal.Notify");

    let make = parsed.arena.get_call(calls[0]).unwrap();
    assert_eq!(
        resolver.qualified_name_of(make.callee),
        Some(QualifiedName {
            package: None,
            name: "make".to_string()
        })
    );
    assert!(resolver.is_builtin(make.callee, "make"));
    assert!(!resolver.is_builtin(make.callee, "new"));
}

#[test]
fn resolve_type_follows_local_aliases_only() {
    let (parsed, binder) = bind(SIGNALS);
    let resolver = binder.resolver(&parsed.arena);
    let calls = calls(&parsed);

    let direct = resolver.resolve_type(make_chan_element(&parsed, calls[0]));
    assert!(direct.chan_element().unwrap().is_named("os", "Signal"));

    let aliased = resolver.resolve_type(make_chan_element(&parsed, calls[1]));
    assert!(aliased.chan_element().unwrap().is_named("os", "Signal"));

    let defined = resolver.resolve_type(make_chan_element(&parsed, calls[2]));
    assert!(!defined.chan_element().unwrap().is_named("os", "Signal"));

    let recv = resolver.resolve_type(make_chan_element(&parsed, calls[3]));
    let TypeRef::Chan { dir, element } = recv else {
        panic!("expected channel type");
    };
    assert_eq!(dir, ChanDir::Recv);
    assert!(matches!(*element, TypeRef::Pointer(_)));
}

#[test]
fn declaration_of_points_at_declaring_node() {
    let source = r#"package a

var g = 1

func f(p int) {
	x := p
	var y = x
	for i := range 3 {
		_ = i
	}
	_, _ = y, g
}
"#;
    let (parsed, binder) = bind(source);
    let resolver = binder.resolver(&parsed.arena);
    let mut uses = Vec::new();
    walk_preorder(&parsed.arena, parsed.files[0], &mut |index, data| {
        if let NodeData::Ident(ident) = data {
            uses.push((ident.name.clone(), index));
        }
        true
    });
    let last_use = |name: &str| {
        uses.iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|&(_, i)| i)
            .unwrap()
    };
    let kind_of = |name: &str| {
        resolver
            .declaration_of(last_use(name))
            .and_then(|d| parsed.arena.kind(d))
    };
    assert_eq!(kind_of("x"), Some(NodeKind::AssignStmt));
    assert_eq!(kind_of("y"), Some(NodeKind::ValueSpec));
    assert_eq!(kind_of("g"), Some(NodeKind::ValueSpec));
    assert_eq!(kind_of("p"), Some(NodeKind::Field));
    assert_eq!(kind_of("i"), Some(NodeKind::RangeStmt));
}

#[test]
fn dot_imports_leave_names_unresolved() {
    let (parsed, binder) = bind("package a\n\nimport . \"os\"\n\nvar s Signal\n");
    let resolver = binder.resolver(&parsed.arena);
    let mut signal = NodeIndex::NONE;
    walk_preorder(&parsed.arena, parsed.files[0], &mut |index, data| {
        if matches!(data, NodeData::Ident(i) if i.name == "Signal") {
            signal = index;
        }
        true
    });
    assert_eq!(resolver.resolve_type(signal), TypeRef::Unknown);
    assert_eq!(binder.unresolved_count(), 1);
}
