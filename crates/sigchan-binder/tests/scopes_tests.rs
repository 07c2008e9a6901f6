//! Scope construction and identifier resolution.

use sigchan_binder::{BinderState, SymbolKind, bind_package};
use sigchan_parser::syntax::walk_preorder;
use sigchan_parser::{NodeData, NodeIndex, ParsedPackage, parse_package};

fn bind(files: &[(&str, &str)]) -> (ParsedPackage, BinderState) {
    let parsed = parse_package(
        files
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string())),
    );
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let binder = bind_package(&parsed.arena, &parsed.files);
    (parsed, binder)
}

/// Every identifier named `name`, in file order then source order.
fn idents(parsed: &ParsedPackage, name: &str) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    for &file in &parsed.files {
        walk_preorder(&parsed.arena, file, &mut |index, data| {
            if let NodeData::Ident(ident) = data
                && ident.name == name
            {
                out.push(index);
            }
            true
        });
    }
    out
}

#[test]
fn universe_contains_builtins_and_types() {
    let binder = BinderState::new();
    let universe = binder.universe_scope();
    let kind = |name: &str| {
        universe
            .get(name)
            .and_then(|id| binder.get_symbol(id))
            .map(|s| s.kind)
    };
    assert_eq!(kind("make"), Some(SymbolKind::Builtin));
    assert_eq!(kind("error"), Some(SymbolKind::PredeclaredType));
    assert_eq!(kind("iota"), Some(SymbolKind::Constant));
    assert_eq!(kind("nil"), Some(SymbolKind::Nil));
    assert_eq!(kind("Notify"), None);
}

#[test]
fn package_scope_spans_files() {
    let (parsed, binder) = bind(&[
        ("a.go", "package a\n\nfunc f() { g() }\n"),
        ("b.go", "package a\n\nfunc g() {}\n\nvar v, w = 1, 2\n\ntype T int\n"),
    ]);
    let scope = binder.package_scope();
    for name in ["f", "g", "v", "w", "T"] {
        assert!(scope.get(name).is_some(), "{name} not declared");
    }
    let uses = idents(&parsed, "g");
    assert_eq!(
        binder.get_node_symbol(uses[0]),
        binder.get_node_symbol(uses[1])
    );
}

#[test]
fn imports_are_file_scoped() {
    let (parsed, binder) = bind(&[
        ("a.go", "package a\n\nimport \"os\"\n\nvar x = os.Args\n"),
        ("b.go", "package a\n\nvar y = os.Args\n"),
    ]);
    let uses = idents(&parsed, "os");
    assert_eq!(uses.len(), 2);
    let first = binder.get_node_symbol(uses[0]).unwrap();
    assert_eq!(binder.get_symbol(first).unwrap().kind, SymbolKind::Package);
    assert!(binder.get_node_symbol(uses[1]).is_none());
    assert_eq!(binder.unresolved_count(), 1);
}

#[test]
fn short_variable_declaration_is_visible_after_its_statement() {
    let (parsed, binder) = bind(&[(
        "a.go",
        "package a\n\nvar c = 0\n\nfunc f() {\n\tc := c + 1\n\t_ = c\n}\n",
    )]);
    let uses = idents(&parsed, "c");
    // [package c, local c, rhs c, use c]
    assert_eq!(uses.len(), 4);
    let package_c = binder.get_node_symbol(uses[0]).unwrap();
    let local_c = binder.get_node_symbol(uses[1]).unwrap();
    assert_ne!(package_c, local_c);
    assert_eq!(binder.get_node_symbol(uses[2]), Some(package_c));
    assert_eq!(binder.get_node_symbol(uses[3]), Some(local_c));
}

#[test]
fn redeclaration_in_same_scope_reuses_symbol() {
    let (parsed, binder) = bind(&[(
        "a.go",
        "package a\n\nfunc f() {\n\terr := g()\n\tn, err := h()\n\t_, _ = n, err\n}\n",
    )]);
    let uses = idents(&parsed, "err");
    let first = binder.get_node_symbol(uses[0]);
    assert!(first.is_some());
    assert!(uses.iter().all(|&u| binder.get_node_symbol(u) == first));
}

#[test]
fn block_scopes_shadow_and_end() {
    let source = r#"package a

func f(x int) {
	if x := 2; x > 1 {
		_ = x
	}
	_ = x
}
"#;
    let (parsed, binder) = bind(&[("a.go", source)]);
    let uses = idents(&parsed, "x");
    // [param, if-init, cond, body use, trailing use]
    assert_eq!(uses.len(), 5);
    let param = binder.get_node_symbol(uses[0]).unwrap();
    let inner = binder.get_node_symbol(uses[1]).unwrap();
    assert_eq!(binder.get_symbol(param).unwrap().kind, SymbolKind::Param);
    assert_eq!(binder.get_node_symbol(uses[2]), Some(inner));
    assert_eq!(binder.get_node_symbol(uses[3]), Some(inner));
    assert_eq!(binder.get_node_symbol(uses[4]), Some(param));
}

#[test]
fn user_declaration_shadows_builtin() {
    let (parsed, binder) = bind(&[(
        "a.go",
        "package a\n\nfunc make(n int) int { return n }\n\nvar x = make(1)\n",
    )]);
    let uses = idents(&parsed, "make");
    let symbol = binder.get_node_symbol(uses[1]).unwrap();
    assert_eq!(binder.get_symbol(symbol).unwrap().kind, SymbolKind::Func);
}

#[test]
fn range_and_func_literal_scopes() {
    let source = r#"package a

func f(m map[string]int) {
	for k, v := range m {
		go func(k string) {
			_ = k
		}(k)
		_ = v
	}
}
"#;
    let (parsed, binder) = bind(&[("a.go", source)]);
    let ks = idents(&parsed, "k");
    // [range k, param k, body use, argument use]
    assert_eq!(ks.len(), 4);
    let range_k = binder.get_node_symbol(ks[0]).unwrap();
    let param_k = binder.get_node_symbol(ks[1]).unwrap();
    assert_ne!(range_k, param_k);
    assert_eq!(binder.get_node_symbol(ks[2]), Some(param_k));
    assert_eq!(binder.get_node_symbol(ks[3]), Some(range_k));
}

#[test]
fn grouped_and_local_declarations() {
    let source = r#"package a

import (
	"os"
	sig "os/signal"
)

func f() {
	type T int
	var (
		x T
		y = x
	)
	const k = 1
	_, _, _ = y, k, os.Args
	_ = sig.Notify
}
"#;
    let (parsed, binder) = bind(&[("a.go", source)]);
    let kind_of = |index: NodeIndex| {
        binder
            .get_node_symbol(index)
            .and_then(|id| binder.get_symbol(id))
            .map(|s| s.kind)
    };

    let t = idents(&parsed, "T");
    assert_eq!(t.len(), 2);
    assert_eq!(kind_of(t[0]), Some(SymbolKind::TypeName));
    assert_eq!(binder.get_node_symbol(t[0]), binder.get_node_symbol(t[1]));

    let x = idents(&parsed, "x");
    assert_eq!(kind_of(x[0]), Some(SymbolKind::Var));
    assert_eq!(binder.get_node_symbol(x[0]), binder.get_node_symbol(x[1]));

    let k = idents(&parsed, "k");
    assert_eq!(kind_of(k[0]), Some(SymbolKind::Constant));
    assert_eq!(binder.get_node_symbol(k[0]), binder.get_node_symbol(k[1]));

    assert_eq!(
        kind_of(idents(&parsed, "sig")[1]),
        Some(SymbolKind::Package)
    );
    assert_eq!(kind_of(idents(&parsed, "os")[0]), Some(SymbolKind::Package));
    assert!(binder.package_scope().get("x").is_none());
}
