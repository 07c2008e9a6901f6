//! Syntactic and name-based tests on call expressions.

use sigchan_binder::{Resolver, TypeRef};
use sigchan_parser::{NodeArena, NodeIndex, NodeKind};
use sigchan_scanner::SyntaxKind;

use crate::config::RuleConfig;
use crate::sigchanyzer::origin::{Origin, resolve_origin};

pub struct CallClassifier<'a> {
    arena: &'a NodeArena,
    resolver: &'a dyn Resolver,
    rule: &'a RuleConfig,
}

impl<'a> CallClassifier<'a> {
    pub fn new(arena: &'a NodeArena, resolver: &'a dyn Resolver, rule: &'a RuleConfig) -> Self {
        CallClassifier {
            arena,
            resolver,
            rule,
        }
    }

    /// `signal.Notify(...)`, through any import name, or a call of a
    /// variable initialized with `signal.Notify`. A variable initialized
    /// from another variable is not followed.
    pub fn is_registration_call(&self, call: NodeIndex) -> bool {
        let Some(data) = self.arena.get_call(call) else {
            return false;
        };
        match self.arena.kind(data.callee) {
            Some(NodeKind::SelectorExpr) => self.names_registration(data.callee),
            Some(NodeKind::Ident) => match resolve_origin(self.arena, self.resolver, data.callee) {
                Origin::Value(value) => {
                    self.arena.kind(value) == Some(NodeKind::SelectorExpr)
                        && self.names_registration(value)
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn names_registration(&self, selector: NodeIndex) -> bool {
        let wanted = &self.rule.registration;
        self.resolver
            .qualified_name_of(selector)
            .is_some_and(|name| name.is(&wanted.package, &wanted.name))
    }

    /// A call of the universe `make`. A local declaration named `make`
    /// shadows the builtin and does not count.
    pub fn is_builtin_make(&self, call: NodeIndex) -> bool {
        let Some(data) = self.arena.get_call(call) else {
            return false;
        };
        self.arena.kind(data.callee) == Some(NodeKind::Ident)
            && self.resolver.is_builtin(data.callee, "make")
    }

    /// `make(chan os.Signal ...)`, in any direction, with the element type
    /// compared by package path and name.
    pub fn is_channel_creation(&self, call: NodeIndex) -> bool {
        if !self.is_builtin_make(call) {
            return false;
        }
        let Some(&type_arg) = self
            .arena
            .get_call(call)
            .and_then(|data| data.arguments.first())
        else {
            return false;
        };
        let signal = &self.rule.signal_type;
        match self.resolver.resolve_type(type_arg) {
            TypeRef::Chan { element, .. } => element.is_named(&signal.package, &signal.name),
            _ => false,
        }
    }

    /// A channel creation whose capacity is an integer literal of at least 1.
    pub fn is_safe_channel_creation(&self, call: NodeIndex) -> bool {
        if !self.is_channel_creation(call) {
            return false;
        }
        let Some(data) = self.arena.get_call(call) else {
            return false;
        };
        match data.arguments.as_slice() {
            &[_, capacity] => self.capacity_literal(capacity).is_some_and(|n| n >= 1),
            _ => false,
        }
    }

    pub fn argument_count(&self, call: NodeIndex) -> Option<usize> {
        self.arena.get_call(call).map(|data| data.arguments.len())
    }

    fn capacity_literal(&self, expr: NodeIndex) -> Option<u64> {
        let literal = self.arena.get_literal(expr)?;
        if literal.kind != SyntaxKind::IntLiteral {
            return None;
        }
        parse_int_literal(&literal.value)
    }
}

/// Value of a Go integer literal: decimal, `0x` hex, `0o` or leading-zero
/// octal, `0b` binary, with `_` digit separators. `None` on overflow.
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&text[2..], 16),
        [b'0', b'o' | b'O', ..] => (&text[2..], 8),
        [b'0', b'b' | b'B', ..] => (&text[2..], 2),
        [b'0', _, ..] => (&text[1..], 8),
        _ => (text, 10),
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(&digits, radix).ok()
}
