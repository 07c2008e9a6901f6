//! Predeclared identifiers of the universe block.

use crate::symbols::SymbolKind;

const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const CONSTANTS: &[&str] = &["true", "false", "iota"];

pub(crate) fn predeclared() -> impl Iterator<Item = (&'static str, SymbolKind)> {
    BUILTIN_FUNCS
        .iter()
        .map(|&n| (n, SymbolKind::Builtin))
        .chain(
            PREDECLARED_TYPES
                .iter()
                .map(|&n| (n, SymbolKind::PredeclaredType)),
        )
        .chain(CONSTANTS.iter().map(|&n| (n, SymbolKind::Constant)))
        .chain(std::iter::once(("nil", SymbolKind::Nil)))
}
