//! Symbols and their storage.

use serde::Serialize;
use sigchan_parser::NodeIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SymbolKind {
    /// Universe function: `make`, `len`, `new`, ...
    Builtin,
    /// Universe type: `int`, `error`, `any`, ...
    PredeclaredType,
    /// `true`, `false`, `iota` and declared constants.
    Constant,
    Nil,
    Var,
    /// Parameter, result or receiver.
    Param,
    Func,
    TypeName,
    /// Imported package name.
    Package,
}

#[derive(Clone, Debug, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Node that introduces the symbol: `AssignStmt`, `ValueSpec`, `Field`,
    /// `RangeStmt`, `FuncDecl`, `TypeSpec` or `ImportSpec`. NONE in the
    /// universe.
    pub declaration: NodeIndex,
    /// The declaring identifier, NONE in the universe.
    pub name_node: NodeIndex,
    /// Import path, for `SymbolKind::Package` only.
    pub import_path: Option<String>,
}

impl Symbol {
    pub fn is_universe(&self) -> bool {
        self.declaration.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }
}
