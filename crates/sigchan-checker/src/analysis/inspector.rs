//! Preorder index of every node in a package, shared by the analyzers that
//! require `inspect`.

use sigchan_parser::syntax::walk_preorder;
use sigchan_parser::{NodeArena, NodeIndex, NodeKind};
use tracing::trace;

use crate::analysis::analyzer::{Analyzer, AnalyzerOutput};
use crate::analysis::pass::Pass;
use crate::error::AnalysisError;

pub static INSPECT: Analyzer = Analyzer {
    name: "inspect",
    doc: "build a preorder index of the package's syntax trees for other analyzers",
    requires: &[],
    run: run_inspect,
};

fn run_inspect(pass: &mut Pass<'_>) -> Result<AnalyzerOutput, AnalysisError> {
    let inspector = Inspector::new(pass.arena, pass.files);
    Ok(Some(Box::new(inspector)))
}

/// Bit set of node kinds. `NodeKind` has fewer than 64 variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KindMask(u64);

impl KindMask {
    fn of(kinds: &[NodeKind]) -> Self {
        // An empty filter selects every node.
        if kinds.is_empty() {
            return KindMask(u64::MAX);
        }
        KindMask(kinds.iter().fold(0, |mask, &kind| mask | bit(kind)))
    }

    fn contains(self, kind: NodeKind) -> bool {
        self.0 & bit(kind) != 0
    }
}

fn bit(kind: NodeKind) -> u64 {
    1u64 << (kind as u64)
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    node: NodeIndex,
    kind: NodeKind,
}

/// Flat preorder listing of the nodes reachable from a package's files.
///
/// Only nodes reachable from a `SourceFile` are listed; scratch nodes in the
/// arena are never visited.
#[derive(Debug, Default)]
pub struct Inspector {
    entries: Vec<Entry>,
    present: KindMask,
}

impl Inspector {
    pub fn new(arena: &NodeArena, files: &[NodeIndex]) -> Self {
        let mut entries = Vec::with_capacity(arena.len());
        let mut present = KindMask::default();
        for &file in files {
            walk_preorder(arena, file, &mut |node, data| {
                let kind = data.kind();
                present.0 |= bit(kind);
                entries.push(Entry { node, kind });
                true
            });
        }
        trace!(
            nodes = entries.len(),
            files = files.len(),
            "built inspector"
        );
        Inspector { entries, present }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call `f` for every node whose kind is in `kinds`, in depth-first
    /// source order. An empty `kinds` visits every node.
    pub fn preorder(&self, kinds: &[NodeKind], mut f: impl FnMut(NodeIndex)) {
        let mask = KindMask::of(kinds);
        if self.present.0 & mask.0 == 0 {
            return;
        }
        for entry in &self.entries {
            if mask.contains(entry.kind) {
                f(entry.node);
            }
        }
    }

    /// Nodes of one kind, in preorder.
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = NodeIndex> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == kind)
            .map(|entry| entry.node)
    }
}
