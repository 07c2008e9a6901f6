//! Builds the replacement text for an unbuffered channel creation.

use sigchan_common::{SuggestedFix, TextEdit};
use sigchan_emitter::{PrintError, print_node};
use sigchan_parser::{NodeArena, NodeData, NodeIndex, NodeKind};
use sigchan_scanner::SyntaxKind;

use crate::sigchanyzer::FIX_MESSAGE;

/// Render `creation` with `capacity` appended to its arguments.
///
/// The call is copied into a scratch arena first; `arena` is not modified.
pub fn buffered_creation(
    arena: &NodeArena,
    creation: NodeIndex,
    capacity: u64,
) -> Result<String, PrintError> {
    let (mut scratch, root) = arena
        .detach(creation)
        .ok_or(PrintError::MissingNode { index: creation.0 })?;
    let end = scratch.get(root).map_or(0, |node| node.end);
    let literal = scratch.add_literal(end, end, SyntaxKind::IntLiteral, capacity.to_string());

    match scratch.get_mut(root).map(|node| &mut node.data) {
        Some(NodeData::CallExpr(call)) => call.arguments.push(literal),
        other => {
            return Err(PrintError::Unsupported {
                kind: other.map_or(NodeKind::Bad, |data| data.kind()),
            });
        }
    }
    print_node(&scratch, root)
}

/// A fix replacing the whole creation expression with its buffered form.
pub fn buffer_channel_fix(
    arena: &NodeArena,
    creation: NodeIndex,
    capacity: u64,
) -> Result<SuggestedFix, PrintError> {
    let span = arena
        .span(creation)
        .ok_or(PrintError::MissingNode { index: creation.0 })?;
    let text = buffered_creation(arena, creation, capacity)?;
    Ok(SuggestedFix {
        message: FIX_MESSAGE.to_string(),
        text_edits: vec![TextEdit::replace(span, text)],
    })
}
