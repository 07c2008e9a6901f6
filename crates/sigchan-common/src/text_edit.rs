//! Applying text edits to source text.

use thiserror::Error;

use crate::diagnostics::TextEdit;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit {start}..{end} is out of bounds for a source of {len} bytes")]
    OutOfBounds { start: u32, end: u32, len: usize },
    #[error("edit {start}..{end} is not on a character boundary")]
    NotCharBoundary { start: u32, end: u32 },
    #[error("edits {first_start}..{first_end} and {second_start}..{second_end} overlap")]
    Overlap {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },
}

/// Apply a set of edits to `source`.
///
/// Edits may be given in any order. Identical edits are applied once, since
/// several diagnostics can propose the same fix for one site. Any other
/// overlap is rejected.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.start, e.end));
    sorted.dedup();

    for edit in &sorted {
        if edit.start > edit.end || edit.end as usize > source.len() {
            return Err(EditError::OutOfBounds {
                start: edit.start,
                end: edit.end,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(edit.start as usize)
            || !source.is_char_boundary(edit.end as usize)
        {
            return Err(EditError::NotCharBoundary {
                start: edit.start,
                end: edit.end,
            });
        }
    }
    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if second.start < first.end || (second.start == first.start && first.start == first.end) {
            return Err(EditError::Overlap {
                first_start: first.start,
                first_end: first.end,
                second_start: second.start,
                second_end: second.end,
            });
        }
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in sorted {
        out.push_str(&source[cursor..edit.start as usize]);
        out.push_str(&edit.new_text);
        cursor = edit.end as usize;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn applies_edits_in_any_order() {
        let source = "a := make(chan T)\nb := make(chan T)\n";
        let first = source.find("make").unwrap() as u32;
        let second = source.rfind("make").unwrap() as u32;
        let edits = vec![
            TextEdit::replace(Span::new(second, second + 12), "make(chan T, 1)"),
            TextEdit::replace(Span::new(first, first + 12), "make(chan T, 1)"),
        ];
        let fixed = apply_text_edits(source, &edits).unwrap();
        assert_eq!(fixed, "a := make(chan T, 1)\nb := make(chan T, 1)\n");
    }

    #[test]
    fn duplicate_edits_apply_once() {
        let edit = TextEdit::replace(Span::new(0, 1), "xy");
        let fixed = apply_text_edits("a+b", &[edit.clone(), edit]).unwrap();
        assert_eq!(fixed, "xy+b");
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let edits = vec![
            TextEdit::replace(Span::new(0, 3), "x"),
            TextEdit::replace(Span::new(2, 4), "y"),
        ];
        assert!(matches!(
            apply_text_edits("abcdef", &edits),
            Err(EditError::Overlap { .. })
        ));
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let edits = vec![TextEdit::replace(Span::new(2, 40), "x")];
        assert_eq!(
            apply_text_edits("abc", &edits),
            Err(EditError::OutOfBounds {
                start: 2,
                end: 40,
                len: 3
            })
        );
    }
}
