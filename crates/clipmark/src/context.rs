//! Conversion context threaded through the recursive walk.
//!
//! A [`Context`] is never mutated in place. Entering a list, a table cell or
//! preformatted text derives a new value, so a sibling subtree can never see
//! state produced by another sibling.

/// Kind of list a frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Largest ordinal a Markdown list marker can carry (nine digits)
pub const MAX_ORDINAL: u32 = 999_999_999;

/// Per-nesting-level list bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    pub ordinal: u32,
}

impl ListFrame {
    /// Frame for an ordered list counting from `start`, clamped to the
    /// ordinals a list marker can carry
    pub fn ordered(start: i64) -> Self {
        Self {
            kind: ListKind::Ordered,
            ordinal: start.clamp(0, i64::from(MAX_ORDINAL)) as u32,
        }
    }

    /// Frame for an unordered list
    pub fn unordered() -> Self {
        Self {
            kind: ListKind::Unordered,
            ordinal: 1,
        }
    }

    /// Item marker including the trailing space
    pub fn marker(&self, bullet: char) -> String {
        match self.kind {
            ListKind::Ordered => format!("{}. ", self.ordinal),
            ListKind::Unordered => format!("{} ", bullet),
        }
    }

    /// The frame to use for the next sibling item
    #[must_use]
    pub fn advance(self) -> Self {
        match self.kind {
            ListKind::Ordered => Self {
                ordinal: self.ordinal.saturating_add(1).min(MAX_ORDINAL),
                ..self
            },
            ListKind::Unordered => self,
        }
    }
}

/// Immutable conversion state for one point of the walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    list_stack: Vec<ListFrame>,
    in_preformatted: bool,
    in_table_cell: bool,
}

impl Context {
    /// Root context for a fresh conversion
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context one list level deeper
    #[must_use]
    pub fn enter_list(&self, frame: ListFrame) -> Self {
        let mut list_stack = self.list_stack.clone();
        list_stack.push(frame);
        Self {
            list_stack,
            ..self.clone()
        }
    }

    /// Derive a context for preformatted text
    #[must_use]
    pub fn preformatted(&self) -> Self {
        Self {
            in_preformatted: true,
            ..self.clone()
        }
    }

    /// Derive a context for the content of a table cell
    #[must_use]
    pub fn table_cell(&self) -> Self {
        Self {
            in_table_cell: true,
            ..self.clone()
        }
    }

    /// Number of enclosing lists
    pub fn list_depth(&self) -> usize {
        self.list_stack.len()
    }

    /// Innermost list frame, if any
    pub fn current_frame(&self) -> Option<&ListFrame> {
        self.list_stack.last()
    }

    pub fn list_stack(&self) -> &[ListFrame] {
        &self.list_stack
    }

    pub fn in_preformatted(&self) -> bool {
        self.in_preformatted
    }

    pub fn in_table_cell(&self) -> bool {
        self.in_table_cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_list_does_not_touch_parent() {
        let root = Context::new();
        let nested = root.enter_list(ListFrame::ordered(1)).enter_list(ListFrame::unordered());

        assert_eq!(root.list_depth(), 0);
        assert_eq!(nested.list_depth(), 2);
        assert_eq!(nested.current_frame(), Some(&ListFrame::unordered()));
    }

    #[test]
    fn test_flags_are_independent() {
        let root = Context::new();
        let cell = root.table_cell();
        let pre = cell.preformatted();

        assert!(!root.in_table_cell());
        assert!(cell.in_table_cell() && !cell.in_preformatted());
        assert!(pre.in_table_cell() && pre.in_preformatted());
    }

    #[test]
    fn test_frame_advance() {
        let frame = ListFrame::ordered(1);
        assert_eq!(frame.marker('-'), "1. ");
        let next = frame.advance();
        assert_eq!(next.marker('-'), "2. ");
        assert_eq!(frame.ordinal, 1);

        let bullet = ListFrame::unordered();
        assert_eq!(bullet.advance().marker('-'), "- ");
    }

    #[test]
    fn test_ordinal_bounds() {
        assert_eq!(ListFrame::ordered(-2).ordinal, 0);
        assert_eq!(ListFrame::ordered(0).advance().ordinal, 1);

        let last = ListFrame::ordered(i64::from(u32::MAX));
        assert_eq!(last.ordinal, MAX_ORDINAL);
        assert_eq!(last.advance().ordinal, MAX_ORDINAL);
        assert_eq!(ListFrame::ordered(MAX_ORDINAL as i64 - 1).advance().ordinal, MAX_ORDINAL);
    }
}
