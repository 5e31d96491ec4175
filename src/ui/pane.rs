//! Selection list shared by the three navigator columns.

/// Ordered items with a wrapping cursor.
///
/// The focus flag only affects how the pane is drawn; callers decide which
/// pane receives movement.
#[derive(Debug, Clone)]
pub struct Pane<T> {
    items: Vec<T>,
    cursor: usize,
    focused: bool,
}

impl<T> Default for Pane<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            focused: false,
        }
    }
}

impl<T> Pane<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Replaces every item and puts the cursor back on the first one.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor = 0;
    }

    pub fn advance(&mut self) {
        if !self.items.is_empty() {
            self.cursor = (self.cursor + 1) % self.items.len();
        }
    }

    pub fn retreat(&mut self) {
        if !self.items.is_empty() {
            self.cursor = if self.cursor > 0 {
                self.cursor - 1
            } else {
                self.items.len() - 1
            };
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(len: usize) -> Pane<usize> {
        Pane::new((0..len).collect())
    }

    #[test]
    fn advance_then_retreat_restores_every_cursor() {
        for len in 1..6 {
            let mut p = pane(len);
            for start in 0..len {
                while p.cursor() != start {
                    p.advance();
                }
                p.advance();
                p.retreat();
                assert_eq!(p.cursor(), start, "len {} start {}", len, start);
            }
        }
    }

    #[test]
    fn cursor_wraps_at_both_ends() {
        let mut p = pane(3);
        p.retreat();
        assert_eq!(p.cursor(), 2);
        assert_eq!(p.selected(), Some(&2));
        p.advance();
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn empty_pane_has_no_selection() {
        let mut p: Pane<String> = Pane::default();
        p.advance();
        p.retreat();
        assert_eq!(p.cursor(), 0);
        assert!(p.selected().is_none());
    }

    #[test]
    fn set_items_resets_cursor() {
        let mut p = pane(4);
        p.advance();
        p.advance();
        p.set_items(vec![7, 8]);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.selected(), Some(&7));
    }

    #[test]
    fn focus_flag_toggles() {
        let mut p = pane(1);
        assert!(!p.is_focused());
        p.focus();
        assert!(p.is_focused());
        p.blur();
        assert!(!p.is_focused());
    }
}
