//! Cursor over the visible listing.

use super::constants::PAGE_SIZE;

/// Common navigation operations for list-based views.
pub trait ListNavigator {
    /// Get the currently selected index.
    fn selected(&self) -> usize;

    /// Set the selected index, clamped to the list.
    fn set_selected(&mut self, index: usize);

    /// Get the maximum valid index.
    fn max_index(&self) -> usize;

    fn move_up(&mut self, amount: usize) {
        self.set_selected(self.selected().saturating_sub(amount));
    }

    fn move_down(&mut self, amount: usize) {
        self.set_selected(self.selected().saturating_add(amount));
    }

    fn page_up(&mut self) {
        self.move_up(PAGE_SIZE);
    }

    fn page_down(&mut self) {
        self.move_down(PAGE_SIZE);
    }

    fn jump_to_top(&mut self) {
        self.set_selected(0);
    }

    fn jump_to_bottom(&mut self) {
        self.set_selected(self.max_index());
    }
}

/// Selection and scroll offset of the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSelection {
    selected: usize,
    count: usize,
    offset: usize,
}

impl ListSelection {
    /// Update the item count, clamping selection if necessary.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if self.selected > self.max_index() {
            self.selected = self.max_index();
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Back to the first item, e.g. after the location changed.
    pub fn reset(&mut self, count: usize) {
        self.count = count;
        self.selected = 0;
        self.offset = 0;
    }

    /// First visible row for a viewport of `height` rows, keeping the
    /// selection in view.
    pub fn scroll_offset(&mut self, height: usize) -> usize {
        if height == 0 {
            return 0;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
        self.offset = self.offset.min(self.count.saturating_sub(height));
        self.offset
    }
}

impl ListNavigator for ListSelection {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.max_index());
    }

    fn max_index(&self) -> usize {
        self.count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(count: usize) -> ListSelection {
        let mut selection = ListSelection::default();
        selection.reset(count);
        selection
    }

    #[test]
    fn test_list_selection() {
        let mut nav = selection(10);
        assert_eq!(nav.selected(), 0);
        assert_eq!(nav.max_index(), 9);

        nav.move_down(3);
        assert_eq!(nav.selected(), 3);

        nav.move_up(1);
        assert_eq!(nav.selected(), 2);

        nav.jump_to_bottom();
        assert_eq!(nav.selected(), 9);

        nav.jump_to_top();
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut nav = selection(5);

        nav.move_up(10);
        assert_eq!(nav.selected(), 0);

        nav.page_down();
        assert_eq!(nav.selected(), 4);

        nav.set_count(2);
        assert_eq!(nav.selected(), 1);
    }

    #[test]
    fn test_empty_selection() {
        let mut nav = selection(0);
        assert_eq!(nav.max_index(), 0);
        nav.move_down(1);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut nav = selection(30);
        assert_eq!(nav.scroll_offset(10), 0);

        nav.move_down(12);
        assert_eq!(nav.scroll_offset(10), 3);

        nav.move_up(5);
        assert_eq!(nav.scroll_offset(10), 3);

        nav.jump_to_top();
        assert_eq!(nav.scroll_offset(10), 0);
    }
}
