//! Selection and scrolling over the catalog
//!
//! `Navigation` is the cursor state of the menu: the selected catalog row
//! and the first row of the visible window. Every transition keeps the
//! selection inside the window.

use std::ops::Range;

use crate::catalog::Catalog;
use crate::favorites::{Favorites, FavoritesStore, Toggle};

/// Rows visible at once
pub const WINDOW_SIZE: usize = 10;

/// Directional input understood by the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Down,
    Up,
    NextFavorite,
    PreviousFavorite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    selected: usize,
    offset: usize,
    window: usize,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(WINDOW_SIZE)
    }
}

impl Navigation {
    /// Cursor on the first row. A zero window is treated as one row.
    pub fn new(window: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            window: window.max(1),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First visible row
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Catalog rows currently on screen
    pub fn visible(&self, len: usize) -> Range<usize> {
        self.offset.min(len)..(self.offset + self.window).min(len)
    }

    pub fn apply(self, mv: Move, catalog: &Catalog, favorites: &Favorites) -> Self {
        if catalog.is_empty() {
            return self;
        }

        match mv {
            Move::Down => self.move_down(catalog.len()),
            Move::Up => self.move_up(),
            Move::NextFavorite => self.jump_next(catalog, favorites),
            Move::PreviousFavorite => self.jump_previous(catalog, favorites),
        }
    }

    fn move_down(mut self, len: usize) -> Self {
        self.selected = (self.selected + 1).min(len - 1);
        if self.selected.saturating_sub(self.offset) >= self.window {
            self.offset += 1;
        }
        self
    }

    fn move_up(mut self) -> Self {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.offset {
            self.offset -= 1;
        }
        self
    }

    /// First stored favorite below the cursor, else the first stored one.
    /// Wrapping follows storage order, not catalog order.
    fn jump_next(mut self, catalog: &Catalog, favorites: &Favorites) -> Self {
        let target = favorites
            .iter()
            .filter_map(|id| catalog.index_of(id))
            .find(|&idx| idx > self.selected)
            .or_else(|| favorites.first().and_then(|id| catalog.index_of(id)));

        if let Some(idx) = target {
            self.selected = idx;
            self.offset = self.offset.max((idx + 1).saturating_sub(self.window));
            self.offset = self.offset.min(idx);
        }
        self
    }

    /// Last stored favorite above the cursor, else the last stored one.
    fn jump_previous(mut self, catalog: &Catalog, favorites: &Favorites) -> Self {
        let target = favorites
            .iter()
            .rev()
            .filter_map(|id| catalog.index_of(id))
            .find(|&idx| idx < self.selected)
            .or_else(|| favorites.last().and_then(|id| catalog.index_of(id)));

        if let Some(idx) = target {
            self.selected = idx;
            self.offset = self.offset.min(idx);
            self.offset = self.offset.max((idx + 1).saturating_sub(self.window));
        }
        self
    }

    /// Toggle the selected language in the favorites and persist.
    pub fn toggle_favorite(
        &self,
        catalog: &Catalog,
        store: &FavoritesStore,
        favorites: &mut Favorites,
    ) -> Option<Toggle> {
        let lang = catalog.get(self.selected)?;
        Some(store.toggle(favorites, lang.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Language;
    use tempfile::TempDir;

    /// Catalog of `len` entries whose ids equal their indices
    fn identity_catalog(len: usize) -> Catalog {
        let entries: Vec<Language> = (0..len as i32)
            .map(|id| Language { id, name: "lang" })
            .collect();
        Catalog::new(Box::leak(entries.into_boxed_slice()))
    }

    fn favs(ids: &[i32]) -> Favorites {
        ids.iter().copied().collect()
    }

    fn at(selected: usize, offset: usize) -> Navigation {
        Navigation {
            selected,
            offset,
            window: WINDOW_SIZE,
        }
    }

    fn assert_visible(nav: &Navigation) {
        assert!(nav.offset <= nav.selected, "{:?}", nav);
        assert!(nav.selected < nav.offset + nav.window, "{:?}", nav);
    }

    #[test]
    fn test_move_down_scrolls_after_window() {
        let catalog = identity_catalog(20);
        let favorites = Favorites::new();
        let mut nav = Navigation::default();

        for _ in 0..9 {
            nav = nav.apply(Move::Down, &catalog, &favorites);
        }
        assert_eq!((nav.selected, nav.offset), (9, 0));

        nav = nav.apply(Move::Down, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (10, 1));
    }

    #[test]
    fn test_move_down_stops_at_end() {
        let catalog = identity_catalog(20);
        let favorites = Favorites::new();
        let mut nav = Navigation::default();

        for _ in 0..30 {
            nav = nav.apply(Move::Down, &catalog, &favorites);
            assert_visible(&nav);
        }
        assert_eq!((nav.selected, nav.offset), (19, 10));
    }

    #[test]
    fn test_move_up_scrolls_back() {
        let catalog = identity_catalog(20);
        let favorites = Favorites::new();

        let nav = at(10, 1).apply(Move::Up, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (9, 1));

        let nav = at(1, 1).apply(Move::Up, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (0, 0));

        let nav = at(0, 0).apply(Move::Up, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (0, 0));
    }

    #[test]
    fn test_next_favorite_in_storage_order() {
        let catalog = identity_catalog(20);
        let favorites = favs(&[5, 2, 9]);

        let nav = at(2, 0).apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 5);

        let nav = nav.apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 9);
    }

    #[test]
    fn test_next_favorite_wraps_to_first_stored() {
        let catalog = identity_catalog(20);
        let favorites = favs(&[5, 2, 9]);

        let nav = at(9, 0).apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 5);
    }

    #[test]
    fn test_previous_favorite_wraps_to_last_stored() {
        let catalog = identity_catalog(20);
        let favorites = favs(&[5, 2, 9]);

        // Backward scan from the end of storage: 9 (no), 2 (yes)
        let nav = at(5, 0).apply(Move::PreviousFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 2);

        let nav = at(2, 0).apply(Move::PreviousFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 9);
    }

    #[test]
    fn test_previous_favorite_takes_last_match_in_storage() {
        let catalog = identity_catalog(20);
        let favorites = favs(&[2, 7, 4]);

        // Both 7 and 4 are below 12; 4 is stored last so it wins
        let nav = at(12, 5).apply(Move::PreviousFavorite, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (4, 4));
    }

    #[test]
    fn test_jumps_noop_without_favorites() {
        let catalog = identity_catalog(20);
        let favorites = Favorites::new();
        let nav = at(7, 3);

        assert_eq!(nav.apply(Move::NextFavorite, &catalog, &favorites), nav);
        assert_eq!(nav.apply(Move::PreviousFavorite, &catalog, &favorites), nav);
    }

    #[test]
    fn test_unknown_favorites_are_skipped() {
        let catalog = identity_catalog(20);

        let favorites = favs(&[42, 6]);
        let nav = at(0, 0).apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 6);

        // Wrap target not in the catalog: stay put
        let nav = at(8, 0).apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!(nav.selected, 8);

        let only_unknown = favs(&[42]);
        let nav = at(3, 0);
        assert_eq!(nav.apply(Move::PreviousFavorite, &catalog, &only_unknown), nav);
    }

    #[test]
    fn test_jump_forward_scrolls_window() {
        let catalog = identity_catalog(20);
        let favorites = favs(&[15]);

        let nav = at(2, 0).apply(Move::NextFavorite, &catalog, &favorites);
        assert_eq!((nav.selected, nav.offset), (15, 6));
    }

    #[test]
    fn test_wrapping_jumps_keep_selection_visible() {
        let catalog = identity_catalog(20);

        // Next wraps upward past the top of the window
        let nav = at(18, 9).apply(Move::NextFavorite, &catalog, &favs(&[3]));
        assert_eq!((nav.selected, nav.offset), (3, 3));

        // Previous wraps downward past the bottom of the window
        let nav = at(1, 0).apply(Move::PreviousFavorite, &catalog, &favs(&[17]));
        assert_eq!((nav.selected, nav.offset), (17, 8));
    }

    #[test]
    fn test_move_down_with_offset_past_selection() {
        let catalog = identity_catalog(20);
        let nav = at(3, 5).apply(Move::Down, &catalog, &Favorites::new());
        assert_eq!((nav.selected(), nav.offset()), (4, 5));
    }

    #[test]
    fn test_visible_rows() {
        assert_eq!(at(0, 0).visible(20), 0..10);
        assert_eq!(at(15, 10).visible(20), 10..20);
        assert_eq!(at(2, 0).visible(4), 0..4);
    }

    #[test]
    fn test_empty_catalog_is_noop() {
        let catalog = identity_catalog(0);
        let nav = Navigation::default();
        assert_eq!(nav.apply(Move::Down, &catalog, &favs(&[1])), nav);
    }

    #[test]
    fn test_toggle_favorite_at_selection() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::new(dir.path());
        let catalog = Catalog::default();
        let mut favorites = Favorites::new();

        let nav = at(2, 0);
        assert_eq!(
            nav.toggle_favorite(&catalog, &store, &mut favorites),
            Some(Toggle::Added)
        );
        assert_eq!(favorites.as_slice(), &[crate::catalog::lang::GERMAN]);
        assert_eq!(store.load(), favorites);

        assert_eq!(
            nav.toggle_favorite(&catalog, &store, &mut favorites),
            Some(Toggle::Removed)
        );
        assert!(store.load().is_empty());
    }
}
