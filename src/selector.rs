use crate::models::{Category, VocabEntry};
use crate::seed::DEFAULT_LESSON_RANGE;

/// Study scope: one lesson or the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    Single,
    All,
}

/// Derives the active working set from the scope selection and tracks the
/// flip-card cursor inside it. Holds no entries of its own; the collection is
/// passed in on every derivation so a store mutation is picked up
/// immediately.
#[derive(Debug)]
pub struct SessionSelector {
    scope: ScopeMode,
    selected_lesson: Option<u32>,
    cursor: usize,
}

impl Default for SessionSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSelector {
    pub fn new() -> Self {
        Self {
            scope: ScopeMode::Single,
            selected_lesson: None,
            cursor: 0,
        }
    }

    pub fn scope(&self) -> ScopeMode {
        self.scope
    }

    pub fn selected_lesson(&self) -> Option<u32> {
        self.selected_lesson
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Switches to single-lesson scope. Resets the cursor: the old position
    /// is meaningless in the new working set.
    pub fn select_lesson(&mut self, lesson: u32) {
        self.scope = ScopeMode::Single;
        self.selected_lesson = Some(lesson);
        self.cursor = 0;
    }

    pub fn select_all(&mut self) {
        self.scope = ScopeMode::All;
        self.selected_lesson = None;
        self.cursor = 0;
    }

    /// Back to the lesson picker: single scope with nothing selected, which
    /// derives an empty working set.
    pub fn clear_selection(&mut self) {
        self.scope = ScopeMode::Single;
        self.selected_lesson = None;
        self.cursor = 0;
    }

    /// Must be called whenever the underlying collection changes so the
    /// cursor never points past the new working set.
    pub fn on_collection_changed(&mut self) {
        self.cursor = 0;
    }

    /// Distinct lessons present, ascending. An empty collection falls back
    /// to the fixed default range so the picker is never empty.
    pub fn available_lessons(&self, entries: &[VocabEntry]) -> Vec<u32> {
        let mut lessons: Vec<u32> = entries.iter().map(|e| e.lesson).collect();
        lessons.sort_unstable();
        lessons.dedup();
        if lessons.is_empty() {
            lessons = DEFAULT_LESSON_RANGE.collect();
        }
        lessons
    }

    /// The entries currently in scope, in collection order.
    pub fn working_set(&self, entries: &[VocabEntry]) -> Vec<VocabEntry> {
        match (self.scope, self.selected_lesson) {
            (ScopeMode::Single, None) => Vec::new(),
            (ScopeMode::Single, Some(lesson)) => entries
                .iter()
                .filter(|e| e.lesson == lesson)
                .cloned()
                .collect(),
            (ScopeMode::All, _) => entries.to_vec(),
        }
    }

    /// Moves the flip-card cursor forward, clamped to the working set.
    pub fn advance(&mut self, working_set_len: usize) {
        if self.cursor + 1 < working_set_len {
            self.cursor += 1;
        }
    }

    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Dictionary search over the current scope: case-insensitive substring
    /// match on kanji or meaning, optionally narrowed to one category.
    pub fn search(
        &self,
        entries: &[VocabEntry],
        query: &str,
        category: Option<Category>,
    ) -> Vec<VocabEntry> {
        let needle = query.to_lowercase();
        entries
            .iter()
            .filter(|e| {
                let matches_query = needle.is_empty()
                    || e.kanji.to_lowercase().contains(&needle)
                    || e.meaning.to_lowercase().contains(&needle);
                let matches_category = category.is_none_or(|c| e.category == c);
                let matches_scope = match (self.scope, self.selected_lesson) {
                    (ScopeMode::All, _) => true,
                    (ScopeMode::Single, Some(lesson)) => e.lesson == lesson,
                    (ScopeMode::Single, None) => true,
                };
                matches_query && matches_category && matches_scope
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kanji: &str, meaning: &str, category: Category, lesson: u32) -> VocabEntry {
        VocabEntry {
            id: id.to_string(),
            kanji: kanji.to_string(),
            reading: "よみ".to_string(),
            meaning: meaning.to_string(),
            category,
            lesson,
        }
    }

    fn sample() -> Vec<VocabEntry> {
        vec![
            entry("1", "猫", "cat", Category::General, 1),
            entry("2", "犬", "dog", Category::General, 1),
            entry("3", "食べる", "to eat", Category::Verb, 6),
            entry("4", "水", "water", Category::Kanji, 6),
        ]
    }

    #[test]
    fn test_working_set_single_without_selection_is_empty() {
        let selector = SessionSelector::new();
        assert!(selector.working_set(&sample()).is_empty());
    }

    #[test]
    fn test_working_set_single_lesson() {
        let mut selector = SessionSelector::new();
        selector.select_lesson(1);
        let ws = selector.working_set(&sample());
        assert_eq!(ws.len(), 2);
        assert!(ws.iter().all(|e| e.lesson == 1));
    }

    #[test]
    fn test_working_set_all() {
        let mut selector = SessionSelector::new();
        selector.select_all();
        assert_eq!(selector.working_set(&sample()).len(), 4);
    }

    #[test]
    fn test_working_set_lesson_without_entries_is_empty() {
        let mut selector = SessionSelector::new();
        selector.select_lesson(99);
        assert!(selector.working_set(&sample()).is_empty());
    }

    #[test]
    fn test_available_lessons_sorted_distinct() {
        let selector = SessionSelector::new();
        assert_eq!(selector.available_lessons(&sample()), vec![1, 6]);
    }

    #[test]
    fn test_available_lessons_fallback_range() {
        let selector = SessionSelector::new();
        let lessons = selector.available_lessons(&[]);
        assert_eq!(lessons.len(), 25);
        assert_eq!(lessons.first(), Some(&1));
        assert_eq!(lessons.last(), Some(&25));
    }

    #[test]
    fn test_selection_changes_reset_cursor() {
        let mut selector = SessionSelector::new();
        selector.select_lesson(1);
        selector.advance(2);
        assert_eq!(selector.cursor(), 1);
        selector.select_all();
        assert_eq!(selector.cursor(), 0);
        selector.advance(4);
        selector.select_lesson(6);
        assert_eq!(selector.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamped_to_bounds() {
        let mut selector = SessionSelector::new();
        selector.select_lesson(1);
        for _ in 0..10 {
            selector.advance(2);
        }
        assert_eq!(selector.cursor(), 1);
        for _ in 0..10 {
            selector.retreat();
        }
        assert_eq!(selector.cursor(), 0);
    }

    #[test]
    fn test_search_matches_kanji_and_meaning() {
        let mut selector = SessionSelector::new();
        selector.select_all();
        let by_kanji = selector.search(&sample(), "猫", None);
        assert_eq!(by_kanji.len(), 1);
        assert_eq!(by_kanji[0].id, "1");

        let by_meaning = selector.search(&sample(), "WATER", None);
        assert_eq!(by_meaning.len(), 1);
        assert_eq!(by_meaning[0].id, "4");
    }

    #[test]
    fn test_search_category_filter() {
        let mut selector = SessionSelector::new();
        selector.select_all();
        let verbs = selector.search(&sample(), "", Some(Category::Verb));
        assert_eq!(verbs.len(), 1);
        assert_eq!(verbs[0].id, "3");
    }

    #[test]
    fn test_search_scoped_to_selected_lesson() {
        let mut selector = SessionSelector::new();
        selector.select_lesson(6);
        let hits = selector.search(&sample(), "", None);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|e| e.lesson == 6));
    }
}
