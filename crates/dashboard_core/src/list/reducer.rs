use crate::model::note::Note;
use crate::model::todo::{Todo, TodoFilter, TodoStats};
use crate::model::ItemId;

/// Record that can live in a [`ListReducer`].
pub trait ListItem {
    fn id(&self) -> ItemId;
    /// Text compared by the duplicate policy and matched by search.
    fn text(&self) -> &str;
}

/// Record with a completion flag that can be toggled and filtered.
pub trait Completable {
    fn is_completed(&self) -> bool;
    fn set_completed(&mut self, completed: bool);
}

impl ListItem for Todo {
    fn id(&self) -> ItemId {
        self.id
    }

    fn text(&self) -> &str {
        self.text.as_str()
    }
}

impl Completable for Todo {
    fn is_completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl ListItem for Note {
    fn id(&self) -> ItemId {
        self.id
    }

    fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// How `add` treats an item whose text already exists in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Same text may appear any number of times (todos).
    Allow,
    /// Case-sensitive exact text match is rejected (notes).
    RejectSameText,
}

/// Rejection reasons for list mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("item text cannot be empty")]
    EmptyText,
    #[error("an item with identical text already exists ({existing})")]
    DuplicateItem { existing: ItemId },
}

/// Insertion-ordered list with stable-id transitions.
#[derive(Debug, Clone)]
pub struct ListReducer<T> {
    items: Vec<T>,
    policy: DuplicatePolicy,
}

impl<T: ListItem> ListReducer<T> {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self::from_items(Vec::new(), policy)
    }

    /// Wraps previously persisted items without re-validating them.
    pub fn from_items(items: Vec<T>, policy: DuplicatePolicy) -> Self {
        Self { items, policy }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Appends `item` to the end of the list.
    ///
    /// # Errors
    /// - `EmptyText` when the item text is blank.
    /// - `DuplicateItem` when the policy rejects an existing identical text.
    pub fn add(&mut self, item: T) -> Result<ItemId, ListError> {
        if item.text().trim().is_empty() {
            return Err(ListError::EmptyText);
        }

        if self.policy == DuplicatePolicy::RejectSameText {
            if let Some(existing) = self.items.iter().find(|other| other.text() == item.text()) {
                return Err(ListError::DuplicateItem {
                    existing: existing.id(),
                });
            }
        }

        let id = item.id();
        self.items.push(item);
        Ok(id)
    }

    /// Removes the item with `id`, returning it. `None` means nothing changed.
    pub fn delete(&mut self, id: ItemId) -> Option<T> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(position))
    }

    /// Iterates newest-first without touching stored order.
    pub fn newest_first(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T: ListItem + Completable> ListReducer<T> {
    /// Flips the completion flag of one item.
    ///
    /// Returns the new flag, or `None` when `id` is unknown.
    pub fn toggle_completed(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        let completed = !item.is_completed();
        item.set_completed(completed);
        Some(completed)
    }

    /// Returns a read-only view in stored order.
    pub fn filter(&self, filter: TodoFilter) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| filter.accepts(item.is_completed()))
            .collect()
    }

    pub fn stats(&self) -> TodoStats {
        let completed = self.items.iter().filter(|item| item.is_completed()).count();
        TodoStats {
            total: self.items.len(),
            active: self.items.len() - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicatePolicy, ListError, ListReducer};
    use crate::model::note::Note;
    use crate::model::todo::{Todo, TodoFilter};
    use uuid::Uuid;

    #[test]
    fn todos_allow_repeated_text() {
        let mut todos = ListReducer::new(DuplicatePolicy::Allow);
        todos.add(Todo::new("stretch")).unwrap();
        todos.add(Todo::new("stretch")).unwrap();
        assert_eq!(todos.len(), 2);
    }

    #[test]
    fn notes_reject_exact_duplicate_but_not_case_variant() {
        let mut notes = ListReducer::new(DuplicatePolicy::RejectSameText);
        let first = notes.add(Note::new("Groceries")).unwrap();

        let err = notes.add(Note::new("Groceries")).unwrap_err();
        assert_eq!(err, ListError::DuplicateItem { existing: first });
        assert_eq!(notes.len(), 1);

        notes.add(Note::new("groceries")).unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut todos: ListReducer<Todo> = ListReducer::new(DuplicatePolicy::Allow);
        assert_eq!(todos.add(Todo::new("  \t")), Err(ListError::EmptyText));
        assert!(todos.is_empty());
    }

    #[test]
    fn toggle_and_delete_use_stable_ids_after_removal() {
        let mut todos = ListReducer::new(DuplicatePolicy::Allow);
        let first = todos.add(Todo::new("a")).unwrap();
        let second = todos.add(Todo::new("b")).unwrap();
        let third = todos.add(Todo::new("c")).unwrap();

        assert!(todos.delete(first).is_some());
        assert_eq!(todos.toggle_completed(third), Some(true));
        assert_eq!(todos.get(second).map(|todo| todo.completed), Some(false));
        assert_eq!(todos.get(third).map(|todo| todo.completed), Some(true));
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut todos = ListReducer::new(DuplicatePolicy::Allow);
        todos.add(Todo::new("a")).unwrap();
        let before = todos.items().to_vec();

        assert_eq!(todos.toggle_completed(Uuid::new_v4()), None);
        assert!(todos.delete(Uuid::new_v4()).is_none());
        assert_eq!(todos.items(), before.as_slice());
    }

    #[test]
    fn filter_does_not_mutate_and_stats_count() {
        let mut todos = ListReducer::new(DuplicatePolicy::Allow);
        let done = todos.add(Todo::new("done")).unwrap();
        todos.add(Todo::new("open")).unwrap();
        todos.toggle_completed(done);

        let completed = todos.filter(TodoFilter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].text, "done");
        assert_eq!(todos.filter(TodoFilter::Active)[0].text, "open");
        assert_eq!(todos.len(), 2);

        let stats = todos.stats();
        assert_eq!((stats.total, stats.active, stats.completed), (2, 1, 1));
    }

    #[test]
    fn newest_first_reverses_view_only() {
        let mut notes = ListReducer::new(DuplicatePolicy::RejectSameText);
        notes.add(Note::new("first")).unwrap();
        notes.add(Note::new("second")).unwrap();

        let shown: Vec<_> = notes.newest_first().map(|note| note.text.as_str()).collect();
        assert_eq!(shown, vec!["second", "first"]);
        assert_eq!(notes.items()[0].text, "first");
    }
}
