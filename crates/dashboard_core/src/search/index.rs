//! Stateless substring search over the dashboard stores.

use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::todo::Todo;
use serde::{Deserialize, Serialize};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Blank queries are refused instead of matching everything.
    #[error("search query cannot be empty")]
    EmptyQuery,
}

/// Kind of record a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Todo,
    Note,
    Event,
}

impl SearchKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Note => "Note",
            Self::Event => "Event",
        }
    }
}

/// Dashboard section a hit links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTarget {
    TodoList,
    Notes,
    Calendar,
}

impl SearchTarget {
    /// In-page anchor of the section.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::TodoList => "#todo-list",
            Self::Notes => "#notes",
            Self::Calendar => "#calendar",
        }
    }
}

/// Search options.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    /// Optional kind filter.
    pub kind: Option<SearchKind>,
    /// Maximum number of hits; `None` returns every match.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Creates an unfiltered, unlimited query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            limit: None,
        }
    }
}

/// Single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    /// Todo/note text, or the event title.
    pub excerpt: String,
    pub target: SearchTarget,
}

/// Borrowed view of every searchable collection.
#[derive(Debug, Clone, Copy)]
pub struct SearchSources<'a> {
    pub todos: &'a [Todo],
    pub notes: &'a [Note],
    pub events: &'a [Event],
}

/// Scans all sources for `query`.
///
/// # Errors
/// Returns [`SearchError::EmptyQuery`] for blank query text.
pub fn search(sources: SearchSources<'_>, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
    if query.text.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    // Surrounding whitespace is part of the needle.
    let needle = query.text.to_lowercase();

    let wants = |kind: SearchKind| query.kind.map_or(true, |only| only == kind);
    let contains_needle = |haystack: &str| haystack.to_lowercase().contains(needle.as_str());

    let todo_hits = sources
        .todos
        .iter()
        .filter(|_| wants(SearchKind::Todo))
        .filter(|todo| contains_needle(todo.text.as_str()))
        .map(|todo| SearchHit {
            kind: SearchKind::Todo,
            excerpt: todo.text.clone(),
            target: SearchTarget::TodoList,
        });
    let note_hits = sources
        .notes
        .iter()
        .filter(|_| wants(SearchKind::Note))
        .filter(|note| contains_needle(note.text.as_str()))
        .map(|note| SearchHit {
            kind: SearchKind::Note,
            excerpt: note.text.clone(),
            target: SearchTarget::Notes,
        });
    let event_hits = sources
        .events
        .iter()
        .filter(|_| wants(SearchKind::Event))
        .filter(|event| {
            contains_needle(event.title.as_str()) || contains_needle(event.description.as_str())
        })
        .map(|event| SearchHit {
            kind: SearchKind::Event,
            excerpt: event.title.clone(),
            target: SearchTarget::Calendar,
        });

    let hits = todo_hits.chain(note_hits).chain(event_hits);
    Ok(match query.limit {
        Some(limit) => hits.take(limit).collect(),
        None => hits.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::{search, SearchError, SearchKind, SearchQuery, SearchSources};
    use crate::model::event::{Event, EventDraft};
    use crate::model::note::Note;
    use crate::model::todo::Todo;

    #[test]
    fn blank_query_is_refused() {
        let sources = SearchSources {
            todos: &[],
            notes: &[],
            events: &[],
        };
        assert_eq!(
            search(sources, &SearchQuery::new("   ")),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn event_description_matches_but_excerpt_is_title() {
        let events = vec![Event::try_from(EventDraft::new(
            "Dentist",
            "2024-4-2",
            "bring Insurance card",
        ))
        .unwrap()];
        let sources = SearchSources {
            todos: &[],
            notes: &[],
            events: &events,
        };

        let hits = search(sources, &SearchQuery::new("insurance")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].excerpt, "Dentist");
        assert_eq!(hits[0].target.anchor(), "#calendar");
    }

    #[test]
    fn kind_filter_and_limit_apply() {
        let todos = vec![Todo::new("plan trip"), Todo::new("plan budget")];
        let notes = vec![Note::new("plan ideas")];
        let sources = SearchSources {
            todos: &todos,
            notes: &notes,
            events: &[],
        };

        let mut query = SearchQuery::new("PLAN");
        query.kind = Some(SearchKind::Note);
        let hits = search(sources, &query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, SearchKind::Note);

        let mut query = SearchQuery::new("plan");
        query.limit = Some(2);
        let hits = search(sources, &query).unwrap();
        assert_eq!(
            hits.iter().map(|hit| hit.kind).collect::<Vec<_>>(),
            vec![SearchKind::Todo, SearchKind::Todo]
        );
    }
}
