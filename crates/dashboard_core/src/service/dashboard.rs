//! Dashboard facade.
//!
//! # Responsibility
//! - Own every panel store plus the injected [`KeyValueStore`].
//! - Apply one in-memory transition per call, then write the affected key.
//! - Queue user-facing notices while notifications are enabled.
//!
//! # Invariants
//! - In-memory state is authoritative; a failed write is reported as
//!   `PersistenceWriteFailed` after the transition has been applied.
//! - Rejected operations (duplicate, invalid move, ...) touch neither memory
//!   nor storage.
//! - Loading never fails; malformed keys fall back to their defaults.

use crate::calc::{evaluate, CalcKey, CalculatorDisplay};
use crate::calendar::{EventStore, MonthView, YearMonth};
use crate::game::{GameEngine, GameStatus};
use crate::list::{DuplicatePolicy, ListReducer};
use crate::model::event::{Event, EventDraft};
use crate::model::note::Note;
use crate::model::todo::{Todo, TodoFilter, TodoStats};
use crate::model::ItemId;
use crate::search::index::{search, SearchHit, SearchQuery, SearchSources};
use crate::service::error::{DashboardError, DashboardResult};
use crate::settings::{SettingKey, Settings, SettingsError};
use crate::store::codec::{load_json, load_or_default, save_json};
use crate::store::{keys, KeyValueStore, StoreError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

/// Application state core behind the dashboard UI.
pub struct Dashboard<S: KeyValueStore> {
    store: S,
    todos: ListReducer<Todo>,
    notes: ListReducer<Note>,
    events: EventStore,
    game: GameEngine,
    settings: Settings,
    calculator: CalculatorDisplay,
    notices: Vec<String>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Loads every persisted key from `store`, falling back per key.
    ///
    /// Lists stored without ids are rewritten once so ids stay stable
    /// across loads.
    pub fn load(store: S) -> Self {
        let todos: Vec<Todo> = load_or_default(&store, keys::TODOS);
        let notes: Vec<Note> = load_or_default(&store, keys::NOTES);
        let events: Vec<Event> = load_or_default(&store, keys::EVENTS);
        let settings = Settings::load(&store);

        let mut dashboard = Self {
            store,
            todos: ListReducer::from_items(todos, DuplicatePolicy::Allow),
            notes: ListReducer::from_items(notes, DuplicatePolicy::RejectSameText),
            events: EventStore::from_events(events),
            game: GameEngine::new(),
            settings,
            calculator: CalculatorDisplay::new(),
            notices: Vec::new(),
        };
        dashboard.backfill_missing_ids();

        info!(
            "event=dashboard_load module=dashboard status=ok todos={} notes={} events={}",
            dashboard.todos.len(),
            dashboard.notes.len(),
            dashboard.events.len()
        );
        dashboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ----- todos -----

    /// Todos in insertion (display) order.
    pub fn todos(&self) -> &[Todo] {
        self.todos.items()
    }

    pub fn todo(&self, id: ItemId) -> Option<&Todo> {
        self.todos.get(id)
    }

    /// Adds an active todo with trimmed `text` and returns its id.
    ///
    /// # Errors
    /// - `EmptyText` for blank input (nothing changes).
    /// - `PersistenceWriteFailed` after the todo was added in memory.
    pub fn add_todo(&mut self, text: &str) -> DashboardResult<ItemId> {
        let id = self.todos.add(Todo::new(text.trim()))?;
        debug!(
            "event=todo_add module=dashboard status=ok id={id} text_len={}",
            text.trim().len()
        );
        self.notify("Task added successfully!");
        self.persist_todos()?;
        Ok(id)
    }

    /// Flips completion of one todo.
    ///
    /// Returns the new flag, or `None` (and writes nothing) for unknown ids.
    pub fn toggle_todo(&mut self, id: ItemId) -> DashboardResult<Option<bool>> {
        let Some(completed) = self.todos.toggle_completed(id) else {
            debug!("event=todo_toggle module=dashboard status=noop id={id}");
            return Ok(None);
        };
        debug!("event=todo_toggle module=dashboard status=ok id={id} completed={completed}");
        self.persist_todos()?;
        Ok(Some(completed))
    }

    /// Deletes one todo. Returns `false` (and writes nothing) for unknown ids.
    pub fn delete_todo(&mut self, id: ItemId) -> DashboardResult<bool> {
        if self.todos.delete(id).is_none() {
            debug!("event=todo_delete module=dashboard status=noop id={id}");
            return Ok(false);
        }
        debug!("event=todo_delete module=dashboard status=ok id={id}");
        self.notify("Task deleted successfully!");
        self.persist_todos()?;
        Ok(true)
    }

    pub fn filter_todos(&self, filter: TodoFilter) -> Vec<&Todo> {
        self.todos.filter(filter)
    }

    pub fn todo_stats(&self) -> TodoStats {
        self.todos.stats()
    }

    // ----- notes -----

    /// Notes in stored (insertion) order.
    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    /// Notes as displayed: newest first.
    pub fn notes_newest_first(&self) -> Vec<&Note> {
        self.notes.newest_first().collect()
    }

    /// Adds a note stamped with the current time.
    ///
    /// # Errors
    /// - `EmptyText` or `DuplicateItem` without mutating anything.
    /// - `PersistenceWriteFailed` after the note was added in memory.
    pub fn add_note(&mut self, text: &str) -> DashboardResult<ItemId> {
        let id = match self.notes.add(Note::new(text.trim())) {
            Ok(id) => id,
            Err(err) => {
                debug!("event=note_add module=dashboard status=rejected reason={err}");
                return Err(err.into());
            }
        };
        debug!(
            "event=note_add module=dashboard status=ok id={id} text_len={}",
            text.trim().len()
        );
        self.notify("Note added successfully!");
        self.persist_notes()?;
        Ok(id)
    }

    /// Deletes one note. Returns `false` (and writes nothing) for unknown ids.
    pub fn delete_note(&mut self, id: ItemId) -> DashboardResult<bool> {
        if self.notes.delete(id).is_none() {
            debug!("event=note_delete module=dashboard status=noop id={id}");
            return Ok(false);
        }
        debug!("event=note_delete module=dashboard status=ok id={id}");
        self.notify("Note deleted successfully!");
        self.persist_notes()?;
        Ok(true)
    }

    // ----- game -----

    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    /// Plays `cell` for the current player.
    pub fn play(&mut self, cell: usize) -> DashboardResult<GameStatus> {
        let player = self.game.current_player();
        let status = self.game.play(cell)?;
        debug!("event=game_move module=dashboard status=ok cell={cell} player={player} outcome={status}");
        match status {
            GameStatus::Won(winner) => self.notify(format!("{winner} wins!")),
            GameStatus::Draw => self.notify("Game is a draw!"),
            GameStatus::InProgress => {}
        }
        Ok(status)
    }

    pub fn reset_game(&mut self) {
        self.game.reset();
        debug!("event=game_reset module=dashboard status=ok");
        self.notify("Game reset!");
    }

    // ----- calendar -----

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// Validates and appends one event.
    ///
    /// # Errors
    /// - `InvalidEvent` without mutating anything.
    /// - `PersistenceWriteFailed` after the event was added in memory.
    pub fn add_event(&mut self, draft: EventDraft) -> DashboardResult<Event> {
        let event = self.events.add(draft)?;
        debug!(
            "event=event_add module=dashboard status=ok date={} title_len={}",
            event.date,
            event.title.len()
        );
        self.notify("Event added successfully!");
        self.persist_events()?;
        Ok(event)
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.events_on(date)
    }

    pub fn events_in_month(&self, year: i32, month: u32) -> Vec<&Event> {
        self.events.events_in_month(year, month)
    }

    pub fn month_view(&self, year_month: YearMonth) -> MonthView {
        self.events.month_view(year_month)
    }

    // ----- search -----

    /// Case-insensitive search over todos, notes and events.
    pub fn search(&self, query: &str) -> DashboardResult<Vec<SearchHit>> {
        self.search_with(&SearchQuery::new(query))
    }

    pub fn search_with(&self, query: &SearchQuery) -> DashboardResult<Vec<SearchHit>> {
        let sources = SearchSources {
            todos: self.todos.items(),
            notes: self.notes.items(),
            events: self.events.events(),
        };
        let hits = search(sources, query)?;
        debug!(
            "event=search module=dashboard status=ok query_len={} hits={}",
            query.text.trim().len(),
            hits.len()
        );
        Ok(hits)
    }

    // ----- settings -----

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses and stores one setting from user input.
    pub fn apply_setting(&mut self, key: SettingKey, raw: &str) -> DashboardResult<()> {
        let mut next = self.settings.clone();
        next.apply(key, raw)?;
        self.commit_setting(key, next)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> DashboardResult<()> {
        let next = Settings {
            dark_mode: enabled,
            ..self.settings.clone()
        };
        self.commit_setting(SettingKey::DarkMode, next)
    }

    pub fn set_notifications(&mut self, enabled: bool) -> DashboardResult<()> {
        let next = Settings {
            notifications: enabled,
            ..self.settings.clone()
        };
        self.commit_setting(SettingKey::Notifications, next)
    }

    pub fn set_theme(&mut self, theme: &str) -> DashboardResult<()> {
        self.apply_setting(SettingKey::Theme, theme)
    }

    pub fn set_font_size(&mut self, px: u32) -> DashboardResult<()> {
        if px == 0 {
            return Err(SettingsError::InvalidValue {
                key: SettingKey::FontSize,
                value: px.to_string(),
            }
            .into());
        }
        let next = Settings {
            font_size: px,
            ..self.settings.clone()
        };
        self.commit_setting(SettingKey::FontSize, next)
    }

    fn commit_setting(&mut self, key: SettingKey, next: Settings) -> DashboardResult<()> {
        let enabling_notifications = key == SettingKey::Notifications
            && next.notifications
            && !self.settings.notifications;
        self.settings = next;
        debug!("event=setting_update module=dashboard status=ok key={key}");
        if enabling_notifications {
            self.notify("Notifications enabled!");
        }
        self.settings
            .save_field(&mut self.store, key)
            .map_err(|source| write_failed(key.store_key(), source))
    }

    // ----- calculator -----

    pub fn calculator(&self) -> &CalculatorDisplay {
        &self.calculator
    }

    /// Presses one calculator button and returns the display text.
    pub fn press_calculator(&mut self, key: CalcKey) -> &str {
        self.calculator.press(key)
    }

    /// Evaluates a whole expression without touching the display.
    pub fn calculate(&self, expression: &str) -> DashboardResult<f64> {
        Ok(evaluate(expression)?)
    }

    // ----- notices & persistence -----

    /// Drains queued user-facing notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Rewrites every key. Returns the first failure after trying all keys.
    pub fn flush(&mut self) -> DashboardResult<()> {
        let mut first_error = None;
        let mut record = |result: DashboardResult<()>| {
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        };

        record(self.persist_todos());
        record(self.persist_notes());
        record(self.persist_events());
        for key in SettingKey::ALL {
            record(
                self.settings
                    .save_field(&mut self.store, key)
                    .map_err(|source| write_failed(key.store_key(), source)),
            );
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        if self.settings.notifications {
            self.notices.push(message.into());
        }
    }

    fn persist_todos(&mut self) -> DashboardResult<()> {
        persist(&mut self.store, keys::TODOS, self.todos.items())
    }

    fn persist_notes(&mut self) -> DashboardResult<()> {
        persist(&mut self.store, keys::NOTES, self.notes.items())
    }

    fn persist_events(&mut self) -> DashboardResult<()> {
        persist(&mut self.store, keys::EVENTS, self.events.events())
    }

    fn backfill_missing_ids(&mut self) {
        let mut rewrites = Vec::new();
        if !self.todos.is_empty() && stored_items_lack_ids(&self.store, keys::TODOS) {
            rewrites.push((keys::TODOS, self.persist_todos()));
        }
        if !self.notes.is_empty() && stored_items_lack_ids(&self.store, keys::NOTES) {
            rewrites.push((keys::NOTES, self.persist_notes()));
        }

        for (key, result) in rewrites {
            match result {
                Ok(()) => info!("event=id_backfill module=dashboard status=ok key={key}"),
                Err(err) => warn!(
                    "event=id_backfill module=dashboard status=error key={key} error_code={}",
                    err.code()
                ),
            }
        }
    }
}

fn persist<S, T>(store: &mut S, key: &'static str, items: &[T]) -> DashboardResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    save_json(store, key, items).map_err(|source| write_failed(key, source))
}

fn write_failed(key: &'static str, source: StoreError) -> DashboardError {
    warn!(
        "event=persist_write module=dashboard status=error key={key} error_code=persistence_write_failed error={source}"
    );
    DashboardError::PersistenceWriteFailed { key, source }
}

fn stored_items_lack_ids<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> bool {
    load_json::<Vec<Value>, _>(store, key)
        .map(|items| items.iter().any(|item| item.get("id").is_none()))
        .unwrap_or(false)
}
