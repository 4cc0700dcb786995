//! This module holds the state of a to-do board
//!
//! A [`TodoBoard`] owns a [`TodoSource`] (usually the server) and a [`KeyValueStore`] (usually the device local storage).
//! It keeps a snapshot of the items the source returned last, and never edits it in place:
//! every successful creation or deletion is followed by a full refresh.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::DARK_MODE_KEY;
use crate::item::{ItemId, NewTodo, TodoItem};
use crate::traits::{KeyValueStore, TodoSource};

pub mod groups;
pub mod progress;
use groups::CategoryGroups;
use progress::{FeedbackSender, LoadProgress, LoadState};


/// One of the two alternate looks of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// What happened to a form submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field is empty. Nothing has been sent
    Incomplete,
    /// The item has been created, and the board has been refreshed
    Created,
    /// The source refused or did not receive the item. The form is left untouched
    Failed,
}


/// The state of a to-do board: the displayed items, favorites, theme and the item creation form.
#[derive(Debug)]
pub struct TodoBoard<S, K>
where
    S: TodoSource,
    K: KeyValueStore,
{
    /// Where items come from (usually a server)
    source: S,
    /// Where the theme is persisted
    settings: K,

    items: Vec<TodoItem>,
    last_refresh: Option<DateTime<Utc>>,
    progress: LoadProgress,

    /// Not persisted
    favorites: HashSet<ItemId>,
    dark_mode: bool,

    form: NewTodo,
    form_visible: bool,
}

impl<S, K> TodoBoard<S, K>
where
    S: TodoSource,
    K: KeyValueStore,
{
    /// Create a board. Nothing is loaded until [`Self::mount`] is called
    pub fn new(source: S, settings: K) -> Self {
        Self {
            source,
            settings,
            items: Vec::new(),
            last_refresh: None,
            progress: LoadProgress::new(),
            favorites: HashSet::new(),
            dark_mode: false,
            form: NewTodo::default(),
            form_visible: false,
        }
    }

    /// Create a board that reports every change of its [`LoadState`] to `feedback_sender`
    pub fn with_feedback(source: S, settings: K, feedback_sender: FeedbackSender) -> Self {
        let mut board = Self::new(source, settings);
        board.progress = LoadProgress::new_with_feedback_channel(feedback_sender);
        board
    }

    pub fn source(&self) -> &S { &self.source }
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }
    pub fn settings(&self) -> &K { &self.settings }

    /// The items returned by the last successful refresh
    pub fn items(&self) -> &[TodoItem] { &self.items }
    pub fn load_state(&self) -> &LoadState { self.progress.state() }
    /// The last time items have been successfully fetched (or None in case they never were)
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> { self.last_refresh }
    /// How many operations have failed since this board was created
    pub fn n_errors(&self) -> u32 { self.progress.n_errors() }

    /// Load the persisted theme, then fetch the items
    pub async fn mount(&mut self) {
        self.load_theme();
        self.refresh().await;
    }

    /// Replace the displayed items by what the source currently holds.
    ///
    /// In case of error, the previous items are kept and the error is only logged.
    /// Returns whether the refresh succeeded.
    pub async fn refresh(&mut self) -> bool {
        self.progress.set_state(LoadState::Loading);

        match self.source.list().await {
            Ok(items) => {
                self.progress.debug(&format!("Refreshed with {} items", items.len()));
                self.progress.set_state(LoadState::Loaded{ n_items: items.len() });
                self.items = items;
                self.last_refresh = Some(Utc::now());
                true
            },
            Err(err) => {
                self.progress.error(&format!("Failed to fetch todos: {}", err));
                self.progress.set_state(LoadState::Error{ details: err.to_string() });
                false
            },
        }
    }

    /// Items grouped by category, rebuilt from the current items
    pub fn groups(&self) -> CategoryGroups {
        CategoryGroups::from_items(&self.items)
    }


    pub fn form(&self) -> &NewTodo { &self.form }
    pub fn form_mut(&mut self) -> &mut NewTodo { &mut self.form }
    pub fn is_form_visible(&self) -> bool { self.form_visible }
    pub fn open_form(&mut self) { self.form_visible = true; }
    pub fn close_form(&mut self) { self.form_visible = false; }

    /// Send the form content to the source.
    ///
    /// An incomplete form is not sent at all.
    /// On success, the board is refreshed, the form is cleared and hidden.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.form.is_complete() == false {
            self.progress.debug("Ignoring the submission of an incomplete form");
            return SubmitOutcome::Incomplete;
        }

        if let Err(err) = self.source.create(&self.form).await {
            self.progress.error(&format!("Unable to create item {:?}: {}", self.form.title, err));
            return SubmitOutcome::Failed;
        }

        self.progress.info(&format!("Created item {:?}", self.form.title));
        self.refresh().await;
        self.form.clear();
        self.form_visible = false;
        SubmitOutcome::Created
    }

    /// Ask the source to delete an item, and refresh on success.
    /// Returns whether the deletion succeeded
    pub async fn delete(&mut self, id: &ItemId) -> bool {
        if let Err(err) = self.source.delete(id).await {
            self.progress.error(&format!("Unable to delete item {}: {}", id, err));
            return false;
        }

        self.progress.info(&format!("Deleted item {}", id));
        self.refresh().await;
        true
    }


    /// Add the item to the favorites, or remove it if it already was one.
    /// Returns whether the item is a favorite after the call
    pub fn toggle_favorite(&mut self, id: &ItemId) -> bool {
        if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.clone());
            true
        }
    }

    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &HashSet<ItemId> {
        &self.favorites
    }


    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Read the persisted theme flag. The current flag is kept if nothing has been persisted
    pub fn load_theme(&mut self) {
        match self.settings.get(DARK_MODE_KEY) {
            Ok(Some(value)) => {
                self.dark_mode = value == "true";
            },
            Ok(None) => {
                self.progress.debug("No persisted theme, keeping the default one");
            },
            Err(err) => {
                self.progress.error(&format!("Unable to read the persisted theme: {}", err));
            },
        }
    }

    /// Switch between the light and the dark theme, and persist the new value.
    /// Returns whether dark mode is now enabled
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(err) = self.settings.set(DARK_MODE_KEY, value) {
            self.progress.error(&format!("Unable to persist the theme: {}", err));
        }
        self.dark_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use crate::cache::Cache;
    use crate::error::StorageError;
    use crate::mock_behaviour::MockBehaviour;
    use crate::storage::MemoryKvStore;

    fn board() -> TodoBoard<Cache, MemoryKvStore> {
        TodoBoard::new(Cache::in_memory(), MemoryKvStore::new())
    }

    #[tokio::test]
    async fn incomplete_form_is_not_sent() {
        let mut board = board();
        let behaviour = Arc::new(Mutex::new(MockBehaviour::fail_now(1)));
        board.source_mut().set_mock_behaviour(Some(Arc::clone(&behaviour)));

        *board.form_mut() = NewTodo::new("title", "content", "Work", "");
        board.open_form();
        assert_eq!(board.submit().await, SubmitOutcome::Incomplete);

        // The scripted failure has not been consumed: nothing has reached the source
        assert_eq!(behaviour.lock().unwrap().create_behaviour, (0, 1));
        assert_eq!(board.load_state(), &LoadState::Idle);
        assert!(board.is_form_visible());
        assert_eq!(board.form().title, "title");
    }

    #[tokio::test]
    async fn submit_clears_and_closes_the_form() {
        let mut board = board();
        board.open_form();
        *board.form_mut() = NewTodo::new("title", "content", "Work", "01/01/2025");

        assert_eq!(board.submit().await, SubmitOutcome::Created);
        assert_eq!(board.items().len(), 1);
        assert_eq!(board.form(), &NewTodo::default());
        assert!(board.is_form_visible() == false);
        assert_eq!(board.load_state(), &LoadState::Loaded{ n_items: 1 });
        assert!(board.last_refresh().is_some());
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_form() {
        let mut board = board();
        board.source_mut().set_mock_behaviour(Some(Arc::new(Mutex::new(MockBehaviour::fail_now(1)))));
        board.open_form();
        *board.form_mut() = NewTodo::new("title", "content", "Work", "01/01/2025");

        assert_eq!(board.submit().await, SubmitOutcome::Failed);
        assert!(board.items().is_empty());
        assert!(board.is_form_visible());
        assert_eq!(board.form().category, "Work");
        assert_eq!(board.n_errors(), 1);
    }

    #[test]
    fn favorites_toggle_twice() {
        let mut board = board();
        let a = ItemId::from("a");
        let b = ItemId::from("b");
        board.toggle_favorite(&b);
        let before = board.favorites().clone();

        assert!(board.toggle_favorite(&a));
        assert!(board.is_favorite(&a));
        assert!(board.toggle_favorite(&a) == false);
        assert_eq!(board.favorites(), &before);
    }

    #[test]
    fn theme_is_written_through() {
        let mut board = board();
        assert_eq!(board.theme(), Theme::Light);

        assert!(board.toggle_dark_mode());
        assert_eq!(board.theme(), Theme::Dark);
        assert_eq!(board.settings().get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        assert!(board.toggle_dark_mode() == false);
        assert_eq!(board.settings().get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn theme_is_read_at_load() {
        let mut settings = MemoryKvStore::new();
        settings.set(DARK_MODE_KEY, "true").unwrap();
        let mut board = TodoBoard::new(Cache::in_memory(), settings);
        assert!(board.is_dark_mode() == false);
        board.load_theme();
        assert!(board.is_dark_mode());

        let mut settings = MemoryKvStore::new();
        settings.set(DARK_MODE_KEY, "yes").unwrap();
        let mut board = TodoBoard::new(Cache::in_memory(), settings);
        board.load_theme();
        assert!(board.is_dark_mode() == false);
    }

    #[tokio::test]
    async fn feedback_channel_follows_the_load_state() {
        let (sender, receiver) = progress::feedback_channel();
        let mut board = TodoBoard::with_feedback(Cache::in_memory(), MemoryKvStore::new(), sender);
        assert_eq!(*receiver.borrow(), LoadState::Idle);

        board.mount().await;
        assert_eq!(*receiver.borrow(), LoadState::Loaded{ n_items: 0 });

        board.source_mut().set_mock_behaviour(Some(Arc::new(Mutex::new(MockBehaviour::fail_now(1)))));
        assert!(board.refresh().await == false);
        let state = receiver.borrow().clone();
        match state {
            LoadState::Error{ .. } => (),
            other => panic!("unexpected state {:?}", other),
        }
    }

    /// A settings store that refuses every read and write
    #[derive(Debug, Default)]
    struct BrokenKvStore;

    impl KeyValueStore for BrokenKvStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read refused")))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused")))
        }
    }

    #[test]
    fn unreadable_theme_keeps_the_current_flag() {
        let mut board = TodoBoard::new(Cache::in_memory(), BrokenKvStore);
        board.load_theme();
        assert!(board.is_dark_mode() == false);
        assert_eq!(board.n_errors(), 1);
    }

    #[test]
    fn unwritable_theme_still_switches() {
        let mut board = TodoBoard::new(Cache::in_memory(), BrokenKvStore);
        assert!(board.toggle_dark_mode());
        assert!(board.is_dark_mode());
        assert_eq!(board.theme(), Theme::Dark);
        assert_eq!(board.n_errors(), 1);

        assert!(board.toggle_dark_mode() == false);
        assert_eq!(board.n_errors(), 2);
    }
}
