//! Utilities to track the state of the item list

use std::fmt::{Display, Error, Formatter};

/// Where the board stands regarding its last list request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been requested yet
    Idle,
    /// A list request is pending
    Loading,
    /// The last list request succeeded
    Loaded{ n_items: usize },
    /// The last list request failed. The previously loaded items are still displayed
    Error{ details: String },
}

impl Display for LoadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadState::Idle => write!(f, "Not loaded"),
            LoadState::Loading => write!(f, "Loading..."),
            LoadState::Loaded{n_items} => write!(f, "{} items loaded", n_items),
            LoadState::Error{details} => write!(f, "Loading failed: {}", details),
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Idle
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadState>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadState>;

/// Create a feeback channel, that can be used to follow the load state of a board
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadState::default())
}



/// A structure that tracks the load state, logs what happens, and forwards state changes to a listener
#[derive(Debug, Default)]
pub struct LoadProgress {
    state: LoadState,
    n_errors: u32,
    feedback_channel: Option<FeedbackSender>,
}

impl LoadProgress {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { feedback_channel: Some(channel), ..Self::default() }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// How many operations have failed since this board was created
    pub fn n_errors(&self) -> u32 {
        self.n_errors
    }

    /// Log an error
    pub fn error(&mut self, text: &str) {
        log::error!("{}", text);
        self.n_errors += 1;
    }
    /// Log an info
    pub fn info(&mut self, text: &str) {
        log::info!("{}", text);
    }
    /// Log a debug message
    pub fn debug(&mut self, text: &str) {
        log::debug!("{}", text);
    }

    /// Change the current state, and send it to the listener (if any)
    pub fn set_state(&mut self, state: LoadState) {
        self.state = state;
        if let Some(sender) = &self.feedback_channel {
            // The listener may be gone already, this is not an error
            let _ = sender.send(self.state.clone());
        }
    }
}
