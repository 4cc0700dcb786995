//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The server an Android emulator sees as the host machine's `localhost:5001`.
/// This is not suitable for a production deployment.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:5001";

/// The local storage key under which the dark-mode flag is persisted (as `"true"` or `"false"`)
pub const DARK_MODE_KEY: &str = "darkMode";

/// Path of the to-do collection on the server
pub const TODOS_PATH: &str = "todos";

/// Base URL used by [`Client::from_config`](crate::client::Client::from_config).
/// Feel free to override it when initing this library.
pub static BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(DEFAULT_BASE_URL.to_string())));

/// Returns the currently configured base URL
pub fn base_url() -> String {
    match BASE_URL.lock() {
        Ok(url) => url.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override the base URL used by clients created afterwards
pub fn set_base_url<S: ToString>(url: S) {
    let mut current = match BASE_URL.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *current = url.to_string();
}
