use url::Url;

use crate::config::TODOS_PATH;
use crate::error::NetworkError;
use crate::item::ItemId;

/// Just a wrapper around the server base URL, that knows where the to-do endpoints live
#[derive(Clone, Debug)]
pub struct Resource {
    url: Url,
}

impl Resource {
    fn new(url: Url) -> Self {
        Self { url }
    }

    /// Wrap `url`, which must be usable as a base for the to-do endpoints
    pub fn parse<S: AsRef<str>>(url: S) -> Result<Self, NetworkError> {
        let url = Url::parse(url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(format!("{} cannot be used as a base URL", url)));
        }
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url { &self.url }

    /// The URL of the whole to-do collection, e.g. `http://host/todos`
    pub fn collection(&self) -> Url {
        self.combine(&[TODOS_PATH])
    }

    /// The URL of a single to-do item, e.g. `http://host/todos/42`
    pub fn member(&self, id: &ItemId) -> Url {
        self.combine(&[TODOS_PATH, id.as_str()])
    }

    /// Build a new URL by keeping the same scheme, server and base path, and appending `segments` (percent-encoded)
    fn combine(&self, segments: &[&str]) -> Url {
        let mut built = self.url.clone();
        if let Ok(mut path) = built.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        built
    }
}
