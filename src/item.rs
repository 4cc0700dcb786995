//! To-do items, as exchanged with the server

use std::fmt::{Display, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// The identifier of an item. It is assigned by the server, and opaque to this crate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    content: String,
}

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for ItemId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for ItemId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        Self { content: n.to_string() }
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde.
/// Servers may use either numeric or string identifiers, both are accepted.
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<ItemId, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
    }
    fn visit_string<E: de::Error>(self, v: String) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
    }
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
    }
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId::from(v.to_string()))
    }
}



/// A to-do item, as returned by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Assigned by the server
    #[serde(alias = "_id")]
    id: ItemId,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    content: String,
    /// The name of the group this item is displayed in
    #[serde(default, deserialize_with = "null_as_empty")]
    category: String,
    /// Free text, its format is never checked
    #[serde(default, deserialize_with = "null_as_empty")]
    date: String,
}

/// Servers send `null` for unset text fields. They are read as empty strings
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl TodoItem {
    pub fn new<T, U, V, W>(id: ItemId, title: T, content: U, category: V, date: W) -> Self
    where
        T: ToString, U: ToString, V: ToString, W: ToString,
    {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    pub fn id(&self) -> &ItemId       { &self.id       }
    pub fn title(&self) -> &str       { &self.title    }
    pub fn content(&self) -> &str     { &self.content  }
    pub fn category(&self) -> &str    { &self.category }
    pub fn date(&self) -> &str        { &self.date     }
}


/// The content of an item that has not been created on the server yet.
/// This is the body of a creation request, and it never carries an ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: String,
}

impl NewTodo {
    pub fn new<T, U, V, W>(title: T, content: U, category: V, date: W) -> Self
    where
        T: ToString, U: ToString, V: ToString, W: ToString,
    {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    /// Whether every field is filled in. No other validation is made (e.g. the date format is not checked)
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.content.is_empty()
            && !self.category.is_empty()
            && !self.date.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Attach the ID a store has picked for this item
    pub fn into_item(self, id: ItemId) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            date: self.date,
        }
    }
}
