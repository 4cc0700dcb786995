//! Items grouped by category

use std::collections::HashMap;

use crate::item::TodoItem;

/// The items that share a category
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup {
    category: String,
    items: Vec<TodoItem>,
}

impl CategoryGroup {
    pub fn category(&self) -> &str     { &self.category }
    pub fn items(&self) -> &[TodoItem] { &self.items    }
}

/// A mapping from category name to its items.
///
/// Categories are kept in the order they first appear in the source list, and items keep their relative order.
/// Every item of the source list is in exactly one group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryGroups {
    groups: Vec<CategoryGroup>,
}

impl CategoryGroups {
    pub fn from_items(items: &[TodoItem]) -> Self {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for item in items {
            let position = *index.entry(item.category()).or_insert_with(|| {
                groups.push(CategoryGroup {
                    category: item.category().to_string(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
            groups[position].items.push(item.clone());
        }

        Self { groups }
    }

    /// The items of a category, or `None` if no item belongs to it
    pub fn get(&self, category: &str) -> Option<&[TodoItem]> {
        self.groups.iter()
            .find(|group| group.category == category)
            .map(|group| group.items())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.category())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryGroup> {
        self.groups.iter()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of items, all categories included
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

impl<'a> IntoIterator for &'a CategoryGroups {
    type Item = &'a CategoryGroup;
    type IntoIter = std::slice::Iter<'a, CategoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;

    fn item(id: u64, category: &str) -> TodoItem {
        TodoItem::new(ItemId::from(id), format!("task {}", id), "", category, "")
    }

    fn ids(items: &[TodoItem]) -> Vec<&str> {
        items.iter().map(|i| i.id().as_str()).collect()
    }

    #[test]
    fn work_and_home() {
        let items = vec![item(1, "Work"), item(2, "Home"), item(3, "Work")];
        let groups = CategoryGroups::from_items(&items);

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(groups.get("Work").unwrap()), vec!["1", "3"]);
        assert_eq!(ids(groups.get("Home").unwrap()), vec!["2"]);
        assert_eq!(groups.categories().collect::<Vec<_>>(), vec!["Work", "Home"]);
        assert!(groups.get("Shopping").is_none());
    }

    #[test]
    fn every_item_exactly_once() {
        let categories = ["a", "b", "", "a", "c", "b", "b", ""];
        let items: Vec<TodoItem> = categories.iter().enumerate()
            .map(|(i, c)| item(i as u64, c))
            .collect();
        let groups = CategoryGroups::from_items(&items);

        assert_eq!(groups.item_count(), items.len());
        for source in &items {
            let holding: Vec<&CategoryGroup> = groups.iter()
                .filter(|g| g.items().contains(source))
                .collect();
            assert_eq!(holding.len(), 1);
            assert_eq!(holding[0].category(), source.category());
        }
    }

    #[test]
    fn empty_list() {
        let groups = CategoryGroups::from_items(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups.item_count(), 0);
    }
}
