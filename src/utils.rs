//! Some utility functions

use std::collections::HashSet;

use crate::board::groups::CategoryGroups;
use crate::item::{ItemId, TodoItem};

/// A debug utility that pretty-prints items grouped by category
pub fn print_groups(groups: &CategoryGroups, favorites: &HashSet<ItemId>) {
    for group in groups {
        println!("{}", group.category());
        for item in group.items() {
            print_item(item, favorites.contains(item.id()));
        }
    }
}

pub fn print_item(item: &TodoItem, favorite: bool) {
    let fav = if favorite { "*" } else { " " };
    println!("    {} {}\t{}\t{}\t(id {})", fav, item.title(), item.date(), item.content(), item.id());
}
