use shoplist_core::{CategorySet, Item};

/// Shown in place of the list when nothing has been added.
pub const EMPTY_LIST_TEXT: &str = "No items yet. Add some!";

pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

pub fn format_item_lines(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec![EMPTY_LIST_TEXT.to_string()];
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mark = if item.completed { 'x' } else { ' ' };
            format!(
                "{:>2}. [{mark}] {}  Category: {}  Reminder: {}",
                index + 1,
                item.name,
                item.category,
                item.reminder.format("%Y-%m-%d"),
            )
        })
        .collect()
}

/// One line per category; the draft's current choice is starred.
pub fn format_category_lines(categories: &CategorySet, selected: &str) -> Vec<String> {
    categories
        .iter()
        .map(|name| {
            let marker = if name.as_str() == selected { '*' } else { ' ' };
            format!("{marker} {name}")
        })
        .collect()
}
