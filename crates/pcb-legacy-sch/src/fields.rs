//! Field manipulation on a single component
//!
//! Rules and generators only ever touch component fields through these four
//! functions. List-valued fields store their members separated by `;`.

use crate::parser::{Component, Field, SENTINEL};

/// Set field `name` to `content`, creating it if needed.
///
/// A new field is placed at the component position with the attributes from
/// [`Field::new`]. Existing fields keep their placement and only change content.
pub fn set_field(comp: &mut Component, name: &str, content: impl Into<String>) {
    let content = content.into();
    match comp.fields.get_mut(name) {
        Some(field) => field.content = content,
        None => {
            let field = Field::new(content, &comp.x, &comp.y);
            comp.fields.insert(name.to_string(), field);
        }
    }
}

/// Create field `name` with `content` only if it does not exist yet.
///
/// Returns whether the field was added.
pub fn add_field(comp: &mut Component, name: &str, content: impl Into<String>) -> bool {
    if comp.fields.contains_key(name) {
        return false;
    }
    set_field(comp, name, content);
    true
}

/// Whether the list stored in field `name` contains `item`
pub fn has_list_field(comp: &Component, name: &str, item: &str) -> bool {
    comp.content(name)
        .is_some_and(|content| list_items(content).any(|i| i == item))
}

/// Add (`on == true`) or remove `item` from the list stored in field `name`.
///
/// Adding a member that is already present, or removing one that is absent,
/// leaves the field unchanged. Removing the last member stores the sentinel.
pub fn toggle_list_field(comp: &mut Component, name: &str, item: &str, on: bool) {
    let Some(content) = comp.content(name) else {
        if on {
            set_field(comp, name, item);
        }
        return;
    };

    let mut items: Vec<&str> = list_items(content).collect();
    let present = items.contains(&item);
    if present == on {
        return;
    }

    if on {
        items.push(item);
    } else {
        items.retain(|i| *i != item);
    }

    let content = if items.is_empty() {
        SENTINEL.to_string()
    } else {
        items.join("; ")
    };
    set_field(comp, name, content);
}

fn list_items(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(';')
        .map(str::trim)
        .filter(|i| !i.is_empty() && *i != SENTINEL)
}
