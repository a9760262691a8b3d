//! Id-keyed reconciliation of admin list screens after a mutation.
//!
//! The transitions are pure functions over the loaded collection so they can
//! be tested without the network layer: append after create, replace-by-id
//! after edit, remove-by-id after a confirmed delete.

use uuid::Uuid;

use crate::database::models::{
    BlogPost, ContactSubmission, GalleryItem, Project, Service, TeamMember,
};

/// Anything with a stable unique id, which is every persisted entity
pub trait Identified {
    fn entity_id(&self) -> Uuid;
}

macro_rules! identified {
    ($($ty:ty),+) => {
        $(impl Identified for $ty {
            fn entity_id(&self) -> Uuid {
                self.id
            }
        })+
    };
}

identified!(TeamMember, Service, Project, GalleryItem, BlogPost, ContactSubmission);

/// Create path: the returned entity joins the end of the collection.
pub fn append<T>(mut items: Vec<T>, entity: T) -> Vec<T> {
    items.push(entity);
    items
}

/// Edit path: swap the matching entity in place; order is preserved and an
/// unknown id leaves the collection untouched.
pub fn replace_by_id<T: Identified>(mut items: Vec<T>, entity: T) -> Vec<T> {
    if let Some(slot) = items.iter_mut().find(|item| item.entity_id() == entity.entity_id()) {
        *slot = entity;
    }
    items
}

/// Confirmed-delete path
pub fn remove_by_id<T: Identified>(mut items: Vec<T>, id: Uuid) -> Vec<T> {
    items.retain(|item| item.entity_id() != id);
    items
}

/// Controller state for one admin list screen
#[derive(Debug)]
pub struct ListScreen<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub form_visible: bool,
    /// Id of the entity being edited; None means the form creates
    pub editing: Option<Uuid>,
}

impl<T: Identified> ListScreen<T> {
    /// Fresh screen; the collection load is in flight
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            form_visible: false,
            editing: None,
        }
    }

    pub fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn open_create(&mut self) {
        self.form_visible = true;
        self.editing = None;
    }

    pub fn open_edit(&mut self, id: Uuid) {
        self.form_visible = true;
        self.editing = Some(id);
    }

    pub fn cancel_form(&mut self) {
        self.form_visible = false;
        self.editing = None;
    }

    /// Reconcile a successful save: replace when editing, append when
    /// creating. The form closes either way.
    pub fn mutation_succeeded(&mut self, entity: T) {
        let items = std::mem::take(&mut self.items);
        self.items = match self.editing {
            Some(_) => replace_by_id(items, entity),
            None => append(items, entity),
        };
        self.error = None;
        self.cancel_form();
    }

    /// A failed save surfaces the error and leaves the collection untouched.
    pub fn mutation_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Confirmed delete succeeded
    pub fn delete_succeeded(&mut self, id: Uuid) {
        let items = std::mem::take(&mut self.items);
        self.items = remove_by_id(items, id);
        self.error = None;
    }

    /// Failed delete: error surfaced, collection unchanged
    pub fn delete_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.items.is_empty()
    }
}

impl<T: Identified> Default for ListScreen<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(name: &str) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: "Architect".to_string(),
            bio: String::new(),
            image_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn append_keeps_existing_order() {
        let items = vec![member("A"), member("B")];
        let items = append(items, member("C"));
        let names: Vec<&str> = items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn replace_by_id_swaps_in_place() {
        let items = vec![member("A"), member("B"), member("C")];
        let mut updated = items[1].clone();
        updated.name = "B2".to_string();

        let items = replace_by_id(items, updated);
        let names: Vec<&str> = items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B2", "C"]);
    }

    #[test]
    fn replace_with_unknown_id_is_a_noop() {
        let items = vec![member("A")];
        let items = replace_by_id(items, member("X"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "A");
    }

    #[test]
    fn remove_by_id_drops_only_the_match() {
        let items = vec![member("A"), member("B")];
        let target = items[0].id;
        let items = remove_by_id(items, target);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "B");
    }

    #[test]
    fn screen_create_path_appends_and_closes_form() {
        let mut screen: ListScreen<TeamMember> = ListScreen::new();
        screen.loaded(vec![member("A")]);
        screen.open_create();

        screen.mutation_succeeded(member("B"));
        assert_eq!(screen.items.len(), 2);
        assert!(!screen.form_visible);
        assert_eq!(screen.editing, None);
    }

    #[test]
    fn screen_edit_path_replaces_by_id() {
        let mut screen: ListScreen<TeamMember> = ListScreen::new();
        let existing = member("A");
        let id = existing.id;
        screen.loaded(vec![existing]);
        screen.open_edit(id);

        let mut updated = member("A2");
        updated.id = id;
        screen.mutation_succeeded(updated);

        assert_eq!(screen.items.len(), 1);
        assert_eq!(screen.items[0].name, "A2");
        assert!(!screen.form_visible);
    }

    #[test]
    fn failed_mutation_leaves_collection_unchanged() {
        let mut screen: ListScreen<TeamMember> = ListScreen::new();
        screen.loaded(vec![member("A")]);
        screen.open_edit(screen.items[0].id);

        screen.mutation_failed("Database error occurred");
        assert_eq!(screen.items.len(), 1);
        assert_eq!(screen.items[0].name, "A");
        assert_eq!(screen.error.as_deref(), Some("Database error occurred"));
        // Form stays open so the user can retry
        assert!(screen.form_visible);
    }

    #[test]
    fn failed_delete_keeps_the_row() {
        let mut screen: ListScreen<TeamMember> = ListScreen::new();
        screen.loaded(vec![member("A")]);
        let id = screen.items[0].id;

        screen.delete_failed("Database error occurred");
        assert_eq!(screen.items.len(), 1);

        screen.delete_succeeded(id);
        assert!(screen.items.is_empty());
        assert!(screen.is_empty());
    }
}
