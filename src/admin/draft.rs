//! Per-entity drafts and their required-field rules.
//!
//! One tagged variant per entity kind, each with its own explicit required
//! fields. The same checks run in the admin form before submission and in
//! the mutation handlers before the store is touched, so a hand-crafted
//! request cannot skip them.

use std::collections::HashMap;

use crate::database::models::{
    CreateBlogPost, CreateContactSubmission, CreateGalleryItem, CreateProject, CreateService,
    CreateTeamMember, UpdateBlogPost, UpdateGalleryItem, UpdateProject, UpdateService,
    UpdateSiteSettings, UpdateTeamMember,
};

/// Validation failure carrying one message per offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftError {
    pub field_errors: HashMap<String, String>,
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<&str> = self.field_errors.keys().map(String::as_str).collect();
        fields.sort_unstable();
        write!(f, "Missing required fields: {}", fields.join(", "))
    }
}

impl std::error::Error for DraftError {}

#[derive(Debug, Clone)]
pub enum EntityDraft {
    TeamMember(CreateTeamMember),
    Service(CreateService),
    Project(CreateProject),
    GalleryItem(CreateGalleryItem),
    BlogPost(CreateBlogPost),
    ContactSubmission(CreateContactSubmission),
    SiteSettings(UpdateSiteSettings),
}

impl EntityDraft {
    /// Synchronous required-field validation; runs before any network call.
    pub fn validate(&self) -> Result<(), DraftError> {
        match self {
            EntityDraft::TeamMember(draft) => validate_team_member(draft),
            EntityDraft::Service(draft) => validate_service(draft),
            EntityDraft::Project(draft) => validate_project(draft),
            EntityDraft::GalleryItem(draft) => validate_gallery_item(draft),
            EntityDraft::BlogPost(draft) => validate_blog_post(draft),
            EntityDraft::ContactSubmission(draft) => validate_contact_submission(draft),
            EntityDraft::SiteSettings(draft) => validate_site_settings(draft),
        }
    }
}

fn require(errors: &mut HashMap<String, String>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

fn finish(errors: HashMap<String, String>) -> Result<(), DraftError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DraftError { field_errors: errors })
    }
}

pub fn validate_team_member(draft: &CreateTeamMember) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "name", &draft.name, "Name is required");
    require(&mut errors, "role", &draft.role, "Role is required");
    finish(errors)
}

pub fn validate_service(draft: &CreateService) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "title", &draft.title, "Title is required");
    require(&mut errors, "description", &draft.description, "Description is required");
    finish(errors)
}

pub fn validate_project(draft: &CreateProject) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "title", &draft.title, "Title is required");
    require(&mut errors, "description", &draft.description, "Description is required");
    require(&mut errors, "location", &draft.location, "Location is required");
    require(&mut errors, "category", &draft.category, "Category is required");
    finish(errors)
}

pub fn validate_gallery_item(draft: &CreateGalleryItem) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "image_url", &draft.image_url, "Image URL is required");
    finish(errors)
}

pub fn validate_blog_post(draft: &CreateBlogPost) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "title", &draft.title, "Title is required");
    require(&mut errors, "content", &draft.content, "Content is required");
    finish(errors)
}

pub fn validate_contact_submission(draft: &CreateContactSubmission) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require(&mut errors, "name", &draft.name, "Name is required");
    require(&mut errors, "email", &draft.email, "Email is required");
    require(&mut errors, "message", &draft.message, "Message is required");
    finish(errors)
}

/// Settings edits are partial; only a supplied-but-blank title is an error.
pub fn validate_site_settings(draft: &UpdateSiteSettings) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    if let Some(site_title) = &draft.site_title {
        require(&mut errors, "site_title", site_title, "Site title is required");
    }
    finish(errors)
}

// Update payloads are partial: absent fields stay untouched, but a required
// field that is supplied must not be blanked out.

fn require_if_supplied(
    errors: &mut HashMap<String, String>,
    field: &str,
    value: Option<&String>,
    message: &str,
) {
    if let Some(value) = value {
        require(errors, field, value, message);
    }
}

pub fn validate_team_member_update(draft: &UpdateTeamMember) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require_if_supplied(&mut errors, "name", draft.name.as_ref(), "Name is required");
    require_if_supplied(&mut errors, "role", draft.role.as_ref(), "Role is required");
    finish(errors)
}

pub fn validate_service_update(draft: &UpdateService) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require_if_supplied(&mut errors, "title", draft.title.as_ref(), "Title is required");
    require_if_supplied(&mut errors, "description", draft.description.as_ref(), "Description is required");
    finish(errors)
}

pub fn validate_project_update(draft: &UpdateProject) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require_if_supplied(&mut errors, "title", draft.title.as_ref(), "Title is required");
    require_if_supplied(&mut errors, "description", draft.description.as_ref(), "Description is required");
    require_if_supplied(&mut errors, "location", draft.location.as_ref(), "Location is required");
    require_if_supplied(&mut errors, "category", draft.category.as_ref(), "Category is required");
    finish(errors)
}

pub fn validate_gallery_item_update(draft: &UpdateGalleryItem) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require_if_supplied(&mut errors, "image_url", draft.image_url.as_ref(), "Image URL is required");
    finish(errors)
}

pub fn validate_blog_post_update(draft: &UpdateBlogPost) -> Result<(), DraftError> {
    let mut errors = HashMap::new();
    require_if_supplied(&mut errors, "title", draft.title.as_ref(), "Title is required");
    require_if_supplied(&mut errors, "content", draft.content.as_ref(), "Content is required");
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_project() -> CreateProject {
        CreateProject {
            title: String::new(),
            description: String::new(),
            client: String::new(),
            location: String::new(),
            completion_date: String::new(),
            category: String::new(),
            images: vec![],
            featured: false,
            published: false,
        }
    }

    #[test]
    fn project_requires_title_description_location_category() {
        let err = validate_project(&empty_project()).unwrap_err();
        assert_eq!(err.field_errors.len(), 4);
        assert_eq!(err.field_errors["title"], "Title is required");
        assert_eq!(err.field_errors["description"], "Description is required");
        assert_eq!(err.field_errors["location"], "Location is required");
        assert_eq!(err.field_errors["category"], "Category is required");
    }

    #[test]
    fn project_with_required_fields_passes() {
        let draft = CreateProject {
            title: "Villa A".to_string(),
            description: "Hillside residence".to_string(),
            location: "Lagos".to_string(),
            category: "Residential".to_string(),
            ..empty_project()
        };
        assert!(validate_project(&draft).is_ok());
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let draft = CreateTeamMember {
            name: "   ".to_string(),
            role: "Architect".to_string(),
            bio: String::new(),
            image_url: String::new(),
        };
        let err = validate_team_member(&draft).unwrap_err();
        assert!(err.field_errors.contains_key("name"));
        assert!(!err.field_errors.contains_key("role"));
    }

    #[test]
    fn gallery_item_requires_only_image() {
        let draft = CreateGalleryItem {
            title: String::new(),
            image_url: String::new(),
            category: String::new(),
            order_index: 0,
        };
        let err = validate_gallery_item(&draft).unwrap_err();
        assert_eq!(err.field_errors.len(), 1);
        assert_eq!(err.field_errors["image_url"], "Image URL is required");
    }

    #[test]
    fn settings_blank_title_only_fails_when_supplied() {
        assert!(validate_site_settings(&UpdateSiteSettings::default()).is_ok());

        let draft = UpdateSiteSettings {
            site_title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_site_settings(&draft).is_err());
    }

    #[test]
    fn partial_update_only_checks_supplied_fields() {
        assert!(validate_project_update(&UpdateProject::default()).is_ok());

        let draft = UpdateProject {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = validate_project_update(&draft).unwrap_err();
        assert_eq!(err.field_errors.len(), 1);
        assert_eq!(err.field_errors["title"], "Title is required");
    }

    #[test]
    fn tagged_draft_dispatches_to_entity_rules() {
        let draft = EntityDraft::ContactSubmission(CreateContactSubmission {
            name: "Ada".to_string(),
            email: String::new(),
            phone: None,
            message: "Hello".to_string(),
        });
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field_errors.len(), 1);
        assert_eq!(err.field_errors["email"], "Email is required");
    }
}
