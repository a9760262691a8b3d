pub mod blog_post;
pub mod contact_submission;
pub mod gallery_item;
pub mod project;
pub mod service;
pub mod site_settings;
pub mod team_member;
pub mod user;

pub use blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
pub use contact_submission::{ContactSubmission, CreateContactSubmission};
pub use gallery_item::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
pub use project::{CreateProject, Project, UpdateProject};
pub use service::{CreateService, Service, UpdateService};
pub use site_settings::{SiteSettings, UpdateSiteSettings};
pub use team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
pub use user::User;
