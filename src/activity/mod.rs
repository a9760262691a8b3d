//! Recent-activity feed for the admin dashboard.
//!
//! Formatting an insert event into a display record is a pure function so it
//! can be tested without any live change feed; the broadcast/ring-buffer
//! plumbing sits around it. Mutation handlers publish an event after each
//! successful create.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::database::models::{BlogPost, ContactSubmission, Project, TeamMember};

const RECENT_CAPACITY: usize = 50;
const BROADCAST_CAPACITY: usize = 64;

/// A row insert somewhere in the content store
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    ProjectCreated(Project),
    TeamMemberCreated(TeamMember),
    BlogPostCreated(BlogPost),
    ContactSubmissionCreated(ContactSubmission),
}

/// Display record shown in the dashboard widget
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: Uuid,
    pub kind: String,
    pub action: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

/// Map an insert event to a display record.
///
/// Draft blog posts produce nothing; they only surface once published.
pub fn format_change(event: &ChangeEvent) -> Option<Activity> {
    match event {
        ChangeEvent::ProjectCreated(project) => Some(Activity {
            id: project.id,
            kind: "Project".to_string(),
            action: "created".to_string(),
            target: project.title.clone(),
            created_at: project.created_at,
        }),
        ChangeEvent::TeamMemberCreated(member) => Some(Activity {
            id: member.id,
            kind: "Team Member".to_string(),
            action: "added".to_string(),
            target: member.name.clone(),
            created_at: member.created_at,
        }),
        ChangeEvent::BlogPostCreated(post) => {
            if !post.published {
                return None;
            }
            Some(Activity {
                id: post.id,
                kind: "Blog Post".to_string(),
                action: "published".to_string(),
                target: post.title.clone(),
                created_at: post.published_at.unwrap_or(post.created_at),
            })
        }
        ChangeEvent::ContactSubmissionCreated(submission) => Some(Activity {
            id: submission.id,
            kind: "Contact Form".to_string(),
            action: "received from".to_string(),
            target: submission.name.clone(),
            created_at: submission.created_at,
        }),
    }
}

/// Observer attached to the feed; notified after each accepted activity
#[async_trait]
pub trait ActivityObserver: Send + Sync {
    async fn on_activity(&self, activity: &Activity);
}

/// Logs each activity through tracing; attached at startup
pub struct LogObserver;

#[async_trait]
impl ActivityObserver for LogObserver {
    async fn on_activity(&self, activity: &Activity) {
        tracing::info!("{} {} {}", activity.kind, activity.action, activity.target);
    }
}

/// Bounded recent buffer plus a broadcast channel for push subscribers
pub struct ActivityFeed {
    recent: RwLock<VecDeque<Activity>>,
    observers: RwLock<Vec<Box<dyn ActivityObserver>>>,
    tx: broadcast::Sender<Activity>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            recent: RwLock::new(VecDeque::with_capacity(RECENT_CAPACITY)),
            observers: RwLock::new(Vec::new()),
            tx,
        }
    }

    /// Format and record an event. Events that format to nothing (e.g. draft
    /// blog posts) are dropped. Returns the recorded activity, if any.
    pub async fn publish(&self, event: ChangeEvent) -> Option<Activity> {
        let activity = format_change(&event)?;

        {
            let mut recent = self.recent.write().await;
            recent.push_front(activity.clone());
            recent.truncate(RECENT_CAPACITY);
        }

        for observer in self.observers.read().await.iter() {
            observer.on_activity(&activity).await;
        }

        // Nobody subscribed is fine; send only fails without receivers
        let _ = self.tx.send(activity.clone());

        Some(activity)
    }

    /// Newest first
    pub async fn recent(&self, limit: usize) -> Vec<Activity> {
        let recent = self.recent.read().await;
        recent.iter().take(limit).cloned().collect()
    }

    pub async fn attach(&self, observer: Box<dyn ActivityObserver>) {
        self.observers.write().await.push(observer);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Activity> {
        self.tx.subscribe()
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide feed shared by mutation handlers and the dashboard endpoint
pub fn feed() -> &'static ActivityFeed {
    use std::sync::OnceLock;
    static INSTANCE: OnceLock<ActivityFeed> = OnceLock::new();
    INSTANCE.get_or_init(ActivityFeed::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{BlogPost, Project};

    fn sample_project(title: &str) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "desc".to_string(),
            client: String::new(),
            location: String::new(),
            completion_date: String::new(),
            category: String::new(),
            images: vec![],
            featured: false,
            published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_post(published: bool) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: "Post".to_string(),
            content: "body".to_string(),
            excerpt: String::new(),
            featured_image: String::new(),
            author: String::new(),
            published,
            published_at: published.then(Utc::now),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn formats_project_and_contact_inserts() {
        let project = sample_project("Villa A");
        let activity = format_change(&ChangeEvent::ProjectCreated(project)).unwrap();
        assert_eq!(activity.kind, "Project");
        assert_eq!(activity.action, "created");
        assert_eq!(activity.target, "Villa A");
    }

    #[test]
    fn draft_blog_posts_are_ignored() {
        assert!(format_change(&ChangeEvent::BlogPostCreated(sample_post(false))).is_none());

        let activity = format_change(&ChangeEvent::BlogPostCreated(sample_post(true))).unwrap();
        assert_eq!(activity.action, "published");
    }

    #[tokio::test]
    async fn feed_records_newest_first_and_notifies_subscribers() {
        let feed = ActivityFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(ChangeEvent::ProjectCreated(sample_project("First"))).await;
        feed.publish(ChangeEvent::ProjectCreated(sample_project("Second"))).await;

        let recent = feed.recent(10).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].target, "Second");
        assert_eq!(recent[1].target, "First");

        assert_eq!(rx.recv().await.unwrap().target, "First");
        assert_eq!(rx.recv().await.unwrap().target, "Second");
    }

    #[tokio::test]
    async fn dropped_events_are_not_buffered() {
        let feed = ActivityFeed::new();
        assert!(feed.publish(ChangeEvent::BlogPostCreated(sample_post(false))).await.is_none());
        assert!(feed.recent(10).await.is_empty());
    }
}
