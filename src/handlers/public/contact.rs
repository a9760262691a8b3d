use axum::Json;

use crate::activity::{feed, ChangeEvent};
use crate::admin::draft::validate_contact_submission;
use crate::database::models::{ContactSubmission, CreateContactSubmission};
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/contact - public contact form submission
pub async fn contact_post(Json(payload): Json<CreateContactSubmission>) -> ApiResult<ContactSubmission> {
    validate_contact_submission(&payload)?;

    let pool = Store::pool().await?;
    let submission = ContactSubmission::create(&pool, &payload).await?;

    feed()
        .publish(ChangeEvent::ContactSubmissionCreated(submission.clone()))
        .await;

    Ok(ApiResponse::created(submission))
}
