use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::domain::{DocumentType, MembershipId, MembershipType};
use super::gateway::MembershipGateway;
use super::submission::{
    ApplicationOverview, DocumentUpload, ResubmissionDraft, ResubmissionPayload, ResubmissionRequest,
    ResubmissionService, SubmissionReceipt,
};
use crate::error::AppError;

/// Multipart part carrying the JSON comment and form; every other part is a file named by
/// its document type.
pub const PAYLOAD_PART: &str = "payload";

/// Router builder exposing the rejected-application resubmission endpoints.
pub fn resubmission_router<G>(service: Arc<ResubmissionService<G>>) -> Router
where
    G: MembershipGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/resubmissions/drafts/:rejection_id",
            get(draft_handler::<G>),
        )
        .route(
            "/api/v1/resubmissions/:membership_type/:membership_id",
            get(overview_handler::<G>).post(resubmit_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn draft_handler<G>(
    State(service): State<Arc<ResubmissionService<G>>>,
    Path(rejection_id): Path<String>,
) -> Result<Json<ResubmissionDraft>, AppError>
where
    G: MembershipGateway + 'static,
{
    let draft = service.load_draft(&rejection_id).await?;
    Ok(Json(draft))
}

pub(crate) async fn overview_handler<G>(
    State(service): State<Arc<ResubmissionService<G>>>,
    Path((membership_type, membership_id)): Path<(String, String)>,
) -> Result<Json<ApplicationOverview>, AppError>
where
    G: MembershipGateway + 'static,
{
    let membership_type = parse_membership_type(&membership_type)?;
    let overview = service
        .overview(membership_type, &MembershipId(membership_id))
        .await?;
    Ok(Json(overview))
}

pub(crate) async fn resubmit_handler<G>(
    State(service): State<Arc<ResubmissionService<G>>>,
    Path((membership_type, membership_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    G: MembershipGateway + 'static,
{
    let membership_type = parse_membership_type(&membership_type)?;
    let request = read_resubmission(multipart).await?;

    let receipt = service
        .submit(membership_type, &MembershipId(membership_id), request)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

fn parse_membership_type(raw: &str) -> Result<MembershipType, AppError> {
    raw.parse::<MembershipType>()
        .map_err(|err| AppError::NotFound(err.to_string()))
}

async fn read_resubmission(mut multipart: Multipart) -> Result<ResubmissionRequest, AppError> {
    let mut payload: Option<ResubmissionPayload> = None;
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Malformed(err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == PAYLOAD_PART {
            let text = field
                .text()
                .await
                .map_err(|err| AppError::Malformed(err.body_text()))?;
            payload = Some(
                serde_json::from_str(&text)
                    .map_err(|err| AppError::Malformed(format!("invalid payload: {err}")))?,
            );
            continue;
        }

        let document_type = name
            .parse::<DocumentType>()
            .map_err(AppError::Malformed)?;
        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| document_type.as_str().to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::Malformed(err.body_text()))?;
        documents.push(DocumentUpload {
            document_type,
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let payload = payload
        .ok_or_else(|| AppError::Malformed(format!("missing '{PAYLOAD_PART}' part")))?;
    let mut request = ResubmissionRequest::from(payload);
    request.documents = documents;
    Ok(request)
}
