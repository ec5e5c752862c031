use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::admin::activity::{Activity, ActivityPage, ActivityQuery, Pagination};
use crate::admin::gateway::AdminGateway;
use crate::admin::invite::InviteDetails;
use crate::admin::service::AdminService;
use crate::api::ApiError;

pub(super) const INVITE_TOKEN: &str = "invite-7f3a";

pub(super) fn activities(count: usize) -> Vec<Activity> {
    (1..=count)
        .map(|index| {
            let action = if index % 2 == 0 {
                "approve_member"
            } else {
                "reject_member"
            };
            serde_json::from_value(json!({
                "id": index,
                "action_type": action,
                "description": format!("รายการที่ {index}"),
                "admin_name": "admin01",
                "created_at": format!("2024-03-{:02} 09:00:00", index.min(28)),
            }))
            .expect("fixture activity")
        })
        .collect()
}

/// Serves pages out of a fixed activity list; an empty list answers 404 like the backend.
#[derive(Default)]
pub(super) struct MemoryAdmin {
    pub(super) activities: Vec<Activity>,
    queries: Mutex<Vec<ActivityQuery>>,
    completed: Mutex<Vec<(String, String)>>,
}

impl MemoryAdmin {
    pub(super) fn with_activities(count: usize) -> Self {
        Self {
            activities: activities(count),
            ..Self::default()
        }
    }

    pub(super) fn queries(&self) -> Vec<ActivityQuery> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }

    pub(super) fn completed(&self) -> Vec<(String, String)> {
        self.completed.lock().expect("completed mutex poisoned").clone()
    }
}

impl AdminGateway for MemoryAdmin {
    async fn recent_activities(&self, query: ActivityQuery) -> Result<ActivityPage, ApiError> {
        self.queries
            .lock()
            .expect("queries mutex poisoned")
            .push(query);
        if self.activities.is_empty() {
            return Err(ApiError::Status {
                status: 404,
                message: None,
            });
        }

        let limit = query.limit as usize;
        let total = self.activities.len();
        let rows = self
            .activities
            .iter()
            .skip((query.page as usize - 1) * limit)
            .take(limit)
            .cloned()
            .collect();
        Ok(ActivityPage {
            activities: rows,
            pagination: Pagination {
                current_page: query.page,
                total_pages: total.div_ceil(limit) as u32,
                total_items: total as u64,
                limit: query.limit,
            },
        })
    }

    async fn verify_invite(&self, token: &str) -> Result<InviteDetails, ApiError> {
        if token != INVITE_TOKEN {
            return Err(ApiError::Status {
                status: 400,
                message: Some("คำเชิญไม่ถูกต้องหรือหมดอายุ".to_string()),
            });
        }
        Ok(InviteDetails {
            email: "new.admin@example.org".to_string(),
            name: None,
            role: Some("admin".to_string()),
        })
    }

    async fn complete_invite(&self, token: &str, name: &str, _password: &str) -> Result<(), ApiError> {
        self.completed
            .lock()
            .expect("completed mutex poisoned")
            .push((token.to_string(), name.to_string()));
        Ok(())
    }
}

pub(super) fn build_service(gateway: MemoryAdmin) -> (Arc<AdminService<MemoryAdmin>>, Arc<MemoryAdmin>) {
    let gateway = Arc::new(gateway);
    (Arc::new(AdminService::new(gateway.clone())), gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
