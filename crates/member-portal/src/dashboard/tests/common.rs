use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::config::DashboardConfig;
use crate::dashboard::gateway::DashboardGateway;
use crate::dashboard::operations::{ContactMessageRow, OperationRow, VerificationRow};
use crate::dashboard::service::DashboardService;

pub(super) fn operation_rows() -> Vec<OperationRow> {
    rows(json!([
        {
            "id": 1,
            "title": "ยืนยันสมาชิกเดิม",
            "description": "บริษัท สยามสตีล จำกัด",
            "status": "pending",
            "created_at": "2024-01-05 09:00:00",
            "type": "member_verification",
            "company_name": "บริษัท สยามสตีล จำกัด",
            "member_code": "OC-1001"
        },
        {
            "id": 2,
            "title": "แก้ไขที่อยู่",
            "status": "approved",
            "created_at": "2024-01-31T23:30:00",
            "type": "address_update"
        },
        {
            "id": 3,
            "title": "แก้ไขข้อมูลสมาชิก",
            "status": "rejected",
            "created_at": "2024-02-01T00:00:01",
            "type": "profile_update"
        },
        {
            "id": 4,
            "title": "ไม่มีเวลา",
            "status": "pending",
            "created_at": "not-a-date",
            "type": "profile_update"
        }
    ]))
}

pub(super) fn contact_rows() -> Vec<ContactMessageRow> {
    rows(json!([
        {
            "id": 10,
            "subject": "สอบถามค่าธรรมเนียม",
            "message": "ค่าธรรมเนียมรายปีเท่าไร",
            "status": "replied",
            "created_at": "2024-01-20 14:00:00"
        },
        {
            "id": 11,
            "subject": "ขอใบเสร็จ",
            "status": "unread",
            "created_at": "2023-12-31 23:59:59"
        }
    ]))
}

pub(super) fn verification_rows() -> Vec<VerificationRow> {
    rows(json!([
        {
            "id": 1,
            "company_name": "บริษัท สยามสตีล จำกัด",
            "member_code": "OC-1001",
            "status": 1,
            "created_at": "2024-01-05 09:00:00"
        },
        {
            "id": 5,
            "company_name": "บริษัท พลาสติกไทย จำกัด",
            "status": 0,
            "created_at": "2024-01-01 00:00:00"
        }
    ]))
}

fn rows<T: serde::de::DeserializeOwned>(value: Value) -> Vec<T> {
    serde_json::from_value(value).expect("fixture rows")
}

#[derive(Default)]
pub(super) struct MemoryDashboard {
    pub(super) operations: Vec<OperationRow>,
    pub(super) messages: Vec<ContactMessageRow>,
    pub(super) verifications: Vec<VerificationRow>,
    pub(super) messages_down: bool,
    /// Delay applied to the first `operations` call only.
    pub(super) first_call_delay: Option<Duration>,
    calls: AtomicUsize,
    users: Mutex<Vec<String>>,
}

impl MemoryDashboard {
    pub(super) fn seeded() -> Self {
        Self {
            operations: operation_rows(),
            messages: contact_rows(),
            verifications: verification_rows(),
            ..Self::default()
        }
    }

    pub(super) fn with_messages_down(self) -> Self {
        Self {
            messages_down: true,
            ..self
        }
    }

    pub(super) fn with_first_call_delay(self, delay: Duration) -> Self {
        Self {
            first_call_delay: Some(delay),
            ..self
        }
    }

    pub(super) fn users(&self) -> Vec<String> {
        self.users.lock().expect("users mutex poisoned").clone()
    }
}

impl DashboardGateway for MemoryDashboard {
    async fn operations(&self, user_id: &str) -> Result<Vec<OperationRow>, ApiError> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .push(user_id.to_string());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let (0, Some(delay)) = (call, self.first_call_delay) {
            tokio::time::sleep(delay).await;
        }
        Ok(self.operations.clone())
    }

    async fn contact_messages(&self, _user_id: &str) -> Result<Vec<ContactMessageRow>, ApiError> {
        if self.messages_down {
            return Err(ApiError::Status {
                status: 503,
                message: None,
            });
        }
        Ok(self.messages.clone())
    }

    async fn verifications(&self, _user_id: &str) -> Result<Vec<VerificationRow>, ApiError> {
        Ok(self.verifications.clone())
    }
}

pub(super) fn build_service(gateway: MemoryDashboard) -> Arc<DashboardService<MemoryDashboard>> {
    Arc::new(DashboardService::new(
        Arc::new(gateway),
        DashboardConfig { page_size: 5 },
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
