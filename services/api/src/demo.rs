use crate::infra::{InMemoryDashboardGateway, InMemoryMembershipGateway, RecordedCall};
use clap::Args;
use member_portal::auth::PasswordStrength;
use member_portal::config::DashboardConfig;
use member_portal::dashboard::{DashboardService, Operation, OperationQuery};
use member_portal::error::AppError;
use member_portal::membership::{
    DocumentUpload, RejectedApplication, ResubmissionDraft, ResubmissionRequest,
    ResubmissionService, StepWizard,
};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_REJECTION_ID: &str = "demo-1";
const DEMO_USER_ID: &str = "demo-member";

#[derive(Args, Debug)]
pub(crate) struct ResubmissionMapArgs {
    /// Rejected-application JSON file (as returned by the backend). Reads stdin when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Print the full mapped form as JSON after the summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PasswordCheckArgs {
    /// Password to score
    pub(crate) password: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Reviewer note on the sample rejection; decides which wizard step opens first.
    #[arg(long, default_value = "กรุณาแนบเอกสารใบอนุญาตประกอบกิจการโรงงานฉบับล่าสุด")]
    pub(crate) admin_note: String,
    /// Comment sent to the reviewer with the resubmission.
    #[arg(long, default_value = "แนบเอกสารฉบับปรับปรุงแล้ว")]
    pub(crate) comment: String,
    /// Free-text search applied to the dashboard listing.
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Skip the dashboard portion of the demo.
    #[arg(long)]
    pub(crate) skip_dashboard: bool,
}

pub(crate) fn run_resubmission_map(args: ResubmissionMapArgs) -> Result<(), AppError> {
    let ResubmissionMapArgs { input, json } = args;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let rejection = parse_rejection(&raw)?;
    let wizard = StepWizard::from_rejection(&rejection)?;
    let draft = ResubmissionDraft::from_wizard(
        wizard,
        rejection.membership_id,
        rejection.rejection_reason,
        rejection.admin_note,
    );

    render_draft(&draft);
    if json {
        let form = serde_json::to_string_pretty(&draft.form_data)
            .map_err(|err| AppError::Malformed(err.to_string()))?;
        println!("{form}");
    }
    Ok(())
}

pub(crate) fn run_password_check(args: PasswordCheckArgs) -> Result<(), AppError> {
    let strength = PasswordStrength::of(&args.password);
    let criteria = strength.criteria;

    println!(
        "Password strength: {} ({}/{})",
        strength.label, strength.score, strength.max_score
    );
    for (met, label) in [
        (criteria.min_length, "at least 8 characters"),
        (criteria.recommended_length, "12 or more characters (recommended)"),
        (criteria.uppercase, "an uppercase letter"),
        (criteria.digit, "a digit"),
        (criteria.special, "a special character"),
    ] {
        println!("  [{}] {}", if met { "x" } else { " " }, label);
    }
    if !criteria.satisfies_policy() {
        println!("Registration would reject this password.");
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        admin_note,
        comment,
        search,
        skip_dashboard,
    } = args;

    println!("Member portal workflow demo");

    let rejection = sample_rejection(&admin_note)?;
    let membership_type = rejection.membership_type;
    let membership_id = rejection.membership_id.clone();
    let gateway = Arc::new(InMemoryMembershipGateway::with_rejection(
        DEMO_REJECTION_ID,
        rejection,
    ));
    let service = ResubmissionService::new(gateway.clone());

    let draft = service.load_draft(DEMO_REJECTION_ID).await?;
    render_draft(&draft);

    let mut wizard =
        StepWizard::at_step(membership_type, draft.form_data.clone(), draft.current_step);
    wizard.set_primary_representative(0)?;
    println!(
        "\nEdited in wizard: primary representative is now row {}",
        wizard.form().primary_representative().map_or(0, |index| index + 1)
    );

    let documents = draft
        .documents_to_reupload
        .iter()
        .map(|document_type| DocumentUpload {
            document_type: *document_type,
            file_name: format!("{}.pdf", document_type.as_str()),
            bytes: b"%PDF-1.4 demo".to_vec(),
        })
        .collect();
    let request = ResubmissionRequest {
        comment,
        form_data: wizard.into_form(),
        documents,
    };

    match service.submit(membership_type, &membership_id, request).await {
        Ok(receipt) => {
            let stages: Vec<&str> = receipt.completed.iter().map(|stage| stage.label()).collect();
            println!(
                "\nResubmitted {} {} -> stages {}",
                receipt.membership_type.label(),
                receipt.membership_id,
                stages.join(" > ")
            );
        }
        Err(err) => {
            println!("\nResubmission rejected: {}", err.user_message());
            return Ok(());
        }
    }
    println!("Upstream calls:");
    for call in gateway.calls() {
        match call {
            RecordedCall::Comment(text) => println!("  - comment: {text}"),
            RecordedCall::Update { fields } => println!("  - update: {fields} fields"),
            RecordedCall::Upload {
                document_type,
                bytes,
            } => println!("  - upload {document_type} ({bytes} bytes)"),
        }
    }

    let overview = service.overview(membership_type, &membership_id).await?;
    println!(
        "Upstream status {} with {} reviewer comments",
        overview.summary["status"],
        overview.comments.len()
    );

    if skip_dashboard {
        return Ok(());
    }

    let dashboard = sample_dashboard()?;
    let service = DashboardService::new(Arc::new(dashboard), DashboardConfig::default());
    let query = OperationQuery {
        user_id: DEMO_USER_ID.to_string(),
        search,
        ..OperationQuery::default()
    };
    let page = service.operations(&query).await?;

    println!(
        "\nDashboard (page {}/{}, {} items)",
        page.current_page, page.total_pages, page.total_items
    );
    for operation in &page.items {
        render_operation(operation);
    }

    Ok(())
}

fn parse_rejection(raw: &str) -> Result<RejectedApplication, AppError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| AppError::Malformed(format!("rejection record is not JSON: {err}")))?;
    // Accept either the bare record or the backend's `{ success, data }` envelope.
    let record = match value {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(record)
        .map_err(|err| AppError::Malformed(format!("unrecognised rejection record: {err}")))
}

fn render_draft(draft: &ResubmissionDraft) {
    println!(
        "\nRejected {} application {}",
        draft.membership_type.label(),
        draft.membership_id
    );
    if let Some(note) = &draft.admin_note {
        println!("Reviewer note: {note}");
    }
    println!("Wizard steps:");
    for step in draft.steps {
        let marker = if step.number == draft.current_step { ">" } else { " " };
        println!("  {marker} {}. {} ({})", step.number, step.title, step.title_en);
    }
    println!(
        "Pre-filled {} fields, {} representative(s)",
        draft.form_data.as_map().len(),
        draft.form_data.representatives().len()
    );
    if draft.documents_to_reupload.is_empty() {
        println!("All documents on file");
    } else {
        println!("Documents to re-upload:");
        for document in &draft.documents_to_reupload {
            println!("  - {} ({})", document.label(), document.as_str());
        }
    }
}

fn render_operation(operation: &Operation) {
    let context = operation.kind.status_context();
    println!(
        "  - {} | {} | {} | {}",
        operation.created_at.format("%Y-%m-%d %H:%M"),
        operation.kind.title(),
        operation.status.label(context),
        operation.description
    );
}

fn sample_rejection(admin_note: &str) -> Result<RejectedApplication, AppError> {
    let record = json!({
        "membershipType": "oc",
        "membershipId": 1207,
        "rejectionReason": { "code": "documents_outdated" },
        "adminNote": admin_note,
        "rejectionData": {
            "main": {
                "company_name_th": "บริษัท สยามพลาสติกอุตสาหกรรม จำกัด",
                "company_name_en": "Siam Plastic Industry Co., Ltd.",
                "tax_id": "0105558000123",
                "company_email": "info@siamplastic.co.th",
                "factory_type": "1",
                "number_of_employees": 340
            },
            "addresses": [
                {
                    "address_type": "2",
                    "address_number": "88/8",
                    "street": "บางนา-ตราด",
                    "province": "สมุทรปราการ",
                    "postal_code": "10540"
                }
            ],
            "representatives": [
                { "first_name_th": "วิชัย", "last_name_th": "มั่นคง", "is_primary": 0 },
                { "first_name_th": "อรุณี", "last_name_th": "ศรีสุข", "is_primary": 1 }
            ],
            "businessTypes": [{ "business_type": "manufacturer" }],
            "products": [{ "name_th": "บรรจุภัณฑ์พลาสติก", "name_en": "Plastic packaging" }],
            "documents": [
                { "document_type": "companyStamp", "file_url": "https://files.example.org/stamp.png" },
                { "document_type": "authorizedSignature", "file_url": "https://files.example.org/sign.png" },
                { "document_type": "productionImages", "file_url": "https://files.example.org/line.jpg" }
            ]
        }
    });
    serde_json::from_value(record).map_err(|err| AppError::Malformed(err.to_string()))
}

fn sample_dashboard() -> Result<InMemoryDashboardGateway, AppError> {
    Ok(InMemoryDashboardGateway::new(
        json!([
            {
                "id": 1,
                "title": "ยืนยันสมาชิกเดิม",
                "description": "บริษัท สยามพลาสติกอุตสาหกรรม จำกัด",
                "status": "pending",
                "created_at": "2024-03-02 10:15:00",
                "type": "member_verification",
                "company_name": "บริษัท สยามพลาสติกอุตสาหกรรม จำกัด",
                "member_code": "OC-1207"
            },
            {
                "id": 2,
                "title": "แก้ไขที่อยู่",
                "description": "ย้ายสำนักงานใหญ่",
                "status": "approved",
                "created_at": "2024-03-10T08:00:00",
                "type": "address_update"
            }
        ]),
        json!([
            {
                "id": 20,
                "subject": "สอบถามสิทธิประโยชน์สมาชิก",
                "message": "ต้องการทราบสิทธิประโยชน์ด้านการอบรม",
                "status": "read",
                "created_at": "2024-03-12 13:45:00"
            }
        ]),
        json!([
            {
                "id": 1,
                "company_name": "บริษัท สยามพลาสติกอุตสาหกรรม จำกัด",
                "member_code": "OC-1207",
                "status": 1,
                "created_at": "2024-03-02 10:15:00"
            }
        ]),
    )?)
}
