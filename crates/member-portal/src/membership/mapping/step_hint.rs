use crate::membership::domain::MembershipType;
use crate::membership::steps::{step_number, StepKey};

const CORPORATE_IDENTITY: &[&str] = &[
    "บริษัท",
    "สมาคม",
    "ที่อยู่",
    "เลขประจำตัวผู้เสียภาษี",
    "company",
    "association",
    "address",
    "tax id",
];

const INDIVIDUAL_IDENTITY: &[&str] = &[
    "ผู้สมัคร",
    "บัตรประชาชน",
    "ที่อยู่",
    "applicant",
    "id card",
    "personal",
    "address",
];

const REPRESENTATIVE: &[&str] = &["ผู้แทน", "ผู้ติดต่อ", "representative", "contact person"];

const BUSINESS: &[&str] = &[
    "ธุรกิจ",
    "สินค้า",
    "ผลิตภัณฑ์",
    "กลุ่มอุตสาหกรรม",
    "สภาจังหวัด",
    "business",
    "product",
    "industry",
];

const DOCUMENT: &[&str] = &["เอกสาร", "ไฟล์", "ลายเซ็น", "document", "file", "signature", "attachment"];

/// Pick the wizard step a resubmission opens on from the reviewer's free-text note.
///
/// Categories are checked in step order and the first category with any keyword in the note
/// wins; no match (or no note) opens step 1. Thai keywords match anywhere since Thai is written
/// without spaces; English keywords must stand as whole words, optionally plural.
pub fn initial_step(membership_type: MembershipType, admin_note: Option<&str>) -> u8 {
    let Some(note) = admin_note else {
        return 1;
    };
    let haystack = note.to_lowercase();

    let identity = if membership_type.is_individual() {
        INDIVIDUAL_IDENTITY
    } else {
        CORPORATE_IDENTITY
    };

    let categories: [(StepKey, &[&str]); 4] = [
        (StepKey::Identity, identity),
        (StepKey::Representatives, REPRESENTATIVE),
        (StepKey::Business, BUSINESS),
        (StepKey::Documents, DOCUMENT),
    ];

    categories
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| mentions(&haystack, keyword)))
        .map(|(step, _)| step_number(membership_type, *step))
        .unwrap_or(1)
}

fn mentions(haystack: &str, keyword: &str) -> bool {
    if !keyword.is_ascii() {
        return haystack.contains(keyword);
    }
    haystack.match_indices(keyword).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = &haystack[start + keyword.len()..];
        let after = after.strip_prefix('s').unwrap_or(after);
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
    })
}
