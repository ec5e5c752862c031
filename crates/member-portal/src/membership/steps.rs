use serde::Serialize;

use super::domain::MembershipType;

/// Role a wizard step plays; every membership type walks the same five roles in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    Identity,
    Representatives,
    Business,
    Documents,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub number: u8,
    pub key: StepKey,
    pub title: &'static str,
    pub title_en: &'static str,
}

const fn step(number: u8, key: StepKey, title: &'static str, title_en: &'static str) -> StepDefinition {
    StepDefinition {
        number,
        key,
        title,
        title_en,
    }
}

const CORPORATE_STEPS: &[StepDefinition] = &[
    step(1, StepKey::Identity, "ข้อมูลบริษัท", "Company information"),
    step(2, StepKey::Representatives, "ข้อมูลผู้แทน", "Representatives"),
    step(3, StepKey::Business, "ข้อมูลธุรกิจ", "Business information"),
    step(4, StepKey::Documents, "อัพโหลดเอกสาร", "Documents"),
    step(5, StepKey::Summary, "ยืนยันข้อมูล", "Review and confirm"),
];

const ASSOCIATION_STEPS: &[StepDefinition] = &[
    step(1, StepKey::Identity, "ข้อมูลสมาคม", "Association information"),
    step(2, StepKey::Representatives, "ข้อมูลผู้แทน", "Representatives"),
    step(3, StepKey::Business, "ข้อมูลธุรกิจ", "Business information"),
    step(4, StepKey::Documents, "อัพโหลดเอกสาร", "Documents"),
    step(5, StepKey::Summary, "ยืนยันข้อมูล", "Review and confirm"),
];

const INDIVIDUAL_STEPS: &[StepDefinition] = &[
    step(1, StepKey::Identity, "ข้อมูลผู้สมัคร", "Applicant information"),
    step(2, StepKey::Representatives, "ข้อมูลผู้แทน", "Representative"),
    step(3, StepKey::Business, "ข้อมูลธุรกิจ", "Business information"),
    step(4, StepKey::Documents, "อัพโหลดเอกสาร", "Documents"),
    step(5, StepKey::Summary, "ยืนยันข้อมูล", "Review and confirm"),
];

pub fn steps_for(membership_type: MembershipType) -> &'static [StepDefinition] {
    match membership_type {
        MembershipType::Oc | MembershipType::Ac => CORPORATE_STEPS,
        MembershipType::Am => ASSOCIATION_STEPS,
        MembershipType::Ic => INDIVIDUAL_STEPS,
    }
}

pub fn step_number(membership_type: MembershipType, key: StepKey) -> u8 {
    steps_for(membership_type)
        .iter()
        .find(|definition| definition.key == key)
        .map(|definition| definition.number)
        .unwrap_or(1)
}
