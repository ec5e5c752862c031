use super::table::{
    AddressLayout, AffiliationRule, BusinessTypeRule, CollectionRule, ColumnRule, FieldRule,
    MappingTable, TagShape,
};
use crate::membership::domain::{DocumentType, MembershipType};

const ADDRESS_COLUMNS: &[ColumnRule] = &[
    ColumnRule::new("addressNumber", &["address_number", "addressNumber"]),
    ColumnRule::new("building", &["building"]),
    ColumnRule::new("moo", &["moo"]),
    ColumnRule::new("soi", &["soi"]),
    ColumnRule::new("street", &["street", "road"]),
    ColumnRule::new("subDistrict", &["sub_district", "subDistrict"]),
    ColumnRule::new("district", &["district"]),
    ColumnRule::new("province", &["province"]),
    ColumnRule::new("postalCode", &["postal_code", "postalCode"]),
    ColumnRule::new("phone", &["phone"]),
    ColumnRule::new("phoneExtension", &["phone_extension"]),
    ColumnRule::new("email", &["email"]),
    ColumnRule::new("website", &["website"]),
];

const REPRESENTATIVES: CollectionRule = CollectionRule {
    dest: "representatives",
    key_prefix: "rep",
    columns: &[
        ColumnRule::new("prenameTh", &["prename_th"]),
        ColumnRule::new("firstNameThai", &["first_name_th", "first_name_thai"]),
        ColumnRule::new("lastNameThai", &["last_name_th", "last_name_thai"]),
        ColumnRule::new("firstNameEnglish", &["first_name_en", "first_name_eng"]),
        ColumnRule::new("lastNameEnglish", &["last_name_en", "last_name_eng"]),
        ColumnRule::new("position", &["position"]),
        ColumnRule::new("email", &["email"]),
        ColumnRule::new("phone", &["phone"]),
        ColumnRule::new("phoneExtension", &["phone_extension"]),
    ],
};

const PRODUCTS: CollectionRule = CollectionRule {
    dest: "products",
    key_prefix: "product",
    columns: &[
        ColumnRule::new("nameTh", &["name_th", "product_name_th"]),
        ColumnRule::new("nameEn", &["name_en", "product_name_en"]),
    ],
};

const TAG_SOURCES: &[&str] = &["business_type", "businessType", "type"];
const DETAIL_SOURCES: &[&str] = &["detail", "other_type", "other_detail"];

const AFFILIATIONS: &[AffiliationRule] = &[
    AffiliationRule {
        snapshot_keys: &["industrialGroups", "industrial_groups", "industryGroups"],
        ids_dest: "industrialGroupIds",
        names_dest: "industrialGroupNames",
        id_sources: &["industry_group_id", "industrial_group_id", "id"],
        name_sources: &["industry_group_name", "industrial_group_name", "name_th", "name"],
    },
    AffiliationRule {
        snapshot_keys: &["provincialChapters", "provincial_chapters", "provinceChapters"],
        ids_dest: "provincialChapterIds",
        names_dest: "provincialChapterNames",
        id_sources: &["province_chapter_id", "provincial_chapter_id", "id"],
        name_sources: &[
            "province_chapter_name",
            "provincial_chapter_name",
            "name_th",
            "name",
        ],
    },
];

static OC_TABLE: MappingTable = MappingTable {
    membership_type: MembershipType::Oc,
    flat_marker: "companyName",
    scalars: &[
        FieldRule::identity("companyName", &["company_name_th", "company_name"]),
        FieldRule::identity("companyNameEng", &["company_name_en", "company_name_eng"]),
        FieldRule::identity("taxId", &["tax_id"]),
        FieldRule::identity("companyEmail", &["company_email", "email"]),
        FieldRule::identity("companyPhone", &["company_phone", "phone"]),
        FieldRule::identity("companyPhoneExtension", &["company_phone_extension"]),
        FieldRule::identity("companyWebsite", &["company_website", "website"]),
        FieldRule::business("factoryType", &["factory_type"]),
        FieldRule::business("numberOfEmployees", &["number_of_employees"]),
        FieldRule::business("registeredCapital", &["registered_capital"]),
        FieldRule::business("productionCapacityValue", &["production_capacity_value"]),
        FieldRule::business("productionCapacityUnit", &["production_capacity_unit"]),
        FieldRule::business("salesDomestic", &["sales_domestic"]),
        FieldRule::business("salesExport", &["sales_export"]),
        FieldRule::business("shareholderThaiPercent", &["shareholder_thai_percent"]),
        FieldRule::business("shareholderForeignPercent", &["shareholder_foreign_percent"]),
    ],
    address_layout: AddressLayout::ByType { dest: "addresses" },
    address_columns: ADDRESS_COLUMNS,
    representatives: REPRESENTATIVES,
    business_types: BusinessTypeRule {
        dest: "businessTypes",
        shape: TagShape::Map,
        other_dest: "otherBusinessTypeDetail",
        tag_sources: TAG_SOURCES,
        detail_sources: DETAIL_SOURCES,
    },
    products: PRODUCTS,
    affiliations: AFFILIATIONS,
    documents: &[
        DocumentType::FactoryLicense,
        DocumentType::IndustrialEstateLicense,
        DocumentType::ProductionImages,
        DocumentType::CompanyStamp,
        DocumentType::AuthorizedSignature,
    ],
};

static AM_TABLE: MappingTable = MappingTable {
    membership_type: MembershipType::Am,
    flat_marker: "associationName",
    scalars: &[
        FieldRule::identity(
            "associationName",
            &["company_name_th", "association_name_th", "company_name"],
        ),
        FieldRule::identity(
            "associationNameEng",
            &["company_name_en", "association_name_en"],
        ),
        FieldRule::identity("taxId", &["tax_id"]),
        FieldRule::identity(
            "associationEmail",
            &["company_email", "association_email", "email"],
        ),
        FieldRule::identity(
            "associationPhone",
            &["company_phone", "association_phone", "phone"],
        ),
        FieldRule::identity(
            "associationPhoneExtension",
            &["company_phone_extension", "association_phone_extension"],
        ),
        FieldRule::identity("associationWebsite", &["company_website", "website"]),
        FieldRule::business("numberOfMember", &["number_of_member", "member_count"]),
        FieldRule::business("numberOfEmployees", &["number_of_employees"]),
        FieldRule::business("registeredCapital", &["registered_capital"]),
    ],
    address_layout: AddressLayout::ByType { dest: "addresses" },
    address_columns: ADDRESS_COLUMNS,
    representatives: REPRESENTATIVES,
    business_types: BusinessTypeRule {
        dest: "businessTypes",
        shape: TagShape::Map,
        other_dest: "otherBusinessTypeDetail",
        tag_sources: TAG_SOURCES,
        detail_sources: DETAIL_SOURCES,
    },
    products: PRODUCTS,
    affiliations: AFFILIATIONS,
    documents: &[
        DocumentType::AssociationCertificate,
        DocumentType::MemberList,
        DocumentType::CompanyStamp,
        DocumentType::AuthorizedSignature,
    ],
};

static AC_TABLE: MappingTable = MappingTable {
    membership_type: MembershipType::Ac,
    flat_marker: "companyName",
    scalars: &[
        FieldRule::identity("companyName", &["company_name_th", "company_name"]),
        FieldRule::identity("companyNameEng", &["company_name_en", "company_name_eng"]),
        FieldRule::identity("taxId", &["tax_id"]),
        FieldRule::identity("companyEmail", &["company_email", "email"]),
        FieldRule::identity("companyPhone", &["company_phone", "phone"]),
        FieldRule::identity("companyPhoneExtension", &["company_phone_extension"]),
        FieldRule::identity("companyWebsite", &["company_website", "website"]),
        FieldRule::business("numberOfEmployees", &["number_of_employees"]),
        FieldRule::business("registeredCapital", &["registered_capital"]),
        FieldRule::business("revenueLastYear", &["revenue_last_year"]),
        FieldRule::business("revenuePreviousYear", &["revenue_previous_year"]),
    ],
    address_layout: AddressLayout::ByType { dest: "addresses" },
    address_columns: ADDRESS_COLUMNS,
    representatives: REPRESENTATIVES,
    business_types: BusinessTypeRule {
        dest: "businessTypes",
        shape: TagShape::Map,
        other_dest: "otherBusinessTypeDetail",
        tag_sources: TAG_SOURCES,
        detail_sources: DETAIL_SOURCES,
    },
    products: PRODUCTS,
    affiliations: AFFILIATIONS,
    documents: &[
        DocumentType::CompanyRegistration,
        DocumentType::CompanyStamp,
        DocumentType::AuthorizedSignature,
    ],
};

static IC_TABLE: MappingTable = MappingTable {
    membership_type: MembershipType::Ic,
    flat_marker: "idCardNumber",
    scalars: &[
        FieldRule::identity("idCardNumber", &["id_card_number"]),
        FieldRule::identity("prenameTh", &["prename_th"]),
        FieldRule::identity("firstNameThai", &["first_name_th", "first_name_thai"]),
        FieldRule::identity("lastNameThai", &["last_name_th", "last_name_thai"]),
        FieldRule::identity("firstNameEng", &["first_name_en", "first_name_eng"]),
        FieldRule::identity("lastNameEng", &["last_name_en", "last_name_eng"]),
        FieldRule::identity("email", &["email"]),
        FieldRule::identity("phone", &["phone"]),
        FieldRule::identity("phoneExtension", &["phone_extension"]),
        FieldRule::identity("website", &["website"]),
    ],
    address_layout: AddressLayout::Single { dest: "address" },
    address_columns: ADDRESS_COLUMNS,
    representatives: REPRESENTATIVES,
    business_types: BusinessTypeRule {
        dest: "businessTypes",
        shape: TagShape::List,
        other_dest: "otherBusinessTypeDetail",
        tag_sources: TAG_SOURCES,
        detail_sources: DETAIL_SOURCES,
    },
    products: PRODUCTS,
    affiliations: AFFILIATIONS,
    documents: &[
        DocumentType::IdCardDocument,
        DocumentType::AuthorizedSignature,
    ],
};

/// Mapping table for a membership type.
pub fn table_for(membership_type: MembershipType) -> &'static MappingTable {
    match membership_type {
        MembershipType::Oc => &OC_TABLE,
        MembershipType::Am => &AM_TABLE,
        MembershipType::Ac => &AC_TABLE,
        MembershipType::Ic => &IC_TABLE,
    }
}
