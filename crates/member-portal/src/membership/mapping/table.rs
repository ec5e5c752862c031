use crate::membership::domain::{DocumentType, MembershipType};
use crate::membership::steps::StepKey;

/// Copies the first present source column of a row into `dest`, or `""` when none is present.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub dest: &'static str,
    pub sources: &'static [&'static str],
}

impl ColumnRule {
    pub const fn new(dest: &'static str, sources: &'static [&'static str]) -> Self {
        Self { dest, sources }
    }
}

/// A top-level scalar copied from the snapshot's `main` record, owned by one wizard step.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub column: ColumnRule,
    pub step: StepKey,
}

impl FieldRule {
    pub const fn identity(dest: &'static str, sources: &'static [&'static str]) -> Self {
        Self {
            column: ColumnRule::new(dest, sources),
            step: StepKey::Identity,
        }
    }

    pub const fn business(dest: &'static str, sources: &'static [&'static str]) -> Self {
        Self {
            column: ColumnRule::new(dest, sources),
            step: StepKey::Business,
        }
    }
}

/// Where address rows land in the flat form.
#[derive(Debug, Clone, Copy)]
pub enum AddressLayout {
    /// `{"1": {...}, "2": {...}, "3": {...}}` keyed by address type code.
    ByType { dest: &'static str },
    /// A single flat address object built from the first row.
    Single { dest: &'static str },
}

impl AddressLayout {
    pub const fn dest(self) -> &'static str {
        match self {
            AddressLayout::ByType { dest } | AddressLayout::Single { dest } => dest,
        }
    }
}

/// Shape business-type tags reduce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagShape {
    /// `{"manufacturer": true}`
    Map,
    /// `["manufacturer"]`
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct BusinessTypeRule {
    pub dest: &'static str,
    pub shape: TagShape,
    pub other_dest: &'static str,
    pub tag_sources: &'static [&'static str],
    pub detail_sources: &'static [&'static str],
}

/// Row collection mapped element-wise with a generated client-side key per row.
#[derive(Debug, Clone, Copy)]
pub struct CollectionRule {
    pub dest: &'static str,
    pub key_prefix: &'static str,
    pub columns: &'static [ColumnRule],
}

/// Affiliation references (industrial groups, provincial chapters) reduced to id/name arrays.
#[derive(Debug, Clone, Copy)]
pub struct AffiliationRule {
    pub snapshot_keys: &'static [&'static str],
    pub ids_dest: &'static str,
    pub names_dest: &'static str,
    pub id_sources: &'static [&'static str],
    pub name_sources: &'static [&'static str],
}

/// Declarative nested→flat mapping for one membership type.
#[derive(Debug, Clone, Copy)]
pub struct MappingTable {
    pub membership_type: MembershipType,
    /// Key whose presence marks a payload as already flat.
    pub flat_marker: &'static str,
    pub scalars: &'static [FieldRule],
    pub address_layout: AddressLayout,
    pub address_columns: &'static [ColumnRule],
    pub representatives: CollectionRule,
    pub business_types: BusinessTypeRule,
    pub products: CollectionRule,
    pub affiliations: &'static [AffiliationRule],
    pub documents: &'static [DocumentType],
}

impl MappingTable {
    /// Flat keys a wizard step reads and writes.
    pub fn fields_for(&self, step: StepKey) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = self
            .scalars
            .iter()
            .filter(|rule| rule.step == step)
            .map(|rule| rule.column.dest)
            .collect();

        match step {
            StepKey::Identity => fields.push(self.address_layout.dest()),
            StepKey::Representatives => fields.push(self.representatives.dest),
            StepKey::Business => {
                fields.push(self.business_types.dest);
                fields.push(self.business_types.other_dest);
                fields.push(self.products.dest);
                for affiliation in self.affiliations {
                    fields.push(affiliation.ids_dest);
                    fields.push(affiliation.names_dest);
                }
            }
            StepKey::Documents => {
                fields.extend(self.documents.iter().map(|document| document.as_str()))
            }
            StepKey::Summary => {}
        }

        fields
    }

    /// Every key the mapper guarantees to emit.
    pub fn output_keys(&self) -> Vec<&'static str> {
        [
            StepKey::Identity,
            StepKey::Representatives,
            StepKey::Business,
            StepKey::Documents,
        ]
        .into_iter()
        .flat_map(|step| self.fields_for(step))
        .collect()
    }
}
