use serde_json::{Map, Value};

use super::domain::{MembershipType, RejectedApplication};
use super::form::FlatForm;
use super::mapping::{initial_step, map_rejection_data, table_for, MappingError};
use super::steps::{steps_for, StepDefinition};

/// Errors raised while driving a wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {requested} is outside 1..={total}")]
    StepOutOfRange { requested: u8, total: u8 },
    #[error("field '{field}' does not belong to step {step}")]
    ForeignField { field: String, step: u8 },
    #[error("representative {index} does not exist")]
    UnknownRepresentative { index: usize },
}

/// Multi-step application form: a bounded step index plus the flat form state.
#[derive(Debug, Clone, PartialEq)]
pub struct StepWizard {
    membership_type: MembershipType,
    current_step: u8,
    form: FlatForm,
}

impl StepWizard {
    pub fn new(membership_type: MembershipType, form: FlatForm) -> Self {
        Self::at_step(membership_type, form, 1)
    }

    /// Open at `step`, clamped into the valid range.
    pub fn at_step(membership_type: MembershipType, form: FlatForm, step: u8) -> Self {
        let total = steps_for(membership_type).len() as u8;
        Self {
            membership_type,
            current_step: step.clamp(1, total),
            form,
        }
    }

    /// Pre-fill from a rejected application, opening the step the reviewer's note points at.
    pub fn from_rejection(rejection: &RejectedApplication) -> Result<Self, MappingError> {
        let form = map_rejection_data(rejection.membership_type, rejection.rejection_data.clone())?;
        let step = initial_step(rejection.membership_type, rejection.admin_note.as_deref());
        Ok(Self::at_step(rejection.membership_type, form, step))
    }

    pub fn membership_type(&self) -> MembershipType {
        self.membership_type
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn total_steps(&self) -> u8 {
        self.steps().len() as u8
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        steps_for(self.membership_type)
    }

    pub fn current_definition(&self) -> &'static StepDefinition {
        &self.steps()[usize::from(self.current_step - 1)]
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_step < self.total_steps()
    }

    /// Advance one step; returns false at the last step.
    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current_step += 1;
        true
    }

    /// Go back one step; returns false at the first step.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current_step -= 1;
        true
    }

    pub fn go_to(&mut self, step: u8) -> Result<(), WizardError> {
        let total = self.total_steps();
        if step == 0 || step > total {
            return Err(WizardError::StepOutOfRange {
                requested: step,
                total,
            });
        }
        self.current_step = step;
        Ok(())
    }

    pub fn form(&self) -> &FlatForm {
        &self.form
    }

    pub fn into_form(self) -> FlatForm {
        self.form
    }

    /// Keys the current step's subform may write.
    pub fn current_fields(&self) -> Vec<&'static str> {
        table_for(self.membership_type).fields_for(self.current_definition().key)
    }

    /// Apply a subform patch. Rejected whole if any key belongs to another step.
    pub fn patch_current(&mut self, patch: Map<String, Value>) -> Result<(), WizardError> {
        let allowed = self.current_fields();
        if let Some(foreign) = patch.keys().find(|key| !allowed.contains(&key.as_str())) {
            return Err(WizardError::ForeignField {
                field: foreign.clone(),
                step: self.current_step,
            });
        }

        for (key, value) in patch {
            self.form.insert(key, value);
        }
        Ok(())
    }

    /// Make `index` the only primary representative.
    pub fn set_primary_representative(&mut self, index: usize) -> Result<(), WizardError> {
        let rows = self.form.representatives_mut();
        if index >= rows.len() {
            return Err(WizardError::UnknownRepresentative { index });
        }
        for (position, row) in rows.iter_mut().enumerate() {
            if let Value::Object(fields) = row {
                fields.insert("isPrimary".to_string(), Value::Bool(position == index));
            }
        }
        Ok(())
    }

    /// Remove a representative, promoting the first remaining row when the primary goes.
    pub fn remove_representative(&mut self, index: usize) -> Result<Value, WizardError> {
        let rows = self.form.representatives_mut();
        if index >= rows.len() {
            return Err(WizardError::UnknownRepresentative { index });
        }
        let removed = rows.remove(index);

        let had_primary = rows
            .iter()
            .any(|row| row.get("isPrimary").and_then(Value::as_bool) == Some(true));
        if !had_primary {
            if let Some(Value::Object(first)) = rows.first_mut() {
                first.insert("isPrimary".to_string(), Value::Bool(true));
            }
        }

        Ok(removed)
    }
}
