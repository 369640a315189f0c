use serde::Serialize;
use tracing::info;

use crate::{
    error::{ClientError, FormError},
    gateway::EntityGateway,
};

/// One validation rule over a draft value: a predicate plus the message
/// surfaced when it fails.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub message: &'static str,
    check: fn(&T) -> bool,
}

impl<T> FieldRule<T> {
    pub fn new(field: &'static str, message: &'static str, check: fn(&T) -> bool) -> Self {
        Self {
            field,
            message,
            check,
        }
    }

    fn holds(&self, draft: &T) -> bool {
        (self.check)(draft)
    }
}

/// Generic create/update form: a draft value, its validation rules and the
/// backend collection it saves to. Replaces the per-entity copies of the same
/// validate-then-submit shape (customers, products, stock, expenses, ...).
pub struct EntityForm<T: Serialize> {
    path: &'static str,
    draft: T,
    rules: Vec<FieldRule<T>>,
    existing_id: Option<i64>,
}

impl<T: Serialize> EntityForm<T> {
    pub fn new(path: &'static str, draft: T) -> Self {
        Self {
            path,
            draft,
            rules: Vec::new(),
            existing_id: None,
        }
    }

    pub fn with_rule(
        mut self,
        field: &'static str,
        message: &'static str,
        check: fn(&T) -> bool,
    ) -> Self {
        self.rules.push(FieldRule::new(field, message, check));
        self
    }

    /// Switches the form to edit mode; `submit` will update instead of create.
    pub fn editing(mut self, id: i64) -> Self {
        self.existing_id = Some(id);
        self
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    /// Runs every rule; all failures are collected so the user sees the full
    /// list at once rather than one message per attempt.
    pub fn validate(&self) -> Result<(), FormError> {
        let failures: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| !rule.holds(&self.draft))
            .map(|rule| format!("{}: {}", rule.field, rule.message))
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(failures))
        }
    }

    /// Validates then saves through the gateway. Validation failures return
    /// before any network call.
    pub async fn submit(
        &self,
        gateway: &dyn EntityGateway,
    ) -> Result<serde_json::Value, ClientError> {
        self.validate()?;
        let body = serde_json::to_value(&self.draft)?;
        info!(path = self.path, edit = self.is_edit(), "submitting entity form");
        let saved = match self.existing_id {
            Some(id) => gateway.save_existing(self.path, id, body).await?,
            None => gateway.save_new(self.path, body).await?,
        };
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "tests/entity_form_tests.rs"]
mod tests;
