use serde::Serialize;

use crate::conversion::{Aggregate, FieldMut, FieldRef, FieldSource};

use super::DeletionPropagation;

/// Query parameters of a delete request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dry_run: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_seconds: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphan_dependents: Option<bool>,

    #[serde(skip_serializing_if = "str::is_empty")]
    pub propagation_policy: DeletionPropagation,
}

impl FieldSource for DeleteOptions {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        Some(match name {
            "dryRun" => FieldRef::new("dryRun", &self.dry_run),
            "gracePeriodSeconds" => FieldRef::new("gracePeriodSeconds", &self.grace_period_seconds),
            "orphanDependents" => FieldRef::new("orphanDependents", &self.orphan_dependents),
            "propagationPolicy" => FieldRef::new("propagationPolicy", &self.propagation_policy),
            _ => return None,
        })
    }
}

impl Aggregate for DeleteOptions {
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        vec![
            FieldMut::new("dryRun", &mut self.dry_run),
            FieldMut::new("gracePeriodSeconds", &mut self.grace_period_seconds),
            FieldMut::new("orphanDependents", &mut self.orphan_dependents),
            FieldMut::new("propagationPolicy", &mut self.propagation_policy),
        ]
    }
}
