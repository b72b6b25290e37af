use serde::Serialize;

use crate::conversion::{Aggregate, FieldMut, FieldRef, FieldSource};

use super::ResourceVersionMatch;

/// Query parameters of a list or watch request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub allow_watch_bookmarks: bool,

    #[serde(rename = "continue", skip_serializing_if = "String::is_empty")]
    pub continue_token: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub field_selector: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub label_selector: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub limit: i64,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_version: String,

    #[serde(skip_serializing_if = "str::is_empty")]
    pub resource_version_match: ResourceVersionMatch,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_initial_events: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub watch: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl FieldSource for ListOptions {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        Some(match name {
            "allowWatchBookmarks" => {
                FieldRef::new("allowWatchBookmarks", &self.allow_watch_bookmarks)
            }
            "continue" => FieldRef::new("continue", &self.continue_token),
            "fieldSelector" => FieldRef::new("fieldSelector", &self.field_selector),
            "labelSelector" => FieldRef::new("labelSelector", &self.label_selector),
            "limit" => FieldRef::new("limit", &self.limit),
            "resourceVersion" => FieldRef::new("resourceVersion", &self.resource_version),
            "resourceVersionMatch" => {
                FieldRef::new("resourceVersionMatch", &self.resource_version_match)
            }
            "sendInitialEvents" => FieldRef::new("sendInitialEvents", &self.send_initial_events),
            "timeoutSeconds" => FieldRef::new("timeoutSeconds", &self.timeout_seconds),
            "watch" => FieldRef::new("watch", &self.watch),
            _ => return None,
        })
    }
}

impl Aggregate for ListOptions {
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        vec![
            FieldMut::new("allowWatchBookmarks", &mut self.allow_watch_bookmarks),
            FieldMut::new("continue", &mut self.continue_token),
            FieldMut::new("fieldSelector", &mut self.field_selector),
            FieldMut::new("labelSelector", &mut self.label_selector),
            FieldMut::new("limit", &mut self.limit),
            FieldMut::new("resourceVersion", &mut self.resource_version),
            FieldMut::new("resourceVersionMatch", &mut self.resource_version_match),
            FieldMut::new("sendInitialEvents", &mut self.send_initial_events),
            FieldMut::new("timeoutSeconds", &mut self.timeout_seconds),
            FieldMut::new("watch", &mut self.watch),
        ]
    }
}
