use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Label SecZetta attaches to the saved search backing the lookup.
const SEARCH_LABEL: &str = "All Contractors";

/// Request body for `POST /advanced_search/run`.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedSearchRequest {
    pub advanced_search: AdvancedSearch,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedSearch {
    pub label: String,
    pub condition_rules_attributes: Vec<ConditionRule>,
}

/// One condition of the advanced search. SecZetta distinguishes rule kinds
/// by the `type` field; profile-type rules carry no condition object.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    pub comparison_operator: String,
    pub value: Option<String>,
}

impl ConditionRule {
    /// "profile type == `profile_type_id`"
    pub fn profile_type(profile_type_id: Option<&str>) -> Self {
        Self {
            rule_type: "ProfileTypeRule".to_string(),
            condition_object_id: None,
            object_type: None,
            comparison_operator: "==".to_string(),
            value: profile_type_id.map(str::to_string),
        }
    }

    /// "attribute `attribute_id` == `value`"
    pub fn attribute(attribute_id: Option<&str>, value: &str) -> Self {
        Self {
            rule_type: "ProfileAttributeRule".to_string(),
            condition_object_id: attribute_id.map(str::to_string),
            object_type: Some("NeAttribute".to_string()),
            comparison_operator: "==".to_string(),
            value: Some(value.to_string()),
        }
    }
}

impl AdvancedSearchRequest {
    /// Search matching profiles of the configured type whose configured
    /// attribute equals the user's lookup value.
    pub fn for_lookup(
        profile_type_id: Option<&str>,
        attribute_id: Option<&str>,
        lookup_value: &str,
    ) -> Self {
        Self {
            advanced_search: AdvancedSearch {
                label: SEARCH_LABEL.to_string(),
                condition_rules_attributes: vec![
                    ConditionRule::profile_type(profile_type_id),
                    ConditionRule::attribute(attribute_id, lookup_value),
                ],
            },
        }
    }
}

/// Non-employee profile record returned by the search. Only `id` is
/// consumed downstream; the rest mirrors the documented API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_type_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
}
