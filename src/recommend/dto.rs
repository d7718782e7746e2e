use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::profile::repo_types::NewProfile;
use crate::recommend::sections::Plan;

/// Form fields exactly as typed by the user. Numbers are accepted too and
/// kept in their textual form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub height: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub goal: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub activity_level: String,
}

fn text_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!("expected text or number, got {other}"))),
    }
}

/// Body of `POST /generate-recommendation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub age: i32,
    pub weight: f64,
    pub height: i32,
    pub goal: String,
    pub activity_level: String,
}

impl From<RecommendationRequest> for NewProfile {
    fn from(r: RecommendationRequest) -> Self {
        Self {
            age: r.age,
            weight: r.weight,
            height: r.height,
            goal: r.goal,
            activity_level: r.activity_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub recommendation: String,
    pub plan: Plan,
    pub saved: bool,
}
