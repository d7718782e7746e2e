use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Profile fields as supplied by a caller; the store stamps `last_updated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub age: i32,
    pub weight: f64,
    pub height: i32,
    pub goal: String,
    pub activity_level: String,
}

impl NewProfile {
    pub fn stamped(self, at: OffsetDateTime) -> UserProfile {
        UserProfile {
            age: self.age,
            weight: self.weight,
            height: self.height,
            goal: self.goal,
            activity_level: self.activity_level,
            last_updated: at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: i32,
    pub weight: f64,
    pub height: i32,
    pub goal: String,
    pub activity_level: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl UserProfile {
    pub fn without_timestamp(&self) -> NewProfile {
        NewProfile {
            age: self.age,
            weight: self.weight,
            height: self.height,
            goal: self.goal.clone(),
            activity_level: self.activity_level.clone(),
        }
    }
}

/// A past recommendation together with the profile that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationHistoryEntry {
    pub id: String, // unix millis at creation
    pub recommendation: String,
    pub profile: UserProfile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod repo_types_tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn profile_uses_camel_case_keys() {
        let profile = NewProfile {
            age: 25,
            weight: 70.0,
            height: 175,
            goal: "похудеть".into(),
            activity_level: "сидячий".into(),
        }
        .stamped(datetime!(2025-03-01 12:00 UTC));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["activityLevel"], "сидячий");
        assert_eq!(json["lastUpdated"], "2025-03-01T12:00:00Z");
        assert!(json.get("activity_level").is_none());
    }

    #[test]
    fn history_entry_reads_stored_layout() {
        let raw = r####"{
            "id": "1740830400000",
            "recommendation": "### Сон\nспать 8 часов",
            "profile": {
                "age": 30, "weight": 82.5, "height": 180,
                "goal": "набрать массу", "activityLevel": "активный",
                "lastUpdated": "2025-03-01T12:00:00.000Z"
            },
            "createdAt": "2025-03-01T12:00:00.123Z"
        }"####;

        let entry: RecommendationHistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, "1740830400000");
        assert_eq!(entry.profile.weight, 82.5);
        assert_eq!(entry.profile.activity_level, "активный");
        assert_eq!(entry.created_at.millisecond(), 123);
    }
}
