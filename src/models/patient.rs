use serde::{Deserialize, Serialize};

/// A registered user with the patient role.
///
/// `user_id` is the stable identity; appointments do not carry it and are
/// joined to a patient by email instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub user_id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, rename = "avatar", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_contact_fields_missing() {
        let json = r#"{
            "user_id": 7,
            "name": "Lucía",
            "last_name": "Serrano",
            "email": "lucia@example.com"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.user_id, 7);
        assert!(patient.phone.is_none());
        assert!(patient.avatar_url.is_none());
    }

    #[test]
    fn maps_avatar_wire_name() {
        let json = r#"{
            "user_id": 7,
            "name": "Lucía",
            "last_name": "Serrano",
            "email": "lucia@example.com",
            "phone": "600111222",
            "avatar": "https://img.example.com/lucia.png"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.phone.as_deref(), Some("600111222"));
        assert_eq!(
            patient.avatar_url.as_deref(),
            Some("https://img.example.com/lucia.png")
        );
    }

    #[test]
    fn full_name_joins_both_parts() {
        let patient = Patient {
            user_id: 1,
            name: "Lucía".into(),
            last_name: "Serrano".into(),
            email: "lucia@example.com".into(),
            phone: None,
            avatar_url: None,
        };
        assert_eq!(patient.full_name(), "Lucía Serrano");
    }
}
