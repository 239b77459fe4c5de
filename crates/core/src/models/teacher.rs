use serde::{Deserialize, Serialize};

/// A teacher at a school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_round_trip() {
        let teacher = Teacher {
            school_id: 1,
            first_name: "Grace".to_string(),
            last_name: "Adams".to_string(),
            email: Some("gadams@sunshine.edu".to_string()),
        };
        let json = serde_json::to_string(&teacher).unwrap();
        let back: Teacher = serde_json::from_str(&json).unwrap();
        assert_eq!(back, teacher);
    }
}
