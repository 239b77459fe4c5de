use serde::{Deserialize, Serialize};

/// A school record. Source of truth for name lookups joined onto other
/// entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct School {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_round_trip() {
        let school = School {
            id: 1,
            name: "Sunshine".to_string(),
        };
        let json = serde_json::to_string(&school).unwrap();
        let back: School = serde_json::from_str(&json).unwrap();
        assert_eq!(back, school);
    }
}
