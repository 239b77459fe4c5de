use serde::{Deserialize, Serialize};

/// A classroom, keyed by (school id, classroom id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classroom {
    pub school_id: i64,
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classroom_round_trip() {
        let classroom = Classroom {
            school_id: 1,
            id: 10,
            name: "Room A".to_string(),
        };
        let json = serde_json::to_string(&classroom).unwrap();
        let back: Classroom = serde_json::from_str(&json).unwrap();
        assert_eq!(back, classroom);
    }
}
