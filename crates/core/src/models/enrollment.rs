use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student-classroom enrollment within a session.
///
/// The session id is a key level dropped after fetching, and `pulled_at`
/// records when the row was retrieved; neither appears in output tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrollmentRecord {
    pub school_id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub classroom_id: i64,
    pub pulled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn enrollment_round_trip() {
        let record = EnrollmentRecord {
            school_id: 1,
            session_id: 7,
            student_id: 100,
            classroom_id: 10,
            pulled_at: Utc.with_ymd_and_hms(2026, 8, 23, 6, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EnrollmentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
