pub mod transparent_classroom;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    classroom::Classroom, enrollment::EnrollmentRecord, school::School, student::Student,
    teacher::Teacher,
};

/// Trait for roster data sources.
///
/// The combine step only depends on this seam, so tests can feed it fixture
/// data without a network.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_schools(&self) -> Result<Vec<School>>;
    async fn fetch_enrollments(
        &self,
        school_ids: &[i64],
        only_current: bool,
    ) -> Result<Vec<EnrollmentRecord>>;
    async fn fetch_classrooms(&self, school_ids: &[i64]) -> Result<Vec<Classroom>>;
    async fn fetch_students(&self, school_ids: &[i64], only_current: bool)
    -> Result<Vec<Student>>;
    async fn fetch_teachers(&self, school_ids: &[i64]) -> Result<Vec<Teacher>>;
    async fn test_connection(&self) -> Result<()>;
}
