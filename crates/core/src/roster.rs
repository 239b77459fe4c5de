//! Join and sort roster record sets into the two combined output tables.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{info, warn};

use crate::connectors::RosterSource;
use crate::error::Result;
use crate::models::classroom::Classroom;
use crate::models::enrollment::EnrollmentRecord;
use crate::models::roster::{StudentRosterRow, TeacherRosterRow};
use crate::models::school::School;
use crate::models::student::Student;
use crate::models::teacher::Teacher;

/// Fetch the five record sets and combine them into the student and teacher
/// roster tables.
///
/// Fetches are strictly sequential. Failures from the source propagate
/// unmodified; an empty join result is not an error.
pub async fn fetch_rosters(
    source: &dyn RosterSource,
    only_current: bool,
) -> Result<(Vec<StudentRosterRow>, Vec<TeacherRosterRow>)> {
    info!(only_current, "Fetching schools");
    let schools = source.fetch_schools().await?;
    let school_ids: Vec<i64> = schools.iter().map(|s| s.id).collect();
    info!(count = schools.len(), "Fetched schools");

    info!("Fetching enrollments");
    let enrollments = source.fetch_enrollments(&school_ids, only_current).await?;
    info!(count = enrollments.len(), "Fetched enrollments");

    info!("Fetching classrooms");
    let classrooms = source.fetch_classrooms(&school_ids).await?;
    info!(count = classrooms.len(), "Fetched classrooms");

    info!("Fetching students");
    let students = source.fetch_students(&school_ids, only_current).await?;
    info!(count = students.len(), "Fetched students");

    info!("Fetching teachers");
    let teachers = source.fetch_teachers(&school_ids).await?;
    info!(count = teachers.len(), "Fetched teachers");

    let student_table = combine_students(&enrollments, &schools, &classrooms, &students);
    let teacher_table = combine_teachers(&teachers, &schools);

    info!(
        student_rows = student_table.len(),
        teacher_rows = teacher_table.len(),
        "Combined roster tables"
    );

    Ok((student_table, teacher_table))
}

/// Build the combined student table.
///
/// Starts from enrollment records (session id and pull timestamp dropped),
/// left-joins school and classroom names, and inner-joins the demographic
/// projection by (school id, student id). Enrollments without a matching
/// demographic record are excluded.
pub fn combine_students(
    enrollments: &[EnrollmentRecord],
    schools: &[School],
    classrooms: &[Classroom],
    students: &[Student],
) -> Vec<StudentRosterRow> {
    let school_names: HashMap<i64, &str> =
        schools.iter().map(|s| (s.id, s.name.as_str())).collect();
    let classroom_names: HashMap<(i64, i64), &str> = classrooms
        .iter()
        .map(|c| ((c.school_id, c.id), c.name.as_str()))
        .collect();
    let demographics: HashMap<(i64, i64), &Student> = students
        .iter()
        .map(|s| ((s.school_id, s.id), s))
        .collect();

    let mut dropped = 0usize;
    let mut rows: Vec<StudentRosterRow> = Vec::with_capacity(enrollments.len());

    for enrollment in enrollments {
        let key = (enrollment.school_id, enrollment.student_id);
        let Some(student) = demographics.get(&key) else {
            dropped += 1;
            continue;
        };

        rows.push(StudentRosterRow {
            school_id: enrollment.school_id,
            school_name: school_names
                .get(&enrollment.school_id)
                .map(|n| n.to_string()),
            classroom_id: enrollment.classroom_id,
            classroom_name: classroom_names
                .get(&(enrollment.school_id, enrollment.classroom_id))
                .map(|n| n.to_string()),
            student_id: enrollment.student_id,
            first_name: student.first_name.clone(),
            middle_name: student.middle_name.clone(),
            last_name: student.last_name.clone(),
            birth_date: student.birth_date.clone(),
            gender: student.gender.clone(),
            dominant_language: student.dominant_language.clone(),
            ethnicity: student.ethnicity.clone(),
            grade: student.grade.clone(),
            first_day: student.first_day.clone(),
            last_day: student.last_day.clone(),
            student_id_alt: student.student_id_alt.clone(),
        });
    }

    if dropped > 0 {
        warn!(dropped, "Excluded enrollments without demographic records");
    }

    rows.sort_by(|a, b| {
        cmp_opt(&a.school_name, &b.school_name)
            .then_with(|| cmp_opt(&a.classroom_name, &b.classroom_name))
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
    });

    rows
}

/// Build the combined teacher table: left-join school name, project to the
/// fixed column set, sort.
pub fn combine_teachers(teachers: &[Teacher], schools: &[School]) -> Vec<TeacherRosterRow> {
    let school_names: HashMap<i64, &str> =
        schools.iter().map(|s| (s.id, s.name.as_str())).collect();

    let mut rows: Vec<TeacherRosterRow> = teachers
        .iter()
        .map(|t| TeacherRosterRow {
            school_name: school_names.get(&t.school_id).map(|n| n.to_string()),
            first_name: t.first_name.clone(),
            last_name: t.last_name.clone(),
            email: t.email.clone(),
        })
        .collect();

    rows.sort_by(|a, b| {
        cmp_opt(&a.school_name, &b.school_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
    });

    rows
}

/// Compare optional sort keys with missing values ordered last.
fn cmp_opt(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
