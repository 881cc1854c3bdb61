use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use crate::database::models::student::{NewStudent, Student};
use crate::database::repositories::student::StudentInsert;
use crate::database::repositories::StudentRepository;
use crate::database::DatabaseError;

const RANDOM_ATTEMPTS: usize = 10;

pub fn random_student_id() -> String {
    rand::thread_rng().gen_range(10000..=99999).to_string()
}

/// Last five digits of the current millisecond clock.
pub fn timestamp_student_id() -> String {
    format!("{:05}", Utc::now().timestamp_millis().rem_euclid(100_000))
}

/// Insert a student, assigning a unique 5-digit `student_id`.
///
/// A client-supplied id is tried first and replaced if it is taken. Random ids
/// are tried next, then one clock-derived id.
pub async fn create_student(
    repo: &StudentRepository<'_>,
    mut new: NewStudent,
    requested_id: Option<String>,
) -> Result<Student, DatabaseError> {
    let candidates = requested_id
        .into_iter()
        .chain(std::iter::repeat_with(random_student_id).take(RANDOM_ATTEMPTS))
        .chain(std::iter::once_with(timestamp_student_id));

    for candidate in candidates {
        new.student_id = candidate;
        match repo.insert(&new).await? {
            StudentInsert::Created(student) => return Ok(student),
            StudentInsert::StudentIdTaken => {
                debug!("Student id {} taken, trying another", new.student_id);
            }
        }
    }

    warn!("Could not allocate a student id for {}", new.name);
    Err(DatabaseError::Conflict(
        "Could not allocate a unique student id".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_five_digits() {
        for _ in 0..200 {
            let id = random_student_id();
            assert_eq!(id.len(), 5);
            let n: u32 = id.parse().unwrap();
            assert!((10000..=99999).contains(&n));
        }
    }

    #[test]
    fn timestamp_id_is_zero_padded() {
        let id = timestamp_student_id();
        assert_eq!(id.len(), 5);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
