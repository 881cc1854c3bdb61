use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::Result;
use crate::database::manager::{unique_violation, DatabaseError};
use crate::database::models::student::{NewStudent, Student, StudentChanges, StudentFilter};

const COLUMNS: &str = "id, student_id, name, birth_reg, class_id, year, roll, section, shift, \
     group_name, gender, father_name, mother_name, phone, address, created_at, updated_at";

const STUDENT_ID_KEY: &str = "students_student_id_key";

/// Outcome of an insert attempt.
#[derive(Debug)]
pub enum StudentInsert {
    Created(Student),
    /// The generated `student_id` collided; the caller picks another one.
    StudentIdTaken,
}

pub struct StudentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StudentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM students WHERE TRUE"));

        if let Some(class) = &filter.class {
            query.push(" AND class_id = ").push_bind(class);
        }
        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(year);
        }
        if let Some(roll) = &filter.roll {
            query.push(" AND roll = ").push_bind(roll);
        }
        if let Some(section) = &filter.section {
            query.push(" AND section = ").push_bind(section);
        }
        if let Some(shift) = &filter.shift {
            query.push(" AND shift = ").push_bind(shift);
        }
        if let Some(group) = &filter.group {
            query.push(" AND group_name = ").push_bind(group);
        }
        query.push(" ORDER BY year DESC, class_id, created_at");

        let rows = query
            .build_query_as::<Student>()
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a student. A duplicate (birth registration, class, year) is a
    /// conflict; a duplicate `student_id` is reported so a new id can be tried.
    pub async fn insert(&self, new: &NewStudent) -> Result<StudentInsert> {
        let d = &new.details;
        let inserted = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (id, student_id, name, birth_reg, class_id, year, roll, section,
                                  shift, group_name, gender, father_name, mother_name, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.student_id)
        .bind(&new.name)
        .bind(&new.birth_reg)
        .bind(&new.class_id)
        .bind(new.year)
        .bind(&d.roll)
        .bind(&d.section)
        .bind(&d.shift)
        .bind(&d.group_name)
        .bind(&d.gender)
        .bind(&d.father_name)
        .bind(&d.mother_name)
        .bind(&d.phone)
        .bind(&d.address)
        .fetch_one(self.pool)
        .await;

        match inserted {
            Ok(student) => Ok(StudentInsert::Created(student)),
            Err(e) => match unique_violation(&e) {
                Some(constraint) if constraint == STUDENT_ID_KEY => Ok(StudentInsert::StudentIdTaken),
                Some(_) => Err(DatabaseError::Conflict("Student already exists".to_string())),
                None => Err(e.into()),
            },
        }
    }

    pub async fn update(&self, id: Uuid, changes: &StudentChanges) -> Result<Student> {
        let updated = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                birth_reg = COALESCE($3, birth_reg),
                class_id = COALESCE($4, class_id),
                year = COALESCE($5, year),
                roll = COALESCE($6, roll),
                section = COALESCE($7, section),
                shift = COALESCE($8, shift),
                group_name = COALESCE($9, group_name),
                gender = COALESCE($10, gender),
                father_name = COALESCE($11, father_name),
                mother_name = COALESCE($12, mother_name),
                phone = COALESCE($13, phone),
                address = COALESCE($14, address),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.birth_reg)
        .bind(&changes.class_id)
        .bind(changes.year)
        .bind(&changes.roll)
        .bind(&changes.section)
        .bind(&changes.shift)
        .bind(&changes.group_name)
        .bind(&changes.gender)
        .bind(&changes.father_name)
        .bind(&changes.mother_name)
        .bind(&changes.phone)
        .bind(&changes.address)
        .fetch_optional(self.pool)
        .await;

        match updated {
            Ok(Some(student)) => Ok(student),
            Ok(None) => Err(DatabaseError::not_found("Student not found")),
            Err(e) if unique_violation(&e).is_some() => {
                Err(DatabaseError::Conflict("Student already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let done = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Student not found"));
        }
        Ok(())
    }
}
