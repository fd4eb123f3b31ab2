//! Student registration and updates that touch the outstanding balance.
//!
//! # Balance rule
//!
//! `outstanding_balance_cents = program.tuition_fee_cents - SUM(payments)`.
//! It is set when a student joins a program and recomputed when the program
//! changes.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::student::{
        NewStudent, Student, UpdateStudentRequest, outstanding_after_program_change,
    },
};

async fn tuition_fee<'e, E>(executor: E, program_id: Uuid) -> Result<i64, AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT tuition_fee_cents FROM programs WHERE id = $1")
        .bind(program_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Program not found"))
}

/// Register a student. The opening balance is the program's tuition fee.
pub async fn create_student(pool: &DbPool, student: NewStudent) -> Result<Student, AppError> {
    let outstanding_balance_cents = match student.program_id {
        Some(program_id) => Some(tuition_fee(pool, program_id).await?),
        None => None,
    };

    let created = sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students (
            firstname,
            lastname,
            contacts,
            status,
            is_on_loan,
            program_id,
            outstanding_balance_cents
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&student.firstname)
    .bind(&student.lastname)
    .bind(&student.contacts)
    .bind(student.status.as_str())
    .bind(student.is_on_loan)
    .bind(student.program_id)
    .bind(outstanding_balance_cents)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::from_constraint(e, "Student already exists"))?;

    tracing::info!(student_id = %created.id, program_id = ?created.program_id, "student registered");

    Ok(created)
}

/// Apply a partial update.
///
/// Moving the student to another program recomputes the outstanding balance
/// against the new tuition fee inside the same transaction.
pub async fn update_student(
    pool: &DbPool,
    student_id: Uuid,
    update: UpdateStudentRequest,
) -> Result<Student, AppError> {
    let mut tx = pool.begin().await?;

    let current_program: Option<Uuid> =
        sqlx::query_scalar::<_, Option<Uuid>>("SELECT program_id FROM students WHERE id = $1 FOR UPDATE")
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("Student not found"))?;

    let new_balance = match update.program_id {
        Some(program_id) if Some(program_id) != current_program => {
            let tuition = tuition_fee(&mut *tx, program_id).await?;
            let paid: i64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(amount_paid_cents), 0)::BIGINT FROM payments WHERE student_id = $1",
            )
            .bind(student_id)
            .fetch_one(&mut *tx)
            .await?;
            Some(outstanding_after_program_change(tuition, paid))
        }
        _ => None,
    };

    let student = sqlx::query_as::<_, Student>(
        r#"
        UPDATE students
        SET firstname = COALESCE($2, firstname),
            lastname = COALESCE($3, lastname),
            contacts = COALESCE($4, contacts),
            status = COALESCE($5, status),
            is_on_loan = COALESCE($6, is_on_loan),
            program_id = COALESCE($7, program_id),
            outstanding_balance_cents = COALESCE($8, outstanding_balance_cents),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(update.firstname)
    .bind(update.lastname)
    .bind(update.contacts)
    .bind(update.status.map(|s| s.as_str()))
    .bind(update.is_on_loan)
    .bind(update.program_id)
    .bind(new_balance)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    if new_balance.is_some() {
        tracing::info!(
            student_id = %student.id,
            outstanding_balance_cents = ?student.outstanding_balance_cents,
            "student moved to new program"
        );
    }

    Ok(student)
}
