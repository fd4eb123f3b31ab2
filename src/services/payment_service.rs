//! Payment bookkeeping - tuition payments and per-fee payments.
//!
//! Every payment is written in the same database transaction as the balance
//! it reduces. The balance row is locked with `FOR UPDATE` first, so two
//! concurrent payments for one student cannot both pass the overpayment check.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        fee_balance::{CreateFeePaymentRequest, FeeBalance, FeePayment},
        payment::{
            CreatePaymentRequest, Payment, StatementRow, TuitionStatement, check_tuition_payment,
        },
    },
};

/// Record a tuition payment and lower the student's outstanding balance.
///
/// # Errors
///
/// - `NotFound`: student does not exist
/// - `Overpayment`: amount exceeds the known outstanding balance
/// - `InvalidRequest`: `fee_id` refers to no fee
pub async fn record_tuition_payment(
    pool: &DbPool,
    student_id: Uuid,
    request: CreatePaymentRequest,
) -> Result<Payment, AppError> {
    let mut tx = pool.begin().await?;

    // Lock the student row; NULL balance means no program yet
    let outstanding: Option<i64> = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT outstanding_balance_cents FROM students WHERE id = $1 FOR UPDATE",
    )
    .bind(student_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("Student not found"))?;

    if let Err(err) = check_tuition_payment(outstanding, request.amount_paid_cents) {
        tx.rollback().await?;
        return Err(err);
    }

    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (student_id, amount_paid_cents, payment_date, payment_method, fee_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(request.amount_paid_cents)
    .bind(request.payment_date)
    .bind(&request.payment_method)
    .bind(request.fee_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::from_constraint(e, "Duplicate payment"))?;

    sqlx::query(
        r#"
        UPDATE students
        SET outstanding_balance_cents = outstanding_balance_cents - $1,
            updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(request.amount_paid_cents)
    .bind(student_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        payment_id = %payment.id,
        %student_id,
        amount_paid_cents = payment.amount_paid_cents,
        "tuition payment recorded"
    );

    Ok(payment)
}

/// Tuition fee against the sum of all tuition payments.
pub async fn tuition_statement(
    pool: &DbPool,
    student_id: Uuid,
) -> Result<TuitionStatement, AppError> {
    let row = sqlx::query_as::<_, StatementRow>(
        r#"
        SELECT s.id AS student_id,
               p.program_name,
               p.tuition_fee_cents,
               COALESCE(
                   (SELECT SUM(amount_paid_cents) FROM payments WHERE student_id = s.id),
                   0
               )::BIGINT AS total_paid_cents
        FROM students s
        LEFT JOIN programs p ON p.id = s.program_id
        WHERE s.id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Student not found"))?;

    Ok(row.into())
}

/// Open a balance row for `fee_id` on a student, nothing paid yet.
///
/// # Errors
///
/// - `NotFound`: student or fee does not exist
/// - `Conflict`: the fee is already assigned to the student
pub async fn assign_fee(
    pool: &DbPool,
    student_id: Uuid,
    fee_id: Uuid,
) -> Result<FeeBalance, AppError> {
    let student_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(student_id)
            .fetch_one(pool)
            .await?;

    if !student_exists {
        return Err(AppError::NotFound("Student not found"));
    }

    let fee_amount_cents: i64 =
        sqlx::query_scalar("SELECT fee_amount_cents FROM fees WHERE id = $1")
            .bind(fee_id)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("Fee not found"))?;

    let balance = sqlx::query_as::<_, FeeBalance>(
        r#"
        INSERT INTO student_fee_balances (
            student_id,
            fee_id,
            total_fee_cents,
            amount_paid_cents,
            balance_remaining_cents
        )
        VALUES ($1, $2, $3, 0, $3)
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(fee_id)
    .bind(fee_amount_cents)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::from_constraint(e, "Fee already assigned to student"))?;

    tracing::info!(%student_id, %fee_id, total_fee_cents = fee_amount_cents, "fee assigned");

    Ok(balance)
}

/// Pay towards an assigned fee and move the amount from remaining to paid.
///
/// # Errors
///
/// - `NotFound`: the fee was never assigned to the student
/// - `Overpayment`: amount exceeds `balance_remaining_cents`
pub async fn record_fee_payment(
    pool: &DbPool,
    student_id: Uuid,
    request: CreateFeePaymentRequest,
) -> Result<(FeePayment, FeeBalance), AppError> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, FeeBalance>(
        "SELECT * FROM student_fee_balances WHERE student_id = $1 AND fee_id = $2 FOR UPDATE",
    )
    .bind(student_id)
    .bind(request.fee_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("Fee not assigned to student"))?;

    let (amount_paid_cents, balance_remaining_cents) =
        match current.apply_payment(request.payment_amount_cents) {
            Ok(next) => next,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };

    let payment = sqlx::query_as::<_, FeePayment>(
        r#"
        INSERT INTO fee_payments (student_id, fee_id, payment_amount_cents, payment_date, payment_method)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(student_id)
    .bind(request.fee_id)
    .bind(request.payment_amount_cents)
    .bind(request.payment_date)
    .bind(&request.payment_method)
    .fetch_one(&mut *tx)
    .await?;

    let balance = sqlx::query_as::<_, FeeBalance>(
        r#"
        UPDATE student_fee_balances
        SET amount_paid_cents = $1,
            balance_remaining_cents = $2
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(amount_paid_cents)
    .bind(balance_remaining_cents)
    .bind(current.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        payment_id = %payment.id,
        %student_id,
        fee_id = %request.fee_id,
        balance_remaining_cents,
        "fee payment recorded"
    );

    Ok((payment, balance))
}
