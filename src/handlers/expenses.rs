//! Office expense ledger HTTP handlers.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    db::DbPool,
    error::AppError,
    extract::AppJson,
    middleware::auth::{AuthContext, FINANCE_ROLES},
    models::expense::{CreateExpenseRequest, CreateExpenseResponse, Expense, ExpenseFilter},
};

/// List expenses, newest first.
///
/// # Query Parameters
///
/// - `start_date`, `end_date` (`YYYY-MM-DD`) - inclusive range, applied only
///   when both are given
pub async fn list_expenses(
    State(pool): State<DbPool>,
    Query(filter): Query<ExpenseFilter>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = match filter.range() {
        Some((start, end)) => {
            sqlx::query_as::<_, Expense>(
                r#"
                SELECT * FROM expenses
                WHERE expense_date BETWEEN $1 AND $2
                ORDER BY expense_date DESC, created_at DESC
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Expense>(
                "SELECT * FROM expenses ORDER BY expense_date DESC, created_at DESC",
            )
            .fetch_all(&pool)
            .await?
        }
    };

    Ok(Json(expenses))
}

/// Add an expense.
///
/// # Request Body
///
/// ```json
/// {
///   "person_name": "Brian",
///   "amount_cents": 4500000,
///   "expense_date": "2025-01-31",
///   "description": "Printer toner"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{"message": "Expense added successfully", "id": "..."}`
/// - **Error (400)**: `Invalid person name`, `Amount must be a positive number`
///   or `Invalid expense date`
pub async fn create_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<CreateExpenseResponse>), AppError> {
    auth.require(FINANCE_ROLES)?;
    let expense = request.validate()?;

    let expense = sqlx::query_as::<_, Expense>(
        r#"
        INSERT INTO expenses (person_name, amount_cents, expense_date, description)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&expense.person_name)
    .bind(expense.amount_cents)
    .bind(expense.expense_date)
    .bind(&expense.description)
    .fetch_one(&pool)
    .await?;

    tracing::info!(expense_id = %expense.id, amount_cents = expense.amount_cents, "expense added");

    Ok((
        StatusCode::CREATED,
        Json(CreateExpenseResponse {
            message: "Expense added successfully",
            id: expense.id,
        }),
    ))
}
