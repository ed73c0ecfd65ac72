use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::expense::Expense;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStorage;

/// SQLite repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Expense {
        Expense {
            id: row.get("id"),
            title: row.get("title"),
        }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title
            FROM expenses
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_expense).collect())
    }

    async fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, title
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_expense))
    }

    async fn create_expense(&self, title: &str) -> Result<Expense> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (title)
            VALUES (?)
            "#,
        )
        .bind(title)
        .execute(self.db.pool())
        .await?;

        Ok(Expense {
            id: result.last_insert_rowid(),
            title: title.to_string(),
        })
    }

    async fn update_expense(&self, id: i64, title: Option<&str>) -> Result<Option<Expense>> {
        // COALESCE keeps the stored title when no replacement is given
        let row = sqlx::query(
            r#"
            UPDATE expenses
            SET title = COALESCE(?, title)
            WHERE id = ?
            RETURNING id, title
            "#,
        )
        .bind(title)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_expense))
    }

    async fn delete_expense(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
