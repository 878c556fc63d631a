use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::error::TaskError;
use crate::models::{NewTask, Task, TaskStatus};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT NOT NULL,
    description   TEXT,
    status        TEXT NOT NULL,
    due_date_time TEXT NOT NULL
)
"#;

pub struct TaskDb {
    pool: SqlitePool,
}

impl TaskDb {
    /// Open the store and make sure the schema exists.
    pub async fn init(database_url: &str) -> Result<Self, TaskError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| TaskError::Database(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        // Each pooled connection to sqlite::memory: is a separate database,
        // so the pool is capped at one connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(TaskDb { pool })
    }

    pub async fn insert_task(&self, new_task: &NewTask) -> Result<Task, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, description, status, due_date_time)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.status.as_str())
        .bind(new_task.due_date_time)
        .fetch_one(&self.pool)
        .await?;

        row.into_task()
    }

    pub async fn find_task(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaskRow::into_task).transpose()
    }

    pub async fn find_all_tasks(&self) -> Result<Vec<Task>, TaskError> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM tasks")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    pub async fn update_task(&self, task: &Task) -> Result<(), TaskError> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, due_date_time = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.due_date_time)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_task(&self, id: i64) -> Result<u64, TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Row representation of the tasks table.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    due_date_time: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> Result<Task, TaskError> {
        // Rows are only ever written through TaskStatus::as_str.
        let status = match self.status.as_str() {
            "TODO" => TaskStatus::Todo,
            "IN_PROGRESS" => TaskStatus::InProgress,
            "COMPLETED" => TaskStatus::Completed,
            other => {
                return Err(TaskError::Database(format!(
                    "unrecognized task status in store: {}",
                    other
                )))
            }
        };

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            status,
            due_date_time: self.due_date_time,
        })
    }
}
