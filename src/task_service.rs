use std::sync::Arc;

use chrono::Utc;

use crate::error::TaskError;
use crate::models::{NewTask, Task, TaskRequest, TaskStatus};
use crate::task_db::TaskDb;

/// Orchestrates validation and persistence for every task operation.
#[derive(Clone)]
pub struct TaskService {
    db: Arc<TaskDb>,
}

impl TaskService {
    pub fn new(db: Arc<TaskDb>) -> Self {
        Self { db }
    }

    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task, TaskError> {
        let new_task = validate_task_data(request)?;
        self.db.insert_task(&new_task).await
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Task, TaskError> {
        self.db
            .find_task(task_id)
            .await?
            .ok_or_else(|| TaskError::NotFound(format!("Task not found with id: {}", task_id)))
    }

    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.db.find_all_tasks().await
    }

    pub async fn update_task(
        &self,
        task_id: i64,
        request: &TaskRequest,
    ) -> Result<Task, TaskError> {
        let new_task = validate_task_data(request)?;
        let mut existing = self.get_task(task_id).await?;

        existing.title = new_task.title;
        existing.description = new_task.description;
        existing.status = new_task.status;
        existing.due_date_time = new_task.due_date_time;

        self.db.update_task(&existing).await?;
        Ok(existing)
    }

    /// Overwrites only the status. The due date is not re-checked here, so
    /// an overdue task can still change status.
    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: Option<TaskStatus>,
    ) -> Result<Task, TaskError> {
        let status = status
            .ok_or_else(|| TaskError::InvalidArgument("Task status cannot be null".to_string()))?;

        let mut existing = self.get_task(task_id).await?;
        existing.status = status;

        self.db.update_task(&existing).await?;
        Ok(existing)
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), TaskError> {
        let deleted = self.db.delete_task(task_id).await?;
        if deleted == 0 {
            return Err(TaskError::NotFound(format!(
                "Task not found with id: {}",
                task_id
            )));
        }
        Ok(())
    }
}

/// Field-level checks applied on create and full update. The first violated
/// check decides the error message.
fn validate_task_data(request: &TaskRequest) -> Result<NewTask, TaskError> {
    let title = request
        .title
        .as_deref()
        .ok_or_else(|| TaskError::InvalidArgument("Task title cannot be null".to_string()))?;
    if title.trim().is_empty() {
        return Err(TaskError::InvalidArgument(
            "Task title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > 50 {
        return Err(TaskError::InvalidArgument(
            "Task title exceeds maximum length of 50 characters".to_string(),
        ));
    }

    let status = request
        .status
        .ok_or_else(|| TaskError::InvalidArgument("Task status cannot be null".to_string()))?;

    let due_date_time = request
        .due_date_time
        .ok_or_else(|| TaskError::InvalidArgument("Due date cannot be null".to_string()))?;
    if due_date_time <= Utc::now() {
        return Err(TaskError::InvalidArgument(
            "Due date must be in the future".to_string(),
        ));
    }

    Ok(NewTask {
        title: title.to_string(),
        description: request.description.clone(),
        status,
        due_date_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn setup() -> (TaskService, Arc<TaskDb>) {
        let db = Arc::new(TaskDb::init("sqlite::memory:").await.unwrap());
        (TaskService::new(Arc::clone(&db)), db)
    }

    fn valid_request() -> TaskRequest {
        TaskRequest {
            title: Some("Test Task".to_string()),
            description: Some("Test Description".to_string()),
            status: Some(TaskStatus::Todo),
            due_date_time: Some(Utc::now() + Duration::days(1)),
        }
    }

    fn invalid_argument_message(err: TaskError) -> String {
        match err {
            TaskError::InvalidArgument(msg) => msg,
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_task() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.title, "Test Task");
        assert_eq!(created.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn test_create_task_null_title() {
        let (service, _db) = setup().await;

        let mut request = valid_request();
        request.title = None;

        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Task title cannot be null");
    }

    #[tokio::test]
    async fn test_create_task_blank_title() {
        let (service, _db) = setup().await;

        let mut request = valid_request();
        request.title = Some("   ".to_string());

        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Task title cannot be empty");
    }

    #[tokio::test]
    async fn test_create_task_title_length_boundary() {
        let (service, _db) = setup().await;

        let mut request = valid_request();
        request.title = Some("a".repeat(50));
        assert!(service.create_task(&request).await.is_ok());

        request.title = Some("a".repeat(51));
        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(
            invalid_argument_message(err),
            "Task title exceeds maximum length of 50 characters"
        );
    }

    #[tokio::test]
    async fn test_create_task_null_status() {
        let (service, _db) = setup().await;

        let mut request = valid_request();
        request.status = None;

        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Task status cannot be null");
    }

    #[tokio::test]
    async fn test_create_task_null_due_date() {
        let (service, _db) = setup().await;

        let mut request = valid_request();
        request.due_date_time = None;

        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Due date cannot be null");
    }

    #[tokio::test]
    async fn test_create_task_due_date_not_in_future() {
        let (service, _db) = setup().await;

        // By validation time this instant is already in the past.
        let mut request = valid_request();
        request.due_date_time = Some(Utc::now());
        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Due date must be in the future");

        request.due_date_time = Some(Utc::now() - Duration::days(1));
        let err = service.create_task(&request).await.unwrap_err();
        assert_eq!(invalid_argument_message(err), "Due date must be in the future");
    }

    #[tokio::test]
    async fn test_get_task() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();
        let found = service.get_task(created.id).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let (service, _db) = setup().await;

        let err = service.get_task(99999).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_all_tasks() {
        let (service, _db) = setup().await;

        service.create_task(&valid_request()).await.unwrap();
        service.create_task(&valid_request()).await.unwrap();

        let tasks = service.get_all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_update_task() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();

        let mut request = valid_request();
        request.title = Some("Updated Title".to_string());
        request.status = Some(TaskStatus::InProgress);

        let updated = service.update_task(created.id, &request).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_update_task_not_found() {
        let (service, _db) = setup().await;

        let err = service.update_task(99999, &valid_request()).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_task_status() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();
        let updated = service
            .update_task_status(created.id, Some(TaskStatus::Completed))
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.due_date_time, created.due_date_time);
    }

    #[tokio::test]
    async fn test_update_task_status_null() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();
        let err = service.update_task_status(created.id, None).await.unwrap_err();

        assert_eq!(invalid_argument_message(err), "Task status cannot be null");
    }

    #[tokio::test]
    async fn test_update_task_status_with_past_due_date() {
        let (service, db) = setup().await;

        // Insert directly so the row carries an already-passed due date.
        let overdue = NewTask {
            title: "Overdue Task".to_string(),
            description: None,
            status: TaskStatus::Todo,
            due_date_time: Utc::now() - Duration::days(1),
        };
        let task = db.insert_task(&overdue).await.unwrap();

        let updated = service
            .update_task_status(task.id, Some(TaskStatus::Completed))
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.due_date_time, task.due_date_time);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (service, _db) = setup().await;

        let created = service.create_task(&valid_request()).await.unwrap();
        service.delete_task(created.id).await.unwrap();

        let err = service.get_task(created.id).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_task_not_found() {
        let (service, _db) = setup().await;

        let err = service.delete_task(99999).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }
}
