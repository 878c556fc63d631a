// src/task.rs

use actix_web::{web, HttpResponse};
use log::info;

use crate::app_state::AppState;
use crate::error::TaskError;
use crate::models::{TaskRequest, TaskResponse, TaskStatus};

/// POST /task
pub async fn create_task(
    data: web::Data<AppState>,
    payload: web::Json<TaskRequest>,
) -> Result<HttpResponse, TaskError> {
    let task = data.service.create_task(&payload).await?;
    info!("Task created: {}", task.id);
    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// GET /task/{task_id}
pub async fn get_task(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, TaskError> {
    let task = data.service.get_task(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// GET /task
pub async fn list_tasks(data: web::Data<AppState>) -> Result<HttpResponse, TaskError> {
    let tasks = data.service.get_all_tasks().await?;
    let response: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /task/{task_id}
pub async fn update_task(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<TaskRequest>,
) -> Result<HttpResponse, TaskError> {
    let task = data.service.update_task(path.into_inner(), &payload).await?;
    info!("Task updated: {}", task.id);
    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// PATCH /task/{task_id}/status
///
/// The body is a bare status string, e.g. `"COMPLETED"`. An explicit JSON
/// null reaches the service so it can report the field by name.
pub async fn update_task_status(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<Option<TaskStatus>>,
) -> Result<HttpResponse, TaskError> {
    let task = data
        .service
        .update_task_status(path.into_inner(), payload.into_inner())
        .await?;
    info!("Task {} status set to {}", task.id, task.status.as_str());
    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

/// DELETE /task/{task_id}
pub async fn delete_task(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, TaskError> {
    let task_id = path.into_inner();
    data.service.delete_task(task_id).await?;
    info!("Task deleted: {}", task_id);
    Ok(HttpResponse::NoContent().finish())
}
