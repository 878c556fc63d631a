pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod task;
pub mod task_db;
pub mod task_service;

use actix_web::web;

use crate::task::{
    create_task, delete_task, get_task, list_tasks, update_task, update_task_status,
};

/// Registers the /task routes on an actix app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/task")
            .route("", web::post().to(create_task))
            .route("", web::get().to(list_tasks))
            .route("/{task_id}", web::get().to(get_task))
            .route("/{task_id}", web::put().to(update_task))
            .route("/{task_id}", web::delete().to(delete_task))
            .route("/{task_id}/status", web::patch().to(update_task_status)),
    );
}
