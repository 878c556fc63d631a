// src/main.rs

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use task_management_be::app_state::AppState;
use task_management_be::config::Config;
use task_management_be::configure_routes;
use task_management_be::task_db::TaskDb;
use task_management_be::task_service::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let db = TaskDb::init(&config.database_url)
        .await
        .expect("Failed to initialize task store");
    let service = TaskService::new(Arc::new(db));

    let bind_addr = config.bind_addr.clone();

    println!("Server running at http://{}", bind_addr);
    println!("Allowed CORS Origin: {}", config.frontend_origin);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(AppState {
                service: service.clone(),
            }))
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
