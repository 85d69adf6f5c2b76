use actix_governor::Governor;
use actix_web::web;

use crate::handlers;
use crate::middleware::ApiRateLimit;

pub fn configure_routes(cfg: &mut web::ServiceConfig, rate_limit: &ApiRateLimit) {
    cfg.route("/api/health", web::get().to(handlers::health_check))
        .route("/api-docs/openapi.json", web::get().to(handlers::openapi_json))
        .service(
            web::scope("/api/v1")
                .wrap(Governor::new(rate_limit))
                .service(
                    web::scope("/bootcamps")
                        // Radius search - registered before /{id} routes
                        .route(
                            "/radius/{zipcode}/{distance}",
                            web::get().to(handlers::get_bootcamps_in_radius),
                        )
                        // List with filters, select, sort and pagination
                        .route("", web::get().to(handlers::get_bootcamps))
                        // Create (publisher or admin)
                        .route("", web::post().to(handlers::create_bootcamp))
                        .route("/{id}", web::get().to(handlers::get_bootcamp))
                        // Update and delete (owner or admin)
                        .route("/{id}", web::put().to(handlers::update_bootcamp))
                        .route("/{id}", web::delete().to(handlers::delete_bootcamp))
                        // Photo upload (owner or admin)
                        .route("/{id}/photo", web::put().to(handlers::upload_bootcamp_photo)),
                ),
        );
}
