// Route configuration

use actix_web::web;

use crate::api::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/info", web::get().to(handlers::info));
}
