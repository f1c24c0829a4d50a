use actix_web::web;

pub mod health;
pub mod prices;
pub mod quotes;
pub mod taxes;

/// Register every HTTP route
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::controllers::configure(cfg);
    quotes::controllers::configure_quote_routes(cfg);
}
