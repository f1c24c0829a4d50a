pub mod quote_controller;

pub use quote_controller::configure_quote_routes;
