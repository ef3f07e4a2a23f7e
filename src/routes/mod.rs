pub mod screens;

pub use screens::configure_screen_routes;
