pub mod screens;

pub use screens::ScreenService;
