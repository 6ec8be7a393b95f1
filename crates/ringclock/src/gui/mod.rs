pub mod app;
pub mod clock;
pub mod theme;
pub mod window;
