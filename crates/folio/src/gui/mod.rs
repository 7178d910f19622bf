pub mod app;
pub mod orbit;
pub mod sections;
pub mod theme;
pub mod window;
