pub mod app;
pub mod ecs;
