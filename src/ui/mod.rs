pub mod screens;

pub use screens::{render_messages, render_report, render_service_actions, render_services, Header};
