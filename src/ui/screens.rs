use crate::core::app::StepReport;
use crate::data::messages::{Message, MessageKind};
use crate::data::services::{Service, ServiceAction};
use crate::session::login::greeting;
use crate::simulation::cursor::CursorStep;
use crate::simulation::effects::Effect;
use crate::simulation::state::SimulationState;
use crate::systems::SimEvent;

/// Top of the principal screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub greeting: String,
    pub today: String,
    pub developer_banner: Option<String>,
}

impl Header {
    pub fn from_state(state: &SimulationState) -> Self {
        let calendar = state.calendar();
        let developer_banner = state
            .developer_mode
            .then(|| format!("🧪 Modo desarrollador — Día {}", state.cursor.day));
        Self {
            greeting: greeting(&state.username),
            today: format!("Hoy es {}", calendar.date_for_day(state.cursor.day)),
            developer_banner,
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.greeting);
        output.push('\n');
        output.push_str(&self.today);
        output.push('\n');
        if let Some(banner) = &self.developer_banner {
            output.push_str(banner);
            output.push('\n');
        }
        output
    }
}

pub fn render_messages(title: &str, messages: &[Message]) -> String {
    let mut output = format!("=== {} ===\n", title);
    if messages.is_empty() {
        output.push_str("  (sin mensajes)\n");
        return output;
    }
    for message in messages {
        let marker = match message.kind {
            MessageKind::Alert => "⚠️",
            MessageKind::Guide => "📘",
        };
        output.push_str(&format!(
            "{} [{}] {}\n    {}\n",
            marker, message.day, message.simulated_date, message.text
        ));
    }
    output
}

pub fn render_services(services: &[Service]) -> String {
    let mut output = String::from("=== Servicios ===\n");
    for (idx, service) in services.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", idx + 1, service.label()));
    }
    output
}

pub fn render_service_actions(service: &Service) -> String {
    let mut output = format!("{}\n", service.name);
    for action in service.actions() {
        match action.target() {
            Some(target) => output.push_str(&format!("  {} ({})\n", action.label(), target)),
            None => output.push_str(&format!("  {}\n", action.label())),
        }
    }
    output
}

fn describe_event(event: &SimEvent) -> String {
    match event {
        SimEvent::LoggedIn { username } => greeting(username),
        SimEvent::LoggedOut => "Sesión cerrada. Reiniciando aplicación...".to_string(),
        SimEvent::SessionOpened { .. } => "Simulación iniciada".to_string(),
        SimEvent::CaughtUp { cursor } => format!("Hoy es el día {}", cursor.day),
        SimEvent::Advanced {
            cursor,
            step: CursorStep::NextDay,
        } => format!("Avanzaste al día {}", cursor.day),
        SimEvent::Advanced {
            cursor,
            step: CursorStep::SameDay,
        } => format!("Día {}: mensaje {}", cursor.day, cursor.index + 1),
        SimEvent::Reset => "🔄 Reiniciado al día 1".to_string(),
        SimEvent::ShieldTapped { taps } => format!("Toques: {}", taps),
        SimEvent::DeveloperMode(true) => "🔧 Modo desarrollador ACTIVADO".to_string(),
        SimEvent::DeveloperMode(false) => "Modo desarrollador DESACTIVADO".to_string(),
        SimEvent::DeveloperModeRequired => "Requiere modo desarrollador".to_string(),
    }
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::PlaySound(sound) => format!("🔊 {}", sound.asset_name()),
        Effect::Notify { title, text, .. } => format!("🔔 {}: {}", title, text),
        Effect::SosSignal => "🔦 SOS".to_string(),
    }
}

pub fn render_report(report: &StepReport) -> String {
    let mut output = String::new();
    for event in &report.events {
        output.push_str(&describe_event(event));
        output.push('\n');
    }
    for effect in &report.effects {
        output.push_str(&describe_effect(effect));
        output.push('\n');
    }
    output
}

/// 1-based, like the services list.
pub fn action_at(service: &Service, position: usize) -> Option<ServiceAction> {
    position
        .checked_sub(1)
        .and_then(|idx| service.actions().into_iter().nth(idx))
}
