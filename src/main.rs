use std::env;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use apocalipsis_granada::config::AppConfig;
use apocalipsis_granada::core::app::{App, Clock};
use apocalipsis_granada::data::messages::MessageLibrary;
use apocalipsis_granada::data::services::{service_at, SERVICES};
use apocalipsis_granada::prefs::{PrefsDb, PrefsRepository};
use apocalipsis_granada::simulation::flashlight::Torch;
use apocalipsis_granada::ui::screens::action_at;
use apocalipsis_granada::ui::{
    render_messages, render_report, render_service_actions, render_services, Header,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: login | logout | feed | guides | history | services | service <n> [action] | tap | advance | reset | status | help | quit";

/// Terminal stand-in for the camera torch.
struct ConsoleTorch;

impl Torch for ConsoleTorch {
    fn set(&self, on: bool) {
        tracing::info!(on, "torch");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    println!("Apocalipsis Granada");
    let config = AppConfig::from_args(env::args().collect());

    if let Some(parent) = config.db_path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {}", parent.display(), err);
            std::process::exit(1);
        }
    }
    let prefs: Box<dyn PrefsRepository> = match PrefsDb::open(&config.db_path) {
        Ok(db) => Box::new(db),
        Err(err) => {
            eprintln!("Failed to open preferences DB: {}", err);
            std::process::exit(1);
        }
    };

    let library = MessageLibrary::load(&config.assets_dir);
    tracing::info!(
        alerts = library.alerts.len(),
        guides = library.guides.len(),
        "message library ready"
    );

    let mut app = match App::new(library, prefs, Arc::new(ConsoleTorch)) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to load preferences: {}", err);
            std::process::exit(1);
        }
    };

    if app.state().is_logged_in() {
        open_principal(&mut app);
    } else {
        println!("Type `login` to start.");
    }

    println!("{}", HELP);
    loop {
        let Some(input) = prompt("> ") else {
            break;
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        if !app.state().is_logged_in() && !matches!(cmd.as_str(), "login" | "help" | "quit" | "exit") {
            println!("Log in first.");
            continue;
        }

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "login" => {
                let (Some(name), Some(password)) = (prompt("Nombre: "), prompt("Contraseña: ")) else {
                    break;
                };
                match app.login(&name, &password, Clock::now()) {
                    Ok(report) => {
                        print!("{}", render_report(&report));
                        open_principal(&mut app);
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "logout" => {
                print!("{}", render_report(&app.logout(Clock::now())));
            }
            "feed" => {
                let report = app.start_session(Clock::now());
                print!("{}", render_report(&report));
                print!("{}", render_messages("Alertas", &app.feed()));
            }
            "guides" => print!("{}", render_messages("Guías", &app.guides())),
            "history" => print!("{}", render_messages("Historial", &app.history())),
            "services" => print!("{}", render_services(&SERVICES)),
            "service" => {
                let Some(service) = parts
                    .next()
                    .and_then(|raw| raw.parse::<usize>().ok())
                    .and_then(service_at)
                else {
                    println!("Usage: service <1-{}> [action]", SERVICES.len());
                    continue;
                };
                match parts.next().and_then(|raw| raw.parse::<usize>().ok()) {
                    None => print!("{}", render_service_actions(service)),
                    Some(position) => match action_at(service, position) {
                        Some(action) => match action.target() {
                            Some(target) => println!("Abriendo {}", target),
                            None => println!("{}", action.label()),
                        },
                        None => println!("No action {} for {}", position, service.name),
                    },
                }
            }
            "tap" => print!("{}", render_report(&app.tap_shield(Clock::now()))),
            "advance" => {
                print!("{}", render_report(&app.advance(Clock::now())));
                print!("{}", Header::from_state(app.state()).render());
            }
            "reset" => {
                print!("{}", render_report(&app.reset(Clock::now())));
                print!("{}", Header::from_state(app.state()).render());
            }
            "status" => {
                let state = app.state();
                print!("{}", Header::from_state(state).render());
                println!(
                    "Cursor: day {} index {} | notified {} | last content day {}",
                    state.cursor.day,
                    state.cursor.index,
                    state.notified.len(),
                    app.library().last_day()
                );
            }
            _ => println!("Unknown command. {}", HELP),
        }
    }
}

fn open_principal(app: &mut App) {
    let report = app.start_session(Clock::now());
    print!("{}", Header::from_state(app.state()).render());
    print!("{}", render_report(&report));
    print!("{}", render_messages("Alertas", &app.feed()));
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
    }
}
