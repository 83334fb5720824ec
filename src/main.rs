//! Line-oriented CLI standing in for the presentation layer.
//!
//! Plain text is submitted as a symptom description; `/` commands map to
//! the remaining UI triggers (select-file, request-doctor-opinion,
//! select-role, select-language, select-tab).

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use arogya::advice::{AdviceProvider, OpenRouterClient};
use arogya::config::{self, AdviceConfig};
use arogya::i18n::Language;
use arogya::orchestrator::{Orchestrator, RejectReason, SubmitOutcome};
use arogya::session::{Role, Tab};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = match AdviceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let orchestrator = Orchestrator::new(OpenRouterClient::new(&cfg));

    println!("🩺 {} — Smart Health Assistant", config::APP_NAME);
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_once(' ').unwrap_or((input, "")) {
            ("/quit", _) | ("/exit", _) => break,
            ("/help", _) => print_help(),
            ("/role", arg) => match Role::parse(arg) {
                Some(role) => {
                    orchestrator.set_role(role);
                    println!("Role: {role}");
                }
                None => println!("Unknown role. Use patient, family, or doctor."),
            },
            ("/lang", arg) => match Language::parse(arg) {
                Some(lang) => {
                    orchestrator.set_language(lang);
                    println!("Language: {lang}");
                }
                None => println!("Unknown language. Use english or hindi."),
            },
            ("/tab", arg) => match Tab::parse(arg) {
                Some(tab) => orchestrator.set_active_tab(tab),
                None => println!("Unknown tab. Use symptoms, reports, opinion, or timeline."),
            },
            ("/report", arg) => {
                let file_name = if arg.trim().is_empty() {
                    None
                } else {
                    Some(arg.trim())
                };
                println!("{}", orchestrator.upload_report(file_name));
            }
            ("/opinion", _) => println!("{}", orchestrator.request_doctor_opinion()),
            ("/timeline", _) => print_timeline(&orchestrator),
            _ => submit_symptom(&orchestrator, input).await,
        }
    }
}

async fn submit_symptom<P: AdviceProvider>(orchestrator: &Orchestrator<P>, text: &str) {
    orchestrator.session().set_symptom_input(text);
    println!("Consulting AI...");
    match orchestrator.submit_symptom().await {
        SubmitOutcome::Advised | SubmitOutcome::Failed => {
            if let Some(advice) = orchestrator.session().last_advice() {
                println!("{advice}");
            }
        }
        SubmitOutcome::Rejected(RejectReason::Busy) => {
            println!("A consultation is already in progress.");
        }
        SubmitOutcome::Rejected(RejectReason::EmptyInput) => {}
    }
}

fn print_timeline<P: AdviceProvider>(orchestrator: &Orchestrator<P>) {
    let events = orchestrator.timeline();
    if events.is_empty() {
        println!("No health records yet.");
        return;
    }
    for event in events {
        println!("[{}] {}", event.kind, event.value);
        if let Some(advice) = &event.advice {
            println!("    Advice: {advice}");
        }
    }
}

fn print_help() {
    println!("Describe your symptoms, or use:");
    println!("  /report [file-name]   record a report upload");
    println!("  /opinion              request a doctor's opinion");
    println!("  /timeline             show the health timeline");
    println!("  /role <patient|family|doctor>");
    println!("  /lang <english|hindi>");
    println!("  /tab <symptoms|reports|opinion|timeline>");
    println!("  /quit");
}
