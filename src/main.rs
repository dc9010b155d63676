use clap::Parser;
use clinic_scheduler::utils::error::{ErrorSeverity, SchedulerError};
use clinic_scheduler::utils::{logger, validation::Validate};
use clinic_scheduler::{AppConfig, BookingService, CliConfig, Menu, Store};
use std::io;

fn main() {
    let cli = CliConfig::parse();

    let config = match AppConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    logger::init_cli_logger(config.verbose, &config.log_level, config.log_format);
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Scheduler stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

fn run(config: &AppConfig) -> clinic_scheduler::Result<()> {
    config.validate()?;

    let store = config.store();
    tracing::info!(
        "Using {} and {}",
        store.patients_path().display(),
        store.appointments_path().display()
    );

    let mut session = store.load()?;
    let service = BookingService::new(store);

    let mut menu = Menu::new(&service, io::stdin().lock(), io::stdout());
    menu.run(&mut session)
}

fn exit_code(e: &SchedulerError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
