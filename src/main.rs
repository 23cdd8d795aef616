use clap::Parser;
use signup_client::adapters::{ConsoleNotifier, TerminalNavigator};
use signup_client::core::ConfigProvider;
use signup_client::utils::error::ErrorSeverity;
use signup_client::utils::logger;
use signup_client::{
    CliConfig, FormField, HttpRegistrationApi, LocalStorage, RegistrationSubmitter,
    SessionContext, SignupError, SubmitOutcome, Teardown,
};

fn exit_code(e: &SignupError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(e: &SignupError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    if e.is_retryable() {
        eprintln!("🔁 Run the command again to retry");
    }
    std::process::exit(exit_code(e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 設定檔決定 log level，所以要先讀
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e).max(1));
        }
    };

    if config.json_logs {
        logger::init_json_logger(settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }
    tracing::debug!("Effective settings: {:?}", settings);

    let storage = LocalStorage::new(settings.session_dir().to_string());
    let session = match SessionContext::restore(storage, settings.session_file()).await {
        Ok(session) => session,
        Err(e) => report(&e),
    };

    if config.logout {
        if let Err(e) = session.clear_token().await {
            report(&e);
        }
        println!("👋 Session token cleared");
        session.teardown().await;
        return Ok(());
    }

    if session.is_authenticated().await {
        tracing::info!("An existing session token will be replaced on success");
    }

    // Ctrl-C 等同元件卸載
    let teardown = Teardown::new();
    let signal = teardown.signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            teardown.trigger();
        }
    });

    let api = HttpRegistrationApi::from_config(&settings);
    tracing::info!("Registration endpoint: {}", api.endpoint());

    let mut submitter = RegistrationSubmitter::new(
        api,
        session.clone(),
        TerminalNavigator::new(),
        ConsoleNotifier,
    )
    .with_teardown(signal);

    for field in FormField::ALL {
        submitter.update_field(field, config.field_value(field).unwrap_or_default());
    }

    println!("⏳ {}", submitter.ui_state().submit_label());
    let outcome = match submitter.submit().await {
        Ok(outcome) => outcome,
        Err(e) => report(&e),
    };

    let code = match outcome {
        SubmitOutcome::Registered { .. } => {
            let route = submitter
                .navigator()
                .current()
                .map(|r| r.path())
                .unwrap_or("/");
            println!("✅ Registered '{}'", submitter.form().username);
            println!(
                "📁 Session saved to {}/{} (route: {})",
                settings.session_dir(),
                session.file(),
                route
            );
            0
        }
        SubmitOutcome::Rejected { .. } => 1,
        SubmitOutcome::Failed { .. } => 2,
        SubmitOutcome::Cancelled => {
            eprintln!("🛑 Registration cancelled");
            130
        }
    };

    session.teardown().await;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
