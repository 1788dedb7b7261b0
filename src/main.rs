use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use student_roster::cli::Cli;
use student_roster::config::AppConfig;
use student_roster::{Outcome, RosterApp, Session};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.data {
        config.data.path = path;
    }

    let session = Session::load(&config.data.path, config.grades);
    let app = RosterApp::new(session, config.shell);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.as_ref().and_then(|c| c.to_command()) {
        // Batch mode: one command, exit status 2 on rejected input.
        Some(command) => {
            if let Some(message) = &app.session.status_message {
                eprintln!("{message}");
            }
            let outcome = app.execute(&command, &mut out)?;
            out.flush()?;
            Ok(if outcome == Outcome::Rejected {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            app.run(io::stdin().lock(), &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
