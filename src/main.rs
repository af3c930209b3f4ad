use adb_app_manager::args::{Cli, Command};
use adb_app_manager::config::Settings;
use adb_app_manager::{cli, gui, logging};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut settings);
    log::debug!("settings: {settings:?}");

    let command = match cli.command {
        None | Some(Command::Gui) => {
            log::info!("🚀 Launching ADB App Manager ({:?} backend)", settings.backend);
            gui::run_gui(settings);
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(cli::run(command, settings, cli.serial)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
