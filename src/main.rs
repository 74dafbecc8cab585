use clap::Parser;

use relinker::cli::Cli;
use relinker::config::init_config;
use relinker::errors::RelinkerError;
use relinker::runtime::modes;
use relinker::system::{RunMode, init_logging, install_panic_hook};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = cli.config.clone();
    if let Some(command) = cli.tool_command() {
        install_panic_hook(RunMode::Command);
        if let Err(e) = modes::run_cli(command) {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
        return Ok(());
    }

    install_panic_hook(RunMode::Server);

    let config = init_config(config_path.as_deref()).unwrap_or_else(|e: RelinkerError| {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    });

    // 保持 guard 存活直到进程退出，否则缓冲中的日志会丢失
    let _log_guard = init_logging(&config.logging).unwrap_or_else(|e| {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    });

    modes::run_server(&config).await
}
