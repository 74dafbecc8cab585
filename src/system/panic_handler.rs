//! Panic handler module
//!
//! A panic inside the store or the confirmation gate is a programming
//! defect, never a handled error path. The hook records it in the log and
//! in `crash.log`, then prints either a detailed report (server) or a one
//! line message (one-shot commands).

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;

/// Running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Command,
}

/// Install custom panic hook
pub fn install_panic_hook(mode: RunMode) {
    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        let backtrace = std::backtrace::Backtrace::force_capture();
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        tracing::error!(%location, "panic: {}", message);

        if let Err(e) = write_crash_log(&timestamp, &message, &location, &backtrace) {
            eprintln!("Failed to write crash log: {}", e);
        }

        match mode {
            RunMode::Server => display_server_panic(&message, &location, &backtrace),
            RunMode::Command => {
                eprintln!("Program panicked: {}", message);
                eprintln!("Details saved to crash.log");
            }
        }
    }));
}

/// Server mode: Display detailed colored stack trace information
fn display_server_panic(message: &str, location: &str, backtrace: &std::backtrace::Backtrace) {
    use colored::Colorize;

    let rule = "═══════════════════════════════════════════════════".red().bold();
    eprintln!();
    eprintln!("{}", rule);
    eprintln!("{}", "PANIC".red().bold());
    eprintln!("{}", rule);
    eprintln!("{} {}", "Reason:".yellow().bold(), message.white());
    eprintln!("{} {}", "Location:".yellow().bold(), location.white());
    eprintln!();
    eprintln!("{}", "Backtrace:".yellow().bold());
    eprintln!("{}", format!("{:?}", backtrace).dimmed());
    eprintln!("{}", "Details saved to crash.log".cyan());
    eprintln!("{}", rule);
}

fn write_crash_log(
    timestamp: &str,
    message: &str,
    location: &str,
    backtrace: &std::backtrace::Backtrace,
) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("crash.log")?;

    writeln!(file, "Crash Report - {}", timestamp)?;
    writeln!(file, "Message: {}", message)?;
    writeln!(file, "Location: {}", location)?;
    writeln!(file, "Backtrace:\n{:?}", backtrace)?;
    writeln!(file)?;

    Ok(())
}
