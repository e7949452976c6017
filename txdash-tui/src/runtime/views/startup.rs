use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};
use std::io;
use std::process::Command;

pub(super) fn handle_startup_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.navigate_to_banking(),
        KeyCode::Char('i') | KeyCode::Char('I') => {
            let url = app.insight_url().to_string();
            app.status_message = Some(open_outcome(&url, open_browser(&url)));
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn open_outcome(url: &str, result: io::Result<()>) -> String {
    match result {
        Ok(()) => format!("Opened {}", url),
        Err(e) => {
            tracing::warn!(url, "could not open browser: {}", e);
            format!("Could not open a browser ({}), visit {}", e, url)
        }
    }
}

/// Open a URL in the system default browser.
fn open_browser(url: &str) -> io::Result<()> {
    tracing::info!(url, "opening insight in browser");
    browser_command(url)?.spawn().map(|_| ())
}

#[cfg(target_os = "linux")]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    Ok(cmd)
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    Ok(cmd)
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut cmd = Command::new("cmd");
    cmd.args(["/c", "start", url]);
    Ok(cmd)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn browser_command(_url: &str) -> io::Result<Command> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no known browser launcher",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_reports_launch_failure() {
        assert_eq!(
            open_outcome("http://localhost:8001", Ok(())),
            "Opened http://localhost:8001"
        );

        let failed = open_outcome(
            "http://localhost:8001",
            Err(io::Error::new(io::ErrorKind::NotFound, "xdg-open not found")),
        );
        assert!(failed.starts_with("Could not open a browser"));
        assert!(failed.contains("xdg-open not found"));
        assert!(failed.ends_with("visit http://localhost:8001"));
        assert!(!failed.contains("Opened"));
    }
}
