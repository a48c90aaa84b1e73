//! Opens review pages in the desktop browser.

use std::process::{Command, Stdio};

use smartlocate_protocols::ReviewLauncher;
use tracing::{error, info};

/// Launches review URLs with the platform's default URL handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReviewLauncher;

impl SystemReviewLauncher {
    fn command(url: &str) -> Command {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };
        command.arg(url);
        command
    }
}

impl ReviewLauncher for SystemReviewLauncher {
    fn open(&self, url: &str) {
        info!("Opening review page: {}", url);
        let spawned = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            error!("Failed to open review page {}: {}", url, e);
        }
    }
}
