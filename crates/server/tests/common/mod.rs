use anyhow::Context as _;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::time::{Duration, Instant};

pub use linkedin_mcp_test_support::{KillOnDrop, pick_unused_port, wait_http_ok};

const BIN: &str = env!("CARGO_BIN_EXE_linkedin-mcp-server");

/// A command for the server binary with the LinkedIn environment cleared. It runs outside the
/// source tree so a developer's `.env` is not picked up.
fn server_command() -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(std::env::temp_dir());
    for var in [
        "LINKEDIN_ACCESS_TOKEN",
        "LINKEDIN_API_BASE_URL",
        "LINKEDIN_REQUEST_TIMEOUT_SECS",
        "MCP_TRANSPORT",
        "HOST",
        "PORT",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn run_to_completion(args: &[&str]) -> anyhow::Result<Output> {
    server_command()
        .args(args)
        .stdin(Stdio::null())
        .output()
        .context("run server")
}

pub fn spawn_http_server(port: u16) -> anyhow::Result<Child> {
    server_command()
        .env("LINKEDIN_ACCESS_TOKEN", "test-token")
        .arg("--transport")
        .arg("streamable-http")
        .arg("--port")
        .arg(port.to_string())
        .arg("--log-level")
        .arg("info")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .spawn()
        .context("spawn server")
}

pub fn spawn_stdio_server() -> anyhow::Result<Child> {
    server_command()
        .env("LINKEDIN_ACCESS_TOKEN", "test-token")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .context("spawn server")
}

pub fn wait_for_exit(child: &mut Child, timeout: Duration) -> anyhow::Result<ExitStatus> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().context("poll server")? {
            return Ok(status);
        }
        if start.elapsed() > timeout {
            anyhow::bail!("server did not exit within {timeout:?}");
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Spawn the server in `dir`, configured only by the `.env` file found there.
pub fn spawn_in_dir(dir: &Path) -> anyhow::Result<Child> {
    server_command()
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .spawn()
        .context("spawn server")
}
