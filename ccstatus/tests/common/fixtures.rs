use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// An isolated home directory with a `.claude` folder.
pub struct TestHome {
    pub dir: TempDir,
    pub claude_dir: PathBuf,
    pub settings: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        crate::test_log!("FIXTURE: Creating temporary HOME");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let claude_dir = dir.path().join(".claude");
        let settings = claude_dir.join("settings.json");
        Self {
            dir,
            claude_dir,
            settings,
        }
    }

    pub fn write_settings(&self, content: &str) {
        fs::create_dir_all(&self.claude_dir).expect("Failed to create .claude");
        fs::write(&self.settings, content).expect("Failed to write settings.json");
    }

    pub fn read_settings(&self) -> String {
        fs::read_to_string(&self.settings).expect("Failed to read settings.json")
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.claude_dir) else {
            return Vec::new();
        };
        let mut found: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("settings.backup."))
            })
            .collect();
        found.sort();
        found
    }

    /// `ccstatus` with HOME pointed here and the usage API pointed at a
    /// closed local port.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ccstatus"));
        cmd.env("HOME", self.dir.path())
            .env("CCSTATUS_API_URL", closed_port_url())
            .env("CCSTATUS_API_TIMEOUT_SECS", "2")
            .env_remove("CCSTATUS_OAUTH_TOKEN")
            .env_remove("CCSTATUS_LOG")
            .stdin(Stdio::null());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to run ccstatus")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str, token: Option<&str>) -> Output {
        let mut cmd = self.command();
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(token) = token {
            cmd.env("CCSTATUS_OAUTH_TOKEN", token);
        }
        let mut child = cmd.spawn().expect("Failed to spawn ccstatus");
        child
            .stdin
            .take()
            .expect("stdin piped")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for ccstatus")
    }
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api/oauth/usage")
}
