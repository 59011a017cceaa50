use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;
use url::Url;

/// Environment variables that would leak the developer's own setup into a test.
const CONFIG_VARS: &[&str] = &[
    "CADASTRO_CONFIG",
    "CADASTRO_STORE",
    "CADASTRO_PROJECT_ID",
    "CADASTRO_API_KEY",
    "CADASTRO_COLLECTION",
    "RUST_LOG",
];

/// Convert a directory to a file:// store URL.
pub fn file_store_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// An isolated HOME plus a file store inside a temp directory.
pub struct TestEnv {
    dir: TempDir,
    store: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        let store = file_store_url(&dir.path().join("store"));
        Self { dir, store }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A command with no store flag, isolated from the user's config.
    pub fn bare_command(&self) -> Command {
        let home = self.dir.path().join("home");
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cadastro"));
        cmd.env("HOME", &home);
        cmd.env("XDG_CONFIG_HOME", home.join("config"));
        cmd.env("NO_COLOR", "1");
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = self.bare_command();
        cmd.args(["--store", &self.store]);
        cmd.args(args);
        cmd
    }

    /// Run the CLI against the test store.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI with `input` piped to stdin.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute CLI");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for CLI")
    }

    /// Every record as JSON, in list order.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.run_success(&["list", "--json"])
            .lines()
            .map(|line| serde_json::from_str(line).expect("list --json prints JSON lines"))
            .collect()
    }

    /// Register a record and return its id.
    pub fn add(&self, nome: &str, idade: &str, contato: &str) -> String {
        let before = self.records().len();
        self.run_success(&["add", "--nome", nome, "--idade", idade, "--contato", contato]);
        let records = self.records();
        assert_eq!(records.len(), before + 1);
        records
            .iter()
            .find(|r| r["nome"] == nome && r["contato"] == contato)
            .and_then(|r| r["id"].as_str())
            .expect("added record is listed")
            .to_string()
    }
}
