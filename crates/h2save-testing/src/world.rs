//! Isolated environment for running the `h2save` binary.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp directory with a config file, a saves directory and an output directory.
///
/// # Example
/// ```no_run
/// use h2save_testing::{SavefileBuilder, TestWorld};
///
/// let world = TestWorld::new();
/// let save = world.write_save("Profile1.sav", &SavefileBuilder::new().build());
/// let result = world.run(&["expand", save.to_str().unwrap(), "--format", "text"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    saves_dir: PathBuf,
    out_dir: PathBuf,
    config_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let saves_dir = temp_dir.path().join("saves");
        let out_dir = temp_dir.path().join("out");
        let config_path = temp_dir.path().join("config.toml");

        std::fs::create_dir_all(&saves_dir).expect("Failed to create saves dir");
        std::fs::create_dir_all(&out_dir).expect("Failed to create out dir");

        let config = format!(
            "[downloads]\ndir = {:?}\n\n[saves]\ndir = {:?}\n",
            out_dir.display().to_string(),
            saves_dir.display().to_string()
        );
        std::fs::write(&config_path, config).expect("Failed to write config");

        Self {
            temp_dir,
            saves_dir,
            out_dir,
            config_path,
        }
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn saves_dir(&self) -> &Path {
        &self.saves_dir
    }

    /// Where downloads land.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write `bytes` into the saves directory and return the full path.
    pub fn write_save(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.saves_dir.join(name);
        std::fs::write(&path, bytes).expect("Failed to write savefile");
        path
    }

    /// Names of everything in the output directory, sorted.
    pub fn downloads(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.out_dir)
            .expect("Failed to read out dir")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Point a command at this world's config file.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("H2SAVE_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path())
    }

    /// Run the `h2save` binary with `args`.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("h2save")
            .map_err(|e| anyhow::anyhow!("Failed to find h2save binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
