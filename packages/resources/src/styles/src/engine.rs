// External Engines
//
// Less and Stylus have no Rust implementation; they run as node CLI processes.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{bail, Context};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A node-based stylesheet compiler invoked as a child process.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    name: &'static str,
    program: Option<PathBuf>,
}

impl EngineCommand {
    /// Engine looked up in `<project_root>/node_modules/.bin`, then on `PATH`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            program: None,
        }
    }

    /// Engine at an explicit location.
    pub fn with_program(name: &'static str, program: impl Into<PathBuf>) -> Self {
        Self {
            name,
            program: Some(program.into()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The executable to spawn for a project.
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        if let Some(program) = &self.program {
            return program.clone();
        }
        let local = project_root.join("node_modules").join(".bin").join(self.name);
        if local.is_file() {
            local
        } else {
            PathBuf::from(self.name)
        }
    }

    /// Run the engine and return its standard output.
    ///
    /// `stdin` is written to the child before waiting on it; a non-zero exit status is an
    /// error carrying the engine's standard error.
    pub async fn run(
        &self,
        project_root: &Path,
        args: &[String],
        stdin: Option<&str>,
    ) -> anyhow::Result<String> {
        let program = self.resolve(project_root);
        tracing::debug!("spawn {} {}", program.display(), args.join(" "));

        let mut cmd = Command::new(&program);
        cmd.args(args)
            .current_dir(project_root)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn {} ({})", self.name, program.display()))?;

        if let Some(input) = stdin {
            let mut pipe = child
                .stdin
                .take()
                .with_context(|| format!("{} stdin unavailable", self.name))?;
            pipe.write_all(input.as_bytes())
                .await
                .with_context(|| format!("Failed to write to {} stdin", self.name))?;
            drop(pipe);
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for {}", self.name))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.name, output.status, stderr.trim());
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non UTF-8 output", self.name))
    }
}
