//! External formatter invoked as a subprocess.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use ordliste_shared::{Extension, OrdlisteError, Result};

use crate::Formatter;

/// Runs `<program> [args..] --extensions <ext>.. <path>`, e.g. `mdformat --extensions myst`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Full argument list for one invocation.
    fn arguments(&self, path: &Path, extensions: &[Extension]) -> Vec<String> {
        let mut args = self.args.clone();
        for ext in extensions {
            args.push("--extensions".into());
            args.push(ext.as_str().into());
        }
        args.push(path.to_string_lossy().into_owned());
        args
    }
}

impl Default for CommandFormatter {
    fn default() -> Self {
        Self::new("mdformat", Vec::new())
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn format_file(&self, path: &Path, extensions: &[Extension]) -> Result<()> {
        let args = self.arguments(path, extensions);
        info!(cmd = %self.program, ?args, "running external formatter");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                OrdlisteError::format(format!(
                    "failed to spawn formatter: {e}. Is `{}` installed?",
                    self.program
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OrdlisteError::format(format!(
                "`{}` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        debug!(path = %path.display(), "external formatter finished");
        Ok(())
    }
}
