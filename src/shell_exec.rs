//! Subprocess execution with logging and tracing.
//!
//! Every external command arbor runs goes through [`Cmd`], so `-vv` shows the
//! exact git invocations, the worktree they ran in, and how long they took.

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic epoch for trace timestamps.
static TRACE_EPOCH: OnceLock<Instant> = OnceLock::new();

fn trace_epoch() -> &'static Instant {
    TRACE_EPOCH.get_or_init(Instant::now)
}

/// Builder for executing commands with logging and tracing.
///
/// # Examples
///
/// ```no_run
/// use arbor::shell_exec::Cmd;
///
/// let output = Cmd::new("git")
///     .args(["status", "--porcelain"])
///     .current_dir("/tmp/project")
///     .context("project")
///     .run()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    context: Option<String>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
            envs: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the logging context (typically the worktree directory name).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.envs.push((key.into(), val.into()));
        self
    }

    /// The command line as it appears in logs and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, val) in &self.envs {
            cmd.env(key, val);
        }
        cmd
    }

    fn log_start(&self, cmd_str: &str) {
        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
            None => log::debug!("$ {}", cmd_str),
        }
    }

    /// Execute the command, capturing stdout and stderr.
    pub fn run(self) -> std::io::Result<Output> {
        let cmd_str = self.display();
        self.log_start(&cmd_str);

        let t0 = Instant::now();
        let ts = t0.duration_since(*trace_epoch()).as_micros() as u64;

        let result = self
            .build()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let dur_us = t0.elapsed().as_micros() as u64;
        match &result {
            Ok(output) => log::debug!(
                "[arbor-trace] ts={} cmd=\"{}\" dur_us={} ok={}",
                ts,
                cmd_str,
                dur_us,
                output.status.success()
            ),
            Err(e) => log::debug!(
                "[arbor-trace] ts={} cmd=\"{}\" dur_us={} err=\"{}\"",
                ts,
                cmd_str,
                dur_us,
                e
            ),
        }

        result
    }

    /// Execute the command with the terminal's stdin, stdout and stderr.
    ///
    /// Used for installers and other interactive children whose output goes
    /// straight to the user.
    pub fn status(self) -> std::io::Result<ExitStatus> {
        let cmd_str = self.display();
        self.log_start(&cmd_str);

        self.build()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }
}
