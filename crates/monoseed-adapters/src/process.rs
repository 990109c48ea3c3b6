//! External command runner using std::process.
//!
//! Each step runs in its own working directory with a hard timeout. The
//! child is polled with `try_wait`; once the deadline passes it is killed
//! and reaped, and the step is reported as failed.
//!
//! On unix the child leads its own process group. `npx` and the Nx
//! generators fork node processes, so a failed or timed-out step kills the
//! whole group; nothing may keep writing into a directory that rollback is
//! about to remove.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use monoseed_core::{
    application::ports::CommandRunner,
    domain::{OutputMode, Step, StepResult},
};
use tracing::{debug, warn};

/// Lines of captured stderr kept for the failure message.
const STDERR_TAIL_LINES: usize = 20;

/// How long a failed step's stderr may stay open after the group is killed.
const STDERR_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Production [`CommandRunner`] backed by child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    poll_interval: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn command(step: &Step) -> Command {
        // npm, npx, yarn and pnpm are batch shims on Windows.
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&step.program);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = Command::new(&step.program);

        cmd.args(&step.args).current_dir(&step.cwd).stdin(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        match step.mode {
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
            OutputMode::Capture => {
                cmd.stdout(Stdio::null()).stderr(Stdio::piped());
            }
        }
        cmd
    }

    /// Wait for `child` until `timeout`; `None` means the deadline passed.
    fn wait_with_timeout(
        &self,
        child: &mut Child,
        timeout: Duration,
    ) -> std::io::Result<Option<ExitStatus>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, step: &Step) -> StepResult {
        let started = Instant::now();
        debug!(step = %step.id, command = %step.command_line(), "Spawning");

        let mut child = match Self::command(step).spawn() {
            Ok(child) => child,
            Err(e) => {
                return StepResult::failure(
                    step.id,
                    format!("failed to start `{}`: {e}", step.program),
                    started.elapsed(),
                );
            }
        };

        let stderr = child.stderr.take().map(spawn_tail_reader);

        match self.wait_with_timeout(&mut child, step.timeout) {
            Ok(Some(status)) if status.success() => {
                StepResult::success(step.id, started.elapsed())
            }
            Ok(Some(status)) => {
                kill_group(&child);
                let tail = join_tail(stderr, STDERR_DRAIN_GRACE);
                StepResult::failure(step.id, describe_exit(status, &tail), started.elapsed())
            }
            Ok(None) => {
                warn!(step = %step.id, timeout_secs = step.timeout.as_secs(), "Step timed out, killing");
                kill_group(&child);
                let _ = child.kill();
                let _ = child.wait();
                drop(stderr);
                StepResult::failure(
                    step.id,
                    format!("timed out after {:?}", step.timeout),
                    started.elapsed(),
                )
            }
            Err(e) => {
                kill_group(&child);
                let _ = child.kill();
                let _ = child.wait();
                StepResult::failure(step.id, format!("failed to wait for child: {e}"), started.elapsed())
            }
        }
    }
}

/// Drain a pipe on its own thread so the child never blocks on a full pipe.
fn spawn_tail_reader<R: std::io::Read + Send + 'static>(pipe: R) -> JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut tail = Vec::new();
        for line in BufReader::new(pipe).lines().map_while(Result::ok) {
            if tail.len() == STDERR_TAIL_LINES {
                tail.remove(0);
            }
            tail.push(line);
        }
        tail
    })
}

/// Collect the reader's tail, giving up once `grace` has passed.
fn join_tail(handle: Option<JoinHandle<Vec<String>>>, grace: Duration) -> Vec<String> {
    let Some(handle) = handle else {
        return Vec::new();
    };
    let deadline = Instant::now() + grace;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            warn!("stderr still open after the step ended, dropping its output");
            return Vec::new();
        }
        thread::sleep(Duration::from_millis(10));
    }
    handle.join().unwrap_or_default()
}

/// SIGKILL every process in the child's group. The group outlives the
/// leader, so this also works after the leader has been reaped.
#[cfg(unix)]
fn kill_group(child: &Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(child.id()) else {
        return;
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) => debug!(pgid, "Killed step process group"),
        // ESRCH: every member has already exited.
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => warn!(pgid, error = %e, "Failed to kill step process group"),
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

fn describe_exit(status: ExitStatus, stderr_tail: &[String]) -> String {
    let code = status
        .code()
        .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"));
    let lines: Vec<&str> = stderr_tail
        .iter()
        .map(String::as_str)
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        code
    } else {
        format!("{code}: {}", lines.join("\n"))
    }
}
