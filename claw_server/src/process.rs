//! Supervision of the claw program started by `run-magiclaw`.
//!
//! At most one instance runs at a time. The program gets its own process
//! group so that stop interrupts it together with anything it spawned.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use crate::hub::EventHub;
use crate::telemetry;

/// Prefix of the program's output in the server log.
const OUTPUT_PREFIX: &str = "[run-magiclaw]";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to interrupt process group {pgid}: {source}")]
    Signal {
        pgid: u32,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

pub struct ClawSupervisor {
    program: PathBuf,
    args: Vec<String>,
    telemetry_endpoint: String,
    hub: EventHub,
    child: Option<Child>,
    telemetry_task: Option<JoinHandle<()>>,
}

impl ClawSupervisor {
    pub fn new(program: PathBuf, args: Vec<String>, telemetry_endpoint: String, hub: EventHub) -> Self {
        Self {
            program,
            args,
            telemetry_endpoint,
            hub,
            child: None,
            telemetry_task: None,
        }
    }

    /// Whether the program is alive. Reaps it, and stops the telemetry relay,
    /// if it exited on its own.
    pub fn is_running(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => return true,
            Ok(Some(status)) => info!("Claw program exited with {}", status),
            Err(e) => warn!("Could not poll claw program: {}", e),
        }
        self.child = None;
        self.stop_telemetry();
        false
    }

    /// Start the program. Output lines are tagged with `device` when given.
    pub fn start(&mut self, device: Option<i64>) -> Result<StartOutcome, ProcessError> {
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        info!("Started {} (pid {:?}, claw {:?})", self.program.display(), child.id(), device);

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output(stdout, self.hub.clone(), device));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output(stderr, self.hub.clone(), device));
        }
        self.child = Some(child);

        self.stop_telemetry();
        self.telemetry_task = Some(tokio::spawn(telemetry::relay(
            self.telemetry_endpoint.clone(),
            device,
            self.hub.clone(),
        )));

        Ok(StartOutcome::Started)
    }

    /// Interrupt the program's process group and stop relaying telemetry.
    pub fn stop(&mut self) -> Result<StopOutcome, ProcessError> {
        self.stop_with(interrupt)
    }

    /// The child stays supervised until the signal is delivered, so a failed
    /// stop still reports the program as running.
    fn stop_with(
        &mut self,
        signal: impl FnOnce(&mut Child) -> Result<(), ProcessError>,
    ) -> Result<StopOutcome, ProcessError> {
        if !self.is_running() {
            return Ok(StopOutcome::NotRunning);
        }
        let Some(child) = self.child.as_mut() else {
            return Ok(StopOutcome::NotRunning);
        };
        signal(child)?;

        self.stop_telemetry();
        if let Some(mut child) = self.child.take() {
            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) => info!("Claw program stopped with {}", status),
                    Err(e) => error!("Failed to reap claw program: {}", e),
                }
            });
        }
        Ok(StopOutcome::Stopped)
    }

    fn stop_telemetry(&mut self) {
        if let Some(task) = self.telemetry_task.take() {
            task.abort();
        }
    }
}

#[cfg(unix)]
fn interrupt(child: &mut Child) -> Result<(), ProcessError> {
    let Some(pid) = child.id() else {
        return Ok(());
    };
    // process_group(0) made the child its own group leader
    let rc = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGINT) };
    if rc == -1 {
        let source = std::io::Error::last_os_error();
        // The whole group already exited
        if source.raw_os_error() == Some(libc::ESRCH) {
            return Ok(());
        }
        return Err(ProcessError::Signal { pgid: pid, source });
    }
    Ok(())
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) -> Result<(), ProcessError> {
    let pid = child.id().unwrap_or_default();
    child
        .start_kill()
        .map_err(|source| ProcessError::Signal { pgid: pid, source })
}

async fn forward_output<R: AsyncRead + Unpin>(reader: R, hub: EventHub, device: Option<i64>) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim_end();
                if line.is_empty() {
                    continue;
                }
                info!("{} {}", OUTPUT_PREFIX, line);
                hub.publish_log(device, line.to_string());
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Stopped reading claw program output: {}", e);
                break;
            }
        }
    }
}
