//! External pairing helper
//!
//! Writing the host's Bluetooth address into a DS3 needs a USB control
//! transfer, which the `sixpair` tool does for us. The helper runs it as a
//! child process that the frame loop polls once per tick, so the window keeps
//! drawing while it runs.

use crate::config::PairingConfig;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Sleep between polls in the blocking handshake
const POLL_STEP: Duration = Duration::from_millis(50);

/// How long to wait for the output pipes to close once the child has exited.
/// A grandchild can keep them open forever.
const OUTPUT_GRACE: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("pairing helper `{program}` unavailable: {reason}")]
    Unavailable { program: String, reason: String },

    #[error("pairing helper timed out after {0:?}")]
    Timeout(Duration),

    #[error("pairing helper failed (exit code {code:?}): {detail}")]
    Failed { code: Option<i32>, detail: String },

    #[error("pairing helper is already running")]
    Busy,

    #[error("pairing helper I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Something that can pair a USB-connected controller with this host
pub trait PairingHelper {
    /// Launch a pairing run without waiting for it.
    fn start(&mut self) -> Result<(), HelperError>;

    /// Check on the run in flight; `None` while it is still going or when
    /// nothing was started.
    fn poll(&mut self) -> Option<Result<(), HelperError>>;

    fn is_running(&self) -> bool;

    /// Abort a run in flight
    fn cancel(&mut self);

    /// Run the handshake to completion
    fn attempt_pairing_handshake(&mut self) -> Result<(), HelperError> {
        self.start()?;
        loop {
            if let Some(result) = self.poll() {
                return result;
            }
            thread::sleep(POLL_STEP);
        }
    }
}

/// Output of one pipe, drained on a reader thread so the child never
/// blocks on a full pipe and the frame loop never blocks on a read
struct Captured {
    buffer: Arc<Mutex<Vec<u8>>>,
    closed: Receiver<()>,
}

impl Captured {
    fn spawn<R: Read + Send + 'static>(mut pipe: R) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (done, closed) = mpsc::channel();
        let sink = Arc::clone(&buffer);

        thread::spawn(move || {
            let mut chunk = [0u8; 4096];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .extend_from_slice(&chunk[..n]),
                }
            }
            let _ = done.send(());
        });

        Self { buffer, closed }
    }

    /// Whatever was read by `deadline`
    fn collect(&self, deadline: Instant) -> String {
        let _ = self
            .closed
            .recv_timeout(deadline.saturating_duration_since(Instant::now()));
        let bytes = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

struct Running {
    child: Child,
    started: Instant,
    stdout: Option<Captured>,
    stderr: Option<Captured>,
}

/// Runs `sixpair` (or a configured replacement)
pub struct SixpairHelper {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    success_marker: String,
    running: Option<Running>,
}

impl SixpairHelper {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
            success_marker: "Setting master bd_addr".to_string(),
            running: None,
        }
    }

    pub fn from_config(config: &PairingConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
            success_marker: config.success_marker.clone(),
            running: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Judge an exited child by its status and captured output
    fn finish(&self, running: Running, status: ExitStatus) -> Result<(), HelperError> {
        let deadline = Instant::now() + OUTPUT_GRACE;
        let read = |pipe: &Option<Captured>| {
            pipe.as_ref().map(|p| p.collect(deadline)).unwrap_or_default()
        };
        let stdout = read(&running.stdout);
        let stderr = read(&running.stderr);

        debug!("{} stdout: {}", self.program, stdout.trim());
        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", self.program, stderr.trim());
        }

        if !status.success() {
            return Err(HelperError::Failed {
                code: status.code(),
                detail: stderr.trim().to_string(),
            });
        }
        if !stdout.contains(&self.success_marker) {
            return Err(HelperError::Failed {
                code: status.code(),
                detail: format!("output did not contain \"{}\"", self.success_marker),
            });
        }

        Ok(())
    }
}

impl PairingHelper for SixpairHelper {
    fn start(&mut self) -> Result<(), HelperError> {
        if self.running.is_some() {
            return Err(HelperError::Busy);
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HelperError::Unavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        info!("Running pairing helper: {}", self.program);
        let stdout = child.stdout.take().map(Captured::spawn);
        let stderr = child.stderr.take().map(Captured::spawn);
        self.running = Some(Running {
            child,
            started: Instant::now(),
            stdout,
            stderr,
        });
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<(), HelperError>> {
        let running = self.running.as_mut()?;

        match running.child.try_wait() {
            Ok(Some(status)) => {
                let running = self.running.take()?;
                Some(self.finish(running, status))
            },
            Ok(None) if running.started.elapsed() >= self.timeout => {
                let Running { mut child, .. } = self.running.take()?;
                if let Err(e) = child.kill() {
                    warn!("Failed to kill pairing helper: {}", e);
                }
                // Reap so no zombie is left behind
                let _ = child.wait();
                Some(Err(HelperError::Timeout(self.timeout)))
            },
            Ok(None) => None,
            Err(e) => {
                self.running = None;
                Some(Err(HelperError::Io(e)))
            },
        }
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn cancel(&mut self) {
        if let Some(mut running) = self.running.take() {
            debug!("Cancelling pairing helper");
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }
}

impl Drop for SixpairHelper {
    fn drop(&mut self) {
        self.cancel();
    }
}
