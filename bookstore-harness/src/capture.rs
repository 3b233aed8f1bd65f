//! Console tee capture.
//!
//! The harness writes all domain log lines through a process-wide output
//! sink (by default the terminal). A [`CaptureSession`] swaps that sink for
//! a tee which duplicates every line to both the original sink and an
//! append-mode report file, and restores the original sink when the suite
//! finishes. Capture is best-effort instrumentation: if the report file
//! cannot be prepared the suite keeps running with the original sink.

use console::Term;
use once_cell::sync::Lazy;
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};
use tracing::*;

/// Relative path of the report artifact used by [`CaptureSession::begin`].
pub const DEFAULT_LOG_PATH: &str = "reports/api-console.log";

enum Output {
    Plain(Box<dyn Write + Send>),
    Tee {
        console: Box<dyn Write + Send>,
        file: File,
    },
}

impl Output {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Output::Plain(sink) => sink.write_all(buf),
            Output::Tee { console, file } => {
                // Write both sides even if one fails; report the first error.
                let console_result = console.write_all(buf);
                let file_result = file.write_all(buf);
                console_result.and(file_result)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(sink) => sink.flush(),
            Output::Tee { console, file } => {
                let console_result = console.flush();
                let file_result = file.flush();
                console_result.and(file_result)
            }
        }
    }
}

static SINK: Lazy<Mutex<Output>> =
    Lazy::new(|| Mutex::new(Output::Plain(Box::new(Term::stdout()))));

/// Guards against a second capture session while one is active.
static ACTIVE: AtomicBool = AtomicBool::new(false);

fn lock_sink() -> MutexGuard<'static, Output> {
    match SINK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Write one line to the current sink. Infallible by design: a log line
/// that cannot be written must never fail a test.
pub(crate) fn write_line(line: &str) {
    let mut sink = lock_sink();
    let _ = sink.write_all(line.as_bytes());
    let _ = sink.write_all(b"\n");
    let _ = sink.flush();
}

/// Swap the console side of the process-wide sink, returning the previous
/// writer so the caller can restore it. When a capture session is active
/// only the console half of the tee is replaced; the report file keeps
/// receiving lines.
pub fn replace_sink(new: Box<dyn Write + Send>) -> Box<dyn Write + Send> {
    let mut guard = lock_sink();
    match &mut *guard {
        Output::Plain(sink) => std::mem::replace(sink, new),
        Output::Tee { console, .. } => std::mem::replace(console, new),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Append,
    Truncate,
}

/// A suite-scoped capture session. `begin` swaps the sink, `end` (or drop)
/// restores it. Exactly one session can be active per process; beginning
/// another while one is active is an idempotent no-op.
#[must_use = "the capture session must be kept alive until the suite finishes"]
pub struct CaptureSession {
    active: bool,
}

impl CaptureSession {
    /// Start capturing to [`DEFAULT_LOG_PATH`] in append mode, creating the
    /// `reports` directory if needed.
    pub fn begin() -> CaptureSession {
        CaptureSession::begin_at(DEFAULT_LOG_PATH, CaptureMode::Append)
    }

    pub fn begin_at(path: impl AsRef<Path>, mode: CaptureMode) -> CaptureSession {
        let path = path.as_ref();

        if ACTIVE.swap(true, Ordering::SeqCst) {
            crate::logger::log("Console capture already active; ignoring nested begin");
            return CaptureSession { active: false };
        }

        match open_log_file(path, mode) {
            Ok(file) => {
                debug!("capturing console output to {path:?}");
                let mut guard = lock_sink();
                let placeholder = Output::Plain(Box::new(io::sink()));
                match std::mem::replace(&mut *guard, placeholder) {
                    Output::Plain(console) => {
                        *guard = Output::Tee { console, file };
                    }
                    // Unreachable while ACTIVE is held, restored for safety.
                    tee @ Output::Tee { .. } => *guard = tee,
                }
                CaptureSession { active: true }
            }
            Err(e) => {
                ACTIVE.store(false, Ordering::SeqCst);
                crate::logger::log(format!("Error setting up log capture: {e}"));
                CaptureSession { active: false }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop capturing: flush the tee, close the report file and restore the
    /// original sink. Teardown failures are logged, never propagated, and
    /// never prevent sink restoration.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let mut teardown_errors = Vec::new();
        {
            let mut guard = lock_sink();
            if let Err(e) = guard.flush() {
                teardown_errors.push(format!("Error flushing capture sink: {e}"));
            }
            let placeholder = Output::Plain(Box::new(io::sink()));
            match std::mem::replace(&mut *guard, placeholder) {
                Output::Tee { console, mut file } => {
                    if let Err(e) = file.flush() {
                        teardown_errors.push(format!("Error closing log file: {e}"));
                    }
                    drop(file);
                    *guard = Output::Plain(console);
                }
                Output::Plain(sink) => *guard = Output::Plain(sink),
            }
        }
        ACTIVE.store(false, Ordering::SeqCst);

        for message in teardown_errors {
            crate::logger::log(message);
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.finish();
    }
}

fn open_log_file(path: &Path, mode: CaptureMode) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    match mode {
        CaptureMode::Append => options.append(true),
        CaptureMode::Truncate => options.truncate(true),
    };
    options.open(path)
}
