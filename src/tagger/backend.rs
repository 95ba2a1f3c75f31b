//! Process exchange with the TreeTagger scripts.
//!
//! Each exchange starts a fresh process, writes the whole input to its stdin, closes it, and
//! collects stdout to completion. Nothing is shared between calls, so one backend can be
//! used from several threads at once.

use crate::config::TaggerConfig;
use crate::error::{Error, Result};
use crate::tagger::binary::BinaryLocator;
use crate::tagger::language::{BinarySpec, Tool};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinError;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn one block of input text into one block of tool output.
pub trait Backend: Send + Sync {
    /// Name used in error messages.
    fn program(&self) -> &str;

    fn exchange(&self, input: &str) -> Result<String>;
}

/// Runs an external program once per exchange.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    path: PathBuf,
    name: String,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ProcessBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Locate the script for `tool` and prepare a backend for it.
    ///
    /// Fails immediately when the script cannot be found.
    pub fn from_config(config: &TaggerConfig, tool: Tool) -> Result<Self> {
        let spec = BinarySpec::new(tool, config.language);
        let path = BinaryLocator::from_config(config).locate(&spec)?;
        let mut backend = Self::new(path).with_timeout(config.timeout());
        if let Some(list) = usable_abbreviation_list(config.abbreviation_list.as_deref()) {
            backend = backend.with_args(["-a".into(), list.into_os_string()]);
        }
        Ok(backend)
    }

    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        self.args.extend(args);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Async form of [`Backend::exchange`], for callers already inside a tokio runtime.
    pub async fn exchange_async(&self, input: &str) -> Result<String> {
        debug!(program = %self.name, bytes = input.len(), "starting exchange");

        let mut child = Command::new(&self.path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| Error::ProcessLaunch {
                program: self.name.clone(),
                reason: err.to_string(),
                searched: vec![self.path.clone()],
            })?;

        // stdin is fed from its own task while stdout drains
        let writer = child.stdin.take().map(|mut stdin| {
            let payload = input.as_bytes().to_vec();
            tokio::spawn(async move {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await
            })
        });

        // on timeout the child is dropped, which kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(program = %self.name, timeout = ?self.timeout, "killed after timeout");
                return Err(Error::ProcessTimeout {
                    program: self.name.clone(),
                    after: self.timeout,
                });
            }
        };

        if let Some(writer) = writer {
            writer_outcome(writer.await)?;
        }

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(Error::ProcessExecution {
                program: self.name.clone(),
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = match String::from_utf8(output.stdout) {
            Ok(text) => text,
            Err(err) => {
                warn!(program = %self.name, "output is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!(program = %self.name, bytes = stdout.len(), "exchange finished");
        Ok(stdout)
    }
}

impl Backend for ProcessBackend {
    fn program(&self) -> &str {
        &self.name
    }

    /// Blocking exchange on a private single-threaded runtime.
    ///
    /// Must not be called from inside a tokio runtime; use
    /// [`exchange_async`](ProcessBackend::exchange_async) there.
    fn exchange(&self, input: &str) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.exchange_async(input))
    }
}

/// A program may exit without reading all of its input, so a broken pipe is not an error.
fn writer_outcome(result: std::result::Result<io::Result<()>, JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Ok(Err(err)) => Err(err.into()),
        Err(join) => Err(io::Error::other(join).into()),
    }
}

fn usable_abbreviation_list(path: Option<&Path>) -> Option<PathBuf> {
    let path = path?;
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        warn!(path = %path.display(), "abbreviation list not found, running without it");
        None
    }
}
