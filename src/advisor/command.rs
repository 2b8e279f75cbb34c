use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    AdvisorError, BudgetAdvisor, PlanRequest, PlanResponse, SuggestionsRequest,
    SuggestionsResponse,
};

/// Runs an external program once per request.
///
/// The program receives `{"flow": "<name>", "input": {...}}` on stdin and must print
/// the JSON response for that flow on stdout, then exit with status 0.
/// A program still running after the timeout is killed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandAdvisor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Serialize)]
struct Envelope<'a, T> {
    flow: &'a str,
    input: &'a T,
}

impl CommandAdvisor {
    pub(crate) fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from a command line split on whitespace, e.g. `python3 advisor.py --model small`.
    pub(crate) fn from_command_line(line: &str) -> Result<Self, AdvisorError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(AdvisorError::NotConfigured)?;
        Ok(Self::new(program, parts.collect()))
    }

    pub(crate) fn program(&self) -> &str {
        &self.program
    }

    fn call<Req, Resp>(&self, flow: &str, input: &Req) -> Result<Resp, AdvisorError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(&Envelope { flow, input })?;
        debug!(program = %self.program, flow, bytes = payload.len(), "calling advisor");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AdvisorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Every pipe is serviced off-thread so a program that stops reading its
        // input, or fills an output pipe, still runs into the deadline.
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || match stdin.write_all(&payload) {
                // A program that answers without reading its input closes the pipe early.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait_until_deadline(&mut child)?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::other("advisor input writer panicked"))??;
        }
        let stdout = collect(stdout)?;
        if !status.success() {
            return Err(AdvisorError::Failed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&collect(stderr)?).trim().to_string(),
            });
        }

        let response = serde_json::from_slice(&stdout)?;
        info!(program = %self.program, flow, "advisor responded");
        Ok(response)
    }

    fn wait_until_deadline(&self, child: &mut Child) -> Result<ExitStatus, AdvisorError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                warn!(program = %self.program, timeout = ?self.timeout, "advisor timed out, killing it");
                // Already exited between the poll and the kill is fine.
                let _ = child.kill();
                let _ = child.wait();
                return Err(AdvisorError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<io::Result<Vec<u8>>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, AdvisorError> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("advisor output reader panicked"))?
            .map_err(AdvisorError::from),
        None => Ok(Vec::new()),
    }
}

impl BudgetAdvisor for CommandAdvisor {
    fn suggest(&self, request: &SuggestionsRequest) -> Result<SuggestionsResponse, AdvisorError> {
        self.call("suggestions", request)
    }

    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, AdvisorError> {
        self.call("plan", request)
    }
}
