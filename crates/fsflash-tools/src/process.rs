//! External process execution with streamed output
//!
//! Runs one tool at a time. Both output channels are drained as chunks
//! arrive and forwarded to the sink; the call resolves to the exit code
//! only after the process has exited and both channels hit EOF. A non-zero
//! exit code is not an error at this layer.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::ToolError;
use crate::sink::OutputSink;

/// Rewrite bare LF to CRLF for a terminal-like consumer
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Forward one output channel to the sink until EOF
async fn drain<R: AsyncRead + Unpin>(mut reader: R, sink: &dyn OutputSink) {
    let mut buf = [0u8; 4096];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let text = String::from_utf8_lossy(&buf[..n]);
                sink.write(&normalize_newlines(&text));
            }
        }
    }
}

/// Run a command, streaming its output to the sink, and return its exit code
///
/// A command that cannot be spawned at all surfaces as
/// [`ToolError::SpawnFailure`]. A process killed by a signal reports -1.
pub async fn run(
    command: &Path,
    args: &[OsString],
    sink: &dyn OutputSink,
) -> Result<i32, ToolError> {
    log::info!("running {} {:?}", command.display(), args);

    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::SpawnFailure {
            tool: command.display().to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    tokio::join!(
        async {
            if let Some(out) = stdout {
                drain(out, sink).await;
            }
        },
        async {
            if let Some(err) = stderr {
                drain(err, sink).await;
            }
        },
    );

    let status = child.wait().await?;
    let code = status.code().unwrap_or(-1);
    log::debug!("{} exited with {}", command.display(), code);
    Ok(code)
}
