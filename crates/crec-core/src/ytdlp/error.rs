//! External-tool boundary errors, classified before conversion to anyhow.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Error from a yt-dlp invocation. Kept as a dedicated type so the
/// orchestrator can log a useful diagnostic and turn the failure into a
/// "no result" outcome instead of a crash.
#[derive(Debug, Error)]
pub enum YtdlpError {
    /// The binary could not be started (missing, not executable).
    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran and exited non-zero. Carries the last stderr lines.
    #[error("{bin} exited with {status}: {stderr_tail}")]
    Failed {
        bin: String,
        status: ExitStatus,
        stderr_tail: String,
    },

    /// `-J` output was not the expected metadata record.
    #[error("could not parse metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The run succeeded but no output file could be determined from the
    /// tool's destination lines.
    #[error("download finished but no output file was reported")]
    NoOutput,

    /// I/O while streaming the child's output.
    #[error("i/o error while running {bin}: {source}")]
    Io {
        bin: String,
        #[source]
        source: io::Error,
    },
}
