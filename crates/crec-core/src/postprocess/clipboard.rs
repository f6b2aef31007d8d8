//! Best-effort clipboard copy of the final path, detached from the caller.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Fire-and-forget: spawns a background task that is never awaited. There is
/// no result channel back — a clipboard failure is logged at debug and can
/// never affect the download outcome.
pub fn copy_path_async(path: PathBuf) {
    tokio::spawn(async move {
        if let Err(err) = copy_path(&path).await {
            tracing::debug!("clipboard copy failed: {err}");
        }
    });
}

/// Writes the path string to the system clipboard via the platform tool:
/// `Set-Clipboard` on Windows, `pbcopy` on macOS, `xclip` elsewhere.
async fn copy_path(path: &Path) -> std::io::Result<()> {
    let text = path.display().to_string();

    if cfg!(target_os = "windows") {
        let escaped = text.replace('\\', "\\\\");
        Command::new("powershell")
            .args(["-Command", &format!("Set-Clipboard -Path \"{escaped}\"")])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        return Ok(());
    }

    let (bin, extra_args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("pbcopy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    };

    let mut child = Command::new(bin)
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
    }
    child.wait().await?;
    Ok(())
}
