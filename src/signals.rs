//! Newline-delimited JSON status signal streams.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wayfile_core::StatusSignal;

/// Capacity of the channel between a reader and the status driver.
pub const SIGNAL_BUFFER: usize = 64;

/// Parse one [`StatusSignal`] per line and forward it to `tx`.
///
/// Blank lines are ignored and malformed lines are logged and skipped.
/// Stops at end of input or when the receiver is gone. Returns the number
/// of signals forwarded.
pub async fn forward_signals<R>(reader: R, tx: mpsc::Sender<StatusSignal>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<StatusSignal>(line) {
            Ok(signal) => {
                if tx.send(signal).await.is_err() {
                    debug!("Signal receiver closed");
                    break;
                }
                forwarded += 1;
            }
            Err(err) => warn!(error = %err, "Skipping malformed status signal"),
        }
    }

    Ok(forwarded)
}

/// Forward signals from a file or named pipe until it ends.
pub async fn forward_file(path: PathBuf, tx: mpsc::Sender<StatusSignal>) {
    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to open signal stream");
            return;
        }
    };
    match forward_signals(BufReader::new(file), tx).await {
        Ok(count) => debug!(path = %path.display(), count, "Signal stream ended"),
        Err(err) => warn!(path = %path.display(), error = %err, "Signal stream failed"),
    }
}
