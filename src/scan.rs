use crate::backend::{BackendClient, IsbnOutcome};
use crate::config::BackendConfig;
use crate::prompt;

/// Where the scanner is in its scan-lookup cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanned,
    Resolving,
    Resolved,
}

/// The "already processing" guard: exactly one scan is in flight between a
/// barcode arriving and the user resetting the scanner. Codes arriving in any
/// other state are dropped.
#[derive(Debug)]
pub struct Scanner {
    state: ScanState,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Accept a scanned code. Only an idle scanner takes one.
    pub fn accept(&mut self) -> bool {
        if self.state != ScanState::Idle {
            return false;
        }
        self.state = ScanState::Scanned;
        true
    }

    pub fn begin_resolving(&mut self) {
        self.state = ScanState::Resolving;
    }

    pub fn finish(&mut self) {
        self.state = ScanState::Resolved;
    }

    /// Explicit user reset; the only way back to accepting scans.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Interactive scan session. A hardware barcode scanner acts as a keyboard,
/// so every stdin line is a decoded code; an empty line is the reset button
/// and EOF ends the session.
pub async fn run(config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let mut scanner = Scanner::new();

    println!("Scan a Barcode");
    println!("(type or scan an ISBN and press enter; empty line resets the scanner)");

    while let Some(line) = prompt::next_line()? {
        let code = line.trim();
        if code.is_empty() {
            scanner.reset();
            tracing::debug!("scanner reset");
            continue;
        }
        if !scanner.accept() {
            tracing::warn!(isbn = %code, "scan ignored: already processing; reset the scanner first");
            continue;
        }

        scanner.begin_resolving();
        if let Err(err) = resolve(&client, code).await {
            // Surface the raw failure with the scanned code, keep the session
            // alive for a manual retry.
            eprintln!("{code}: {err:#}");
        }
        scanner.finish();
    }

    Ok(())
}

async fn resolve(client: &BackendClient, isbn: &str) -> anyhow::Result<()> {
    match client.add_by_isbn(isbn).await? {
        IsbnOutcome::Added => {
            tracing::info!(isbn = %isbn, "added book");
            Ok(())
        }
        IsbnOutcome::AlreadyExists => {
            let add_copy =
                prompt::confirm("This book already exists in your library. Add anyway?")?;
            if add_copy {
                client.add_copy(isbn).await?;
                println!("Added copy to Library");
            }
            Ok(())
        }
        IsbnOutcome::NotFound => {
            let try_manually =
                prompt::confirm("There was a problem adding the book. Try manually?")?;
            if try_manually {
                crate::add::manual_entry(client, isbn).await?;
            }
            Ok(())
        }
    }
}
