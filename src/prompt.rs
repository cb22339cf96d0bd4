use std::io::{BufRead as _, Write as _};

use anyhow::Context as _;

/// Next line from stdin with the trailing newline stripped, or `None` at EOF.
pub fn next_line() -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Yes/no confirmation. Anything other than an explicit yes (including EOF)
/// is no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush().context("flush prompt")?;

    let Some(answer) = next_line()? else {
        return Ok(false);
    };
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Labelled field prompt. EOF reads as an empty field so validation reports
/// it rather than the prompt failing.
pub fn read_field(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush().context("flush prompt")?;
    Ok(next_line()?.unwrap_or_default().trim().to_owned())
}
