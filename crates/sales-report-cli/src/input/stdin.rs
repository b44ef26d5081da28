use std::io::{self, Read};

use super::Encoding;

/// Attempt to read text from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin(encoding: Encoding) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    let text = super::decode(&buffer, encoding)?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(text))
}
