//! Interactive token prompt used when no token is configured.

use std::io::{self, BufRead, Write};

use tokio::sync::oneshot;

pub const TOKEN_PROMPT: &str = "Enter your Discord bot token: ";

/// Ask the operator for the bot token on stdin.
pub async fn prompt_token() -> io::Result<String> {
    read_token(io::BufReader::new(io::stdin())).await
}

/// Read one line from `reader` and return it trimmed.
///
/// The read runs on a detached thread, so dropping the returned future (for
/// an interrupt at the prompt) does not wait for a line that never comes.
pub async fn read_token<R>(reader: R) -> io::Result<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let _ = tx.send(read_token_line(reader));
    });

    rx.await
        .map_err(|_| io::Error::other("token prompt ended without an answer"))?
}

fn read_token_line<R: BufRead>(mut reader: R) -> io::Result<String> {
    print!("{TOKEN_PROMPT}");
    io::stdout().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;

    Ok(input.trim().to_string())
}
