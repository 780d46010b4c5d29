//! Line-oriented prompts shared by the commands.

use std::io::{self, Write};

/// Prints `label` and reads one line from stdin, without the trailing
/// newline.
///
/// # Errors
///
/// Returns an error if stdout or stdin fails, or when the input stream is
/// closed.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
