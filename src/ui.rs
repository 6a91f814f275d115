use console::{style, Term};
use std::io::{self, Write};

/// Print an error message on stderr, the `error:` label in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

/// Line ending for output: a newline on a terminal, nothing when piped.
pub fn line_end(is_terminal: bool) -> &'static str {
    if is_terminal {
        "\n"
    } else {
        ""
    }
}

/// Write the result to stdout.
///
/// Piped output carries no trailing newline so scripts get the exact bytes.
pub fn write_output(output: &str) -> io::Result<()> {
    let is_terminal = Term::stdout().is_term();
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}{}", output, line_end(is_terminal))?;
    stdout.flush()
}
