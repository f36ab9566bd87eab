//! UI utilities for the REPL

use colored::*;
use std::io::{self, Write};

use docq_core::Result;

/// Exit keywords, matched case-insensitively. `salir` is the documented
/// one; `exit`/`quit` are accepted as well.
const EXIT_KEYWORDS: [&str; 3] = ["salir", "exit", "quit"];

/// Whether one line of user input terminates the REPL
pub fn is_exit(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&input.as_str())
}

/// Display the startup banner
pub fn display_banner() {
    println!();
    println!("{}", "docq — document-grounded Q&A".blue().bold());
    println!("{}", "Ask questions about your ingested PDFs.".dimmed());
    println!(
        "{}",
        "💡 Tip: type 'salir' (or 'exit') to leave".dimmed()
    );
    println!();
}

/// Read one trimmed line from standard input.
///
/// Returns `None` on end of input (closed stdin), which callers treat like
/// an exit keyword.
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{} ", prompt.green().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_keyword_is_case_insensitive() {
        assert!(is_exit("salir"));
        assert!(is_exit("Salir"));
        assert!(is_exit("SALIR"));
        assert!(is_exit("  exit  "));
        assert!(is_exit("QUIT"));
    }

    #[test]
    fn test_ordinary_input_is_not_exit() {
        assert!(!is_exit("cuánto cuesta el envío?"));
        assert!(!is_exit("salir ahora")); // only the bare keyword exits
        assert!(!is_exit(""));
    }
}
