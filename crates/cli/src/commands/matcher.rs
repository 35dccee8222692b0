use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use shipit_pattern::Pattern;

/// Match a pattern against one line read from standard input.
///
/// On a match the line is echoed back and the exit status is zero; on no
/// match nothing is printed and the exit status is one, like grep.
pub fn execute(pattern: &str) -> Result<ExitCode> {
    let pattern = Pattern::new(pattern).context("Invalid pattern")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.strip_suffix('\n').unwrap_or(&line);

    if pattern.is_match(line) {
        println!("{line}");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
