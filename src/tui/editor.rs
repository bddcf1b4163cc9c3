use std::fs;
use std::io::{self, Write};
use std::process::Command;

/// Editor to launch: the configured one, else $VISUAL, else $EDITOR, else vi
pub fn editor_command(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|cmd| !cmd.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `initial` in the editor via a temp file and return what was saved.
/// The command may carry arguments (`code --wait`); the file path is appended.
pub fn edit_text(command: &str, initial: &str) -> io::Result<String> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::other("no editor configured"))?;

    let mut file = tempfile::Builder::new()
        .prefix("daybook-")
        .suffix(".md")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    tracing::debug!(editor = command, path = %file.path().display(), "launching editor");
    let status = Command::new(program).args(parts).arg(file.path()).status()?;
    if !status.success() {
        return Err(io::Error::other(format!("{} exited with {}", program, status)));
    }
    fs::read_to_string(file.path())
}
