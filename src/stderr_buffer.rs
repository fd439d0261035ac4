use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Start buffering warnings. While active, `warn()` stores messages instead
/// of writing to stderr, so the TUI display is not corrupted.
pub fn activate() {
    *BUFFER.lock().unwrap() = Some(Vec::new());
}

/// Stop buffering and return everything collected since `activate()`.
pub fn drain() -> Vec<String> {
    BUFFER.lock().unwrap().take().unwrap_or_default()
}

/// Emit a warning. Buffered while the TUI owns the terminal, printed to
/// stderr immediately otherwise.
pub fn warn(msg: String) {
    let mut guard = BUFFER.lock().unwrap();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}
