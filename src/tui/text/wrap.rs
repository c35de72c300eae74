//! Text wrapping for display.

/// Split text into lines of max width (columns). Uses textwrap for correct UTF-8 handling.
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    textwrap::wrap(s, width)
        .into_iter()
        .map(|cow| cow.into_owned())
        .collect()
}

/// Split a message into display lines respecting its newlines, then wrap to `width`.
/// Runs of blank lines collapse to one.
pub(crate) fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in msg.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
        } else {
            out.extend(wrap_text(line, width));
        }
    }
    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out
}
