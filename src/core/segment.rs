//! Reply segmentation: split a solver reply into plain text and display math.
//!
//! Replies are loosely formatted, so two rewrites run before tokenizing:
//! `[ ... ]` blocks containing a backslash and `(x = ...)` answers are both
//! turned into `$$ ... $$` spans. The rewritten text is then split on `$$...$$`
//! and `$...$` spans; everything between spans is plain text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `[ ... ]` with at least one backslash inside and no nested brackets.
static BRACKET_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*\\[^\[\]]*)\]").expect("bracket pattern is valid")
});

/// `(x = ...)` on a single line, up to the first closing parenthesis.
static X_EQUALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((x\s*=.*?)\)").expect("x-equals pattern is valid"));

/// Double-dollar span first, so `$$a$$` is never read as `$$` + `a` + `$$`.
static MATH_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\$\$.*?\$\$|\$.*?\$").expect("math span pattern is valid")
});

const DOUBLE: &str = "$$";
const SINGLE: &str = "$";

/// Kind of a reply segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    PlainText,
    DisplayMath,
}

/// One classified chunk of a reply, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Text content. For display math, the notation without its delimiters.
    pub body: String,
}

impl Segment {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::PlainText,
            body: body.into(),
        }
    }

    pub fn math(body: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::DisplayMath,
            body: body.into(),
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind == SegmentKind::DisplayMath
    }

    /// Source form: plain text as-is, display math re-wrapped in `$$`.
    pub fn to_source(&self) -> String {
        match self.kind {
            SegmentKind::PlainText => self.body.clone(),
            SegmentKind::DisplayMath => format!("{DOUBLE}{}{DOUBLE}", self.body),
        }
    }
}

/// Rewrite bracket blocks and `(x = ...)` answers into `$$` spans.
fn normalize_delimiters(text: &str) -> String {
    let text = BRACKET_MATH.replace_all(text, "$$$$${1}$$$$");
    X_EQUALS.replace_all(&text, "$$$$${1}$$$$").into_owned()
}

/// Strip the delimiters of a matched math span. Double first, then single.
fn strip_delimiters(token: &str) -> &str {
    if token.len() >= 2 * DOUBLE.len() && token.starts_with(DOUBLE) && token.ends_with(DOUBLE) {
        &token[DOUBLE.len()..token.len() - DOUBLE.len()]
    } else if token.len() >= 2 * SINGLE.len()
        && token.starts_with(SINGLE)
        && token.ends_with(SINGLE)
    {
        &token[SINGLE.len()..token.len() - SINGLE.len()]
    } else {
        token
    }
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::plain(trimmed));
    }
}

/// Split a reply into plain text and display math segments, in source order.
///
/// Plain text is trimmed and dropped when empty; empty math spans are kept.
/// Unbalanced `$` never opens a span, it stays in the surrounding plain text.
pub fn segment(text: &str) -> Vec<Segment> {
    let normalized = normalize_delimiters(text);
    let mut segments = Vec::new();
    let mut last = 0;
    for m in MATH_SPAN.find_iter(&normalized) {
        push_plain(&mut segments, &normalized[last..m.start()]);
        segments.push(Segment::math(strip_delimiters(m.as_str())));
        last = m.end();
    }
    push_plain(&mut segments, &normalized[last..]);
    log::debug!(
        "Segmented reply of {} bytes into {} segments",
        text.len(),
        segments.len()
    );
    segments
}

/// Join segments back into source form (math re-wrapped in `$$`), one segment per line.
pub fn reconstruct(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_source)
        .collect::<Vec<_>>()
        .join("\n")
}
