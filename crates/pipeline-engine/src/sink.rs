//! Output sinks for the internal stage.

/// Destination for internal-command output.
///
/// Text writes may carry display markup; how markup is handled is up to the
/// sink. Raw writes bypass markup handling entirely.
pub trait OutputSink: Send {
    /// Write display text.
    fn write_text(&mut self, text: &str);

    /// Write raw bytes.
    fn write_raw(&mut self, bytes: &[u8]);
}

/// Sink that captures everything into one plain-text buffer.
///
/// Display markup (`[tag]…[/]` spans) is stripped on capture, so the
/// captured text is what a pipe-connected process should see. Text is
/// buffered internally; the buffer is flushed before raw bytes are
/// appended, so the captured order matches the call order.
#[derive(Debug, Default)]
pub struct CaptureSink {
    captured: String,
    buffered: String,
}

impl CaptureSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish capturing and return the plain text.
    pub fn into_captured(mut self) -> String {
        self.flush_buffered();
        self.captured
    }

    fn flush_buffered(&mut self) {
        if !self.buffered.is_empty() {
            let plain = strip_markup(&self.buffered);
            self.captured.push_str(&plain);
            self.buffered.clear();
        }
    }
}

impl OutputSink for CaptureSink {
    fn write_text(&mut self, text: &str) {
        self.buffered.push_str(text);
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.flush_buffered();
        self.captured.push_str(&String::from_utf8_lossy(bytes));
    }
}

/// Remove `[tag]` spans and unescape doubled brackets.
///
/// An unterminated tag is kept literally; command output must never be
/// silently truncated by a stray bracket.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' if chars.peek() == Some(&'[') => {
                chars.next();
                out.push('[');
            }
            '[' => {
                let mut tag = String::new();
                let mut closed = false;
                for t in chars.by_ref() {
                    if t == ']' {
                        closed = true;
                        break;
                    }
                    tag.push(t);
                }
                if !closed {
                    out.push('[');
                    out.push_str(&tag);
                }
            }
            ']' if chars.peek() == Some(&']') => {
                chars.next();
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_stripped_on_capture() {
        let mut sink = CaptureSink::new();
        sink.write_text("[bold]hello[/] world\n");
        assert_eq!(sink.into_captured(), "hello world\n");
    }

    #[test]
    fn doubled_brackets_are_unescaped() {
        let mut sink = CaptureSink::new();
        sink.write_text("a[[0]] = 1\n");
        assert_eq!(sink.into_captured(), "a[0] = 1\n");
    }

    #[test]
    fn unterminated_tag_is_kept_literal() {
        let mut sink = CaptureSink::new();
        sink.write_text("array[3\n");
        assert_eq!(sink.into_captured(), "array[3\n");
    }

    #[test]
    fn buffered_text_is_flushed_before_raw_bytes() {
        let mut sink = CaptureSink::new();
        sink.write_text("first ");
        sink.write_raw(b"second ");
        sink.write_text("third");
        assert_eq!(sink.into_captured(), "first second third");
    }

    #[test]
    fn raw_bytes_bypass_markup_stripping() {
        let mut sink = CaptureSink::new();
        sink.write_raw(b"[not markup]");
        assert_eq!(sink.into_captured(), "[not markup]");
    }
}
