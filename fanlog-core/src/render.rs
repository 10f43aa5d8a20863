use std::fmt::{self, Write};

/// Formats `args` into a string holding at most `max_message_length - 1` bytes.
///
/// Overflowing text is dropped without error. The cut never splits a UTF-8
/// character, so a message may come out a few bytes shorter than the bound.
pub fn render_bounded(args: fmt::Arguments<'_>, max_message_length: usize) -> String {
    let limit = max_message_length.saturating_sub(1);
    if let Some(text) = args.as_str() {
        return truncated(text, limit).to_string();
    }
    let mut buffer = BoundedBuffer {
        text: String::with_capacity(limit.min(256)),
        limit,
    };
    // An error only means the bound was hit.
    let _ = buffer.write_fmt(args);
    buffer.text
}

fn truncated(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

struct BoundedBuffer {
    text: String,
    limit: usize,
}

impl Write for BoundedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit - self.text.len();
        let kept = truncated(s, room);
        self.text.push_str(kept);
        if kept.len() < s.len() {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_untouched() {
        assert_eq!(
            render_bounded(format_args!("hello {}\n", 5), 200),
            "hello 5\n"
        );
        assert_eq!(render_bounded(format_args!("static"), 200), "static");
    }

    #[test]
    fn test_long_message_is_cut_to_bound() {
        let long = "x".repeat(500);
        let out = render_bounded(format_args!("{long}"), 200);
        assert_eq!(out.len(), 199);
        let out = render_bounded(format_args!("{}-{}", "a".repeat(150), "b".repeat(150)), 200);
        assert_eq!(out.len(), 199);
        assert!(out.starts_with(&"a".repeat(150)));
        assert!(out.ends_with('b'));
    }

    #[test]
    fn test_exact_fit() {
        let text = "y".repeat(9);
        assert_eq!(render_bounded(format_args!("{text}"), 10), text);
        assert_eq!(render_bounded(format_args!("{text}z"), 10), text);
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        // "é" is two bytes; the fourth byte would split it.
        let out = render_bounded(format_args!("{}", "aaé"), 4);
        assert_eq!(out, "aa");
        let out = render_bounded(format_args!("aaé"), 4);
        assert_eq!(out, "aa");
    }

    #[test]
    fn test_degenerate_bounds() {
        assert_eq!(render_bounded(format_args!("{}", 42), 1), "");
        assert_eq!(render_bounded(format_args!("{}", 42), 0), "");
    }
}
