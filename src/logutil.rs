//! Log helpers for raw console input, so a stray paste or terminal escape from the
//! player never splits or garbles a log line.

const MAX_PREVIEW: usize = 80;
const ESC: char = '\u{1b}';

/// Render a line of console input for single-line logging.
///
/// ANSI escape sequences (arrow keys, colour codes pasted from another terminal) are
/// dropped. Remaining control characters are shown in caret notation (`^M`, `^[`, `^?`).
/// The preview is capped at 80 visible characters and marked with an ellipsis when cut.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut shown = 0usize;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESC && chars.peek() == Some(&'[') {
            chars.next();
            // CSI: parameter bytes until a final byte in '@'..='~'
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        if shown >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\u{7f}' => out.push_str("^?"),
            c if (c as u32) < 0x20 => {
                out.push('^');
                out.push(char::from(b'@' + c as u8));
            }
            c if c.is_control() => out.push('�'),
            c => out.push(c),
        }
        shown += 1;
    }
    out
}
