//! Console hygiene for payloads arriving off the wire: a chat message is
//! displayed as one bounded line no matter what bytes the broker delivered.

/// Longest payload preview shown in a console notice. Chat messages are
/// short; anything past this is noise in a notice line.
const MAX_PREVIEW_CHARS: usize = 160;

/// Render an untrusted payload as a single bounded console line. Control
/// characters (newlines, tabs, escape sequences) appear in their
/// `escape_default` form, and payloads longer than the preview limit are cut
/// with an ellipsis.
pub fn preview(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len().min(MAX_PREVIEW_CHARS) + 1);
    let mut chars = payload.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW_CHARS) {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{preview, MAX_PREVIEW_CHARS};

    #[test]
    fn plain_messages_pass_through() {
        assert_eq!(preview("hola a todos"), "hola a todos");
    }

    #[test]
    fn control_characters_stay_on_one_line() {
        assert_eq!(preview("hi\nthere\r\tend"), "hi\\nthere\\r\\tend");
        assert_eq!(preview("bell\u{7}"), "bell\\u{7}");
    }

    #[test]
    fn long_payloads_are_cut_with_an_ellipsis() {
        let payload = "x".repeat(MAX_PREVIEW_CHARS + 40);
        let out = preview(&payload);
        assert_eq!(out.chars().count(), MAX_PREVIEW_CHARS + 1);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn exact_limit_is_not_cut() {
        let payload = "y".repeat(MAX_PREVIEW_CHARS);
        assert_eq!(preview(&payload), payload);
    }
}
