//! Markdown-subset formatter for chat messages.
//!
//! Supports exactly four constructs, applied in this order:
//!
//! 1. newlines become `<br>`
//! 2. `**text**` becomes `<strong>text</strong>`
//! 3. `*text*` becomes `<em>text</em>`
//! 4. lines starting with `- ` become `<li>` items inside `<ul>`
//!
//! Each step works on the previous step's output, so bold runs before italic.
//! Anything else passes through untouched; the output is not sanitized and must only be
//! fed trusted assistant text.

/// Marker inserted for every newline; also the list-scan segment separator.
pub const LINE_BREAK: &str = "<br>";

const LIST_ITEM_PREFIX: &str = "- ";

/// Render assistant (or user) text to HTML. Total and deterministic.
pub fn format_message(text: &str) -> String {
    let formatted = text.replace('\n', LINE_BREAK);
    let formatted = replace_spans(&formatted, "**", "<strong>", "</strong>");
    let formatted = replace_spans(&formatted, "*", "<em>", "</em>");
    render_lists(&formatted)
}

/// Characters an emphasis span can never cross. `\n` is already gone by the
/// time spans are matched, but carriage returns and Unicode line/paragraph
/// separators survive step 1.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Wrap every `marker … marker` span in `open`/`close`.
///
/// Left to right, shortest span wins: an opening marker pairs with the very
/// next marker on the same line, and the empty span is allowed. An opener with
/// no partner before the end of the line cannot be followed by any other
/// successful opener on that line, so the whole line remainder is copied
/// literally and scanning resumes at the terminator.
fn replace_spans(text: &str, marker: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(marker) {
        let body_start = start + marker.len();
        let after = &rest[body_start..];
        let line_end = after.find(is_line_terminator).unwrap_or(after.len());

        match after[..line_end].find(marker) {
            Some(body_len) => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after[..body_len]);
                out.push_str(close);
                rest = &after[body_len + marker.len()..];
            }
            None => {
                out.push_str(&rest[..body_start + line_end]);
                rest = &after[line_end..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Turn runs of `- ` segments into an unordered list.
///
/// The first item of a run opens `<ul>`; the first non-item after a run gets
/// `</ul>` prepended. A run reaching the end of the text is closed after the
/// final segment. Segments are rejoined with the line-break marker, so the
/// breaks between items stay in place.
fn render_lists(text: &str) -> String {
    let mut in_list = false;
    let mut segments: Vec<String> = Vec::new();

    for segment in text.split(LINE_BREAK) {
        match segment.strip_prefix(LIST_ITEM_PREFIX) {
            Some(item) => {
                if in_list {
                    segments.push(format!("<li>{item}</li>"));
                } else {
                    in_list = true;
                    segments.push(format!("<ul><li>{item}</li>"));
                }
            }
            None => {
                if in_list {
                    in_list = false;
                    segments.push(format!("</ul>{segment}"));
                } else {
                    segments.push(segment.to_string());
                }
            }
        }
    }

    let mut out = segments.join(LINE_BREAK);
    if in_list {
        out.push_str("</ul>");
    }
    out
}
