use chrono::{DateTime, Local, Utc};

use crate::{
    client::{Draft, FormMode, ListView},
    models::Note,
};

/// Escapes stored text for terminal output. Control characters become the
/// visible `\u{..}` literal so stored data can never emit ANSI sequences or
/// cursor movement. Newlines are kept only when `keep_newlines` is set;
/// titles render on a single line and escape those too.
fn escape_into(out: &mut String, text: &str, keep_newlines: bool) {
    for c in text.chars() {
        if c == '\n' && keep_newlines {
            out.push(c);
        } else if c.is_control() {
            out.push_str(&format!("\\u{{{:x}}}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
}

pub fn escape_title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, false);
    out
}

pub fn escape_content(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, true);
    out
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn render_note(position: usize, note: &Note) -> String {
    let mut out = format!("{}. {}\n", position, escape_title(&note.title));

    for line in escape_content(&note.content).lines() {
        out.push_str("   ");
        out.push_str(line);
        out.push('\n');
    }

    out.push_str(&format!(
        "   Created: {} | Updated: {}\n",
        format_timestamp(&note.created_at),
        format_timestamp(&note.updated_at)
    ));

    out
}

pub fn render_list(view: &ListView) -> String {
    match view {
        ListView::LoadFailed => "Failed to load notes. Please try again later.\n".to_string(),
        ListView::Notes(notes) if notes.is_empty() => "No notes yet.\n".to_string(),
        ListView::Notes(notes) => notes
            .iter()
            .enumerate()
            .map(|(i, note)| render_note(i + 1, note))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_form(draft: &Draft, mode: &FormMode) -> String {
    let action = match mode {
        FormMode::Create => "save as new note".to_string(),
        FormMode::Editing(id) => format!("update note {}", escape_title(id)),
    };

    format!(
        "Title:   {}\nContent: {}\nOn save: {}\n",
        escape_title(&draft.title),
        escape_title(&draft.content),
        action
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_note(title: &str, content: &str) -> Note {
        let now = Utc::now();
        Note {
            id: "11111111-2222-3333-4444-555555555555".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn plain_text_is_unchanged_by_escaping() {
        assert_eq!(escape_title("Buy groceries!"), "Buy groceries!");
        assert_eq!(escape_content("milk & eggs"), "milk & eggs");
    }

    #[test]
    fn ansi_sequences_render_as_visible_literals() {
        let escaped = escape_content("evil\u{1b}[2Jtext");
        assert_eq!(escaped, "evil\\u{1b}[2Jtext");
        assert!(!escaped.contains('\u{1b}'));
    }

    #[test]
    fn titles_cannot_span_lines() {
        assert_eq!(escape_title("line\nbreak"), "line\\u{a}break");
    }

    #[test]
    fn content_keeps_newlines_but_no_other_controls() {
        let escaped = escape_content("first\nsecond\rthird");
        assert_eq!(escaped, "first\nsecond\\u{d}third");
    }

    #[test]
    fn rendered_note_emits_no_raw_control_bytes() {
        let note = sample_note("a\u{1b}[31mtitle", "b\u{7}ody\nmore");
        let rendered = render_note(1, &note);

        assert!(
            rendered
                .chars()
                .all(|c| c == '\n' || !c.is_control())
        );
        assert!(rendered.contains("\\u{1b}"));
        assert!(rendered.contains("\\u{7}"));
    }

    #[test]
    fn multiline_content_is_indented_under_the_entry() {
        let note = sample_note("title", "first\nsecond");
        let rendered = render_note(3, &note);

        assert!(rendered.starts_with("3. title\n"));
        assert!(rendered.contains("\n   first\n   second\n"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_list(&ListView::Notes(Vec::new())), "No notes yet.\n");
    }

    #[test]
    fn failed_load_renders_error_placeholder() {
        assert_eq!(
            render_list(&ListView::LoadFailed),
            "Failed to load notes. Please try again later.\n"
        );
    }

    #[test]
    fn list_renders_one_numbered_entry_per_note() {
        let view = ListView::Notes(vec![
            sample_note("first", "a"),
            sample_note("second", "b"),
            sample_note("third", "c"),
        ]);
        let rendered = render_list(&view);

        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
        assert!(rendered.contains("3. third"));
    }

    #[test]
    fn timestamps_format_in_local_time() {
        let rendered = format_timestamp(&Utc::now());
        assert_eq!(rendered.len(), 19);
        assert_eq!(&rendered[4..5], "-");
        assert_eq!(&rendered[13..14], ":");
    }
}
