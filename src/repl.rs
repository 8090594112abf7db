use tokio::io::AsyncBufReadExt;

use std::io::Write as _;

use crate::{
    client::{ClientError, NotesClient, Saved},
    view,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Title(String),
    Content(String),
    Show,
    Save,
    Edit(usize),
    Cancel,
    Delete(usize),
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  list            fetch and show all notes
  title <text>    set the draft title
  content <text>  set the draft content
  show            show the draft and what save will do
  save            submit the draft (create, or update when editing)
  edit <n>        edit the note at position n
  cancel          leave edit mode and clear the draft
  delete <n>      delete the note at position n (asks first)
  help            show this help
  quit            exit
";

pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match name {
        "list" | "ls" => Some(Command::List),
        "title" => Some(Command::Title(rest.to_string())),
        "content" => Some(Command::Content(rest.to_string())),
        "show" => Some(Command::Show),
        "save" => Some(Command::Save),
        "edit" => rest.parse().ok().map(Command::Edit),
        "cancel" => Some(Command::Cancel),
        "delete" | "rm" => rest.parse().ok().map(Command::Delete),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Command loop. One command at a time; each request is awaited to completion
/// before the next prompt. Failures are logged and reported, never fatal.
pub async fn run(client: &mut NotesClient) -> std::io::Result<()> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    print!("{}", view::render_list(client.view()));
    println!("\nType 'help' for the command list.");

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            println!("Unknown command. Type 'help' for the command list.");
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print!("{HELP}"),
            Command::List => {
                if let Err(e) = client.load().await {
                    tracing::error!("Failed to load notes: {e}");
                }
                print!("{}", view::render_list(client.view()));
            }
            Command::Title(text) => client.set_title(text),
            Command::Content(text) => client.set_content(text),
            Command::Show => print!("{}", view::render_form(client.draft(), client.mode())),
            Command::Save => match client.save().await {
                Ok(Saved::Created) => {
                    println!("Note saved.");
                    print!("{}", view::render_list(client.view()));
                }
                Ok(Saved::Updated) => {
                    println!("Note updated.");
                    print!("{}", view::render_list(client.view()));
                }
                Err(ClientError::EmptyDraft) => {
                    tracing::warn!("Rejected save: draft title or content is empty");
                    println!("Please enter both a title and content for the note.");
                }
                Err(e) => {
                    tracing::error!("Failed to save note: {e}");
                    println!("Failed to save note: {e}");
                }
            },
            Command::Edit(position) => match client.edit(position) {
                Ok(note) => println!(
                    "Editing '{}'. Adjust title/content, then save.",
                    view::escape_title(&note.title)
                ),
                Err(e) => println!("{e}"),
            },
            Command::Cancel => {
                client.cancel();
                println!("Draft cleared.");
            }
            Command::Delete(position) => {
                let title = match client.entry_at(position) {
                    Ok(note) => view::escape_title(&note.title),
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };

                print!("Delete '{title}'? [y/N] ");
                std::io::stdout().flush()?;
                let Some(answer) = lines.next_line().await? else {
                    break;
                };
                if !is_confirmation(&answer) {
                    println!("Note kept.");
                    continue;
                }

                match client.delete(position).await {
                    Ok(_) => {
                        println!("Note deleted.");
                        print!("{}", view::render_list(client.view()));
                    }
                    Err(e) => {
                        tracing::error!("Failed to delete note: {e}");
                        println!("Failed to delete note: {e}");
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_arguments() {
        assert_eq!(parse_command("list"), Some(Command::List));
        assert_eq!(parse_command("  ls  "), Some(Command::List));
        assert_eq!(
            parse_command("title Buy groceries"),
            Some(Command::Title("Buy groceries".to_string()))
        );
        assert_eq!(
            parse_command("content milk and eggs"),
            Some(Command::Content("milk and eggs".to_string()))
        );
        assert_eq!(parse_command("edit 3"), Some(Command::Edit(3)));
        assert_eq!(parse_command("delete 1"), Some(Command::Delete(1)));
        assert_eq!(parse_command("rm 2"), Some(Command::Delete(2)));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        assert_eq!(parse_command("edit"), None);
        assert_eq!(parse_command("edit two"), None);
        assert_eq!(parse_command("delete -1"), None);
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert_eq!(parse_command("frobnicate"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn only_an_explicit_yes_confirms() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation("  Y "));
        assert!(is_confirmation("yes"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("no"));
        assert!(!is_confirmation("yep"));
    }
}
