// src/session.rs
// =============================================================================
// Interactive browsing of a loaded gallery.
//
// Each stdin line is one user action, the same actions a reader has on the
// page: type in the search box, click a repository, press back.
//
// Opening a repository does not block the prompt. The fetch runs in its own
// task and reports back over a channel; the gallery's ticket check makes sure
// only the latest request ends up on screen.
// =============================================================================

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::error::Result as GalleryResult;
use crate::gallery::{DetailTicket, Gallery};
use crate::github::{GitHubClient, RepositoryDetail};
use crate::page::ViewMode;

const HELP: &str = "\
Commands:
  filter [TEXT]   show repositories whose name contains TEXT (no TEXT: show all)
  open NAME       show details for repository NAME
  back            return to the repository list
  list            print the current view again
  html            print the page as HTML
  help            show this message
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Filter(String),
    Open(String),
    Back,
    List,
    Html,
    Help,
    Quit,
}

impl SessionCommand {
    // Parses one input line. Blank lines are None; unknown words are an error
    // message for the user.
    pub fn parse(line: &str) -> Option<std::result::Result<Self, String>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "filter" | "f" | "/" => Ok(Self::Filter(rest.to_string())),
            "open" | "o" if !rest.is_empty() => Ok(Self::Open(rest.to_string())),
            "open" | "o" => Err("usage: open NAME".to_string()),
            "back" | "b" => Ok(Self::Back),
            "list" | "ls" | "l" => Ok(Self::List),
            "html" => Ok(Self::Html),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        };
        Some(command)
    }
}

type DetailMessage = (DetailTicket, GalleryResult<RepositoryDetail>);

pub async fn run_session(gallery: &mut Gallery, client: &GitHubClient) -> Result<()> {
    let (sender, mut receiver) = mpsc::channel::<DetailMessage>(8);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_view(gallery);
    println!("\nType 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match SessionCommand::parse(&line) {
                    None => continue,
                    Some(Err(message)) => println!("{}", message),
                    Some(Ok(SessionCommand::Quit)) => break,
                    Some(Ok(command)) => handle(gallery, client, &sender, command),
                }
            }
            Some((ticket, result)) = receiver.recv() => {
                let name = ticket.name().to_string();
                if gallery.finish_detail(ticket, result) {
                    print_view(gallery);
                    print_summary(gallery);
                } else {
                    tracing::debug!(repo = %name, "ignored late repository detail");
                }
            }
        }
    }

    Ok(())
}

fn handle(
    gallery: &mut Gallery,
    client: &GitHubClient,
    sender: &mpsc::Sender<DetailMessage>,
    command: SessionCommand,
) {
    match command {
        SessionCommand::Filter(text) => {
            let visible = gallery.filter(&text);
            print_view(gallery);
            println!("\n{} repositories match", visible);
        }
        SessionCommand::Open(requested) => {
            let names = gallery.repository_names();
            let name = resolve_name(&names, &requested);
            if !names.contains(&name) {
                println!("'{}' is not in the list, asking GitHub anyway", name);
            }

            let ticket = gallery.begin_detail(&name);
            println!("Loading {}...", name);

            let client = client.clone();
            let sender = sender.clone();
            tokio::spawn(async move {
                let result = client.fetch_repository_detail(ticket.name()).await;
                // The session may be gone by now; nothing to deliver to then
                let _ = sender.send((ticket, result)).await;
            });
        }
        SessionCommand::Back if gallery.mode() == ViewMode::List => {
            println!("Already showing the repository list");
        }
        SessionCommand::Back => {
            gallery.back();
            print_view(gallery);
        }
        SessionCommand::List => {
            print_view(gallery);
            print_summary(gallery);
        }
        SessionCommand::Html => print!("{}", gallery.to_html()),
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => {}
    }
}

// Exact name first, then a case-insensitive match from the rendered list
fn resolve_name(names: &[String], requested: &str) -> String {
    if names.iter().any(|n| n == requested) {
        return requested.to_string();
    }
    names
        .iter()
        .find(|n| n.eq_ignore_ascii_case(requested))
        .cloned()
        .unwrap_or_else(|| requested.to_string())
}

fn print_summary(gallery: &Gallery) {
    match (gallery.mode(), gallery.current_detail()) {
        (ViewMode::Detail, Some(detail)) => println!(
            "\nShowing {} ({} languages), type 'back' for the list",
            detail.name,
            detail.languages.len()
        ),
        _ => println!("\n{} repositories listed", gallery.repository_names().len()),
    }
}

fn print_view(gallery: &Gallery) {
    println!("{}", "-".repeat(60));
    println!("{}", gallery.page().visible_text());
}
