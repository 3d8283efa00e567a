use anyhow::Result;
use clap::Args;
use notes_client::NoteBoard;
use notes_core::NoteReadDto;

use crate::output;

#[derive(Args)]
pub struct SearchArgs {
    #[arg(help = "Case-insensitive title fragment")]
    pub term: String
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(help = "Exact note title")]
    pub title: String
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(help = "Note title (1-80 characters, unique)")]
    pub title: String,

    #[arg(help = "Note content (1-480 characters)")]
    pub content: String
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Current note title")]
    pub title: String,

    #[arg(long = "title", id = "new_title", help = "New title")]
    pub new_title: Option<String>,

    #[arg(long, help = "New content")]
    pub content: Option<String>
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Exact note title")]
    pub title: String
}

pub async fn list(board: &mut NoteBoard, json: bool) -> Result<()> {
    board.refresh().await?;
    print_notes(board.notes(), json, "Notes")
}

pub async fn search(board: &mut NoteBoard, args: SearchArgs, json: bool) -> Result<()> {
    board.search(&args.term).await?;
    print_notes(board.notes(), json, &format!("Notes matching '{}'", args.term.trim()))
}

pub async fn show(board: &mut NoteBoard, args: ShowArgs, json: bool) -> Result<()> {
    let note = board.view(&args.title).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        output::note(&note);
    }
    Ok(())
}

pub async fn create(board: &mut NoteBoard, args: CreateArgs, json: bool) -> Result<()> {
    let note = board.create(&args.title, &args.content).await?;
    report(board, &note, json)
}

/// Fields left out keep their current value.
pub async fn edit(board: &mut NoteBoard, args: EditArgs, json: bool) -> Result<()> {
    if args.new_title.is_none() && args.content.is_none() {
        output::hint("Nothing to change; pass --title and/or --content");
        return Ok(());
    }

    let current = board.view(&args.title).await?;
    let title = args.new_title.unwrap_or(current.title);
    let content = args.content.unwrap_or(current.content);

    let note = board.update(&args.title, &title, &content).await?;
    report(board, &note, json)
}

pub async fn delete(board: &mut NoteBoard, args: DeleteArgs) -> Result<()> {
    board.delete(&args.title).await?;
    if let Some(banner) = board.banner() {
        output::success(&banner.message);
    }
    Ok(())
}

fn report(board: &NoteBoard, note: &NoteReadDto, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }
    if let Some(banner) = board.banner() {
        output::success(&banner.message);
    }
    output::note(note);
    Ok(())
}

fn print_notes(notes: &[NoteReadDto], json: bool, title: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }

    output::header(title);
    if notes.is_empty() {
        output::hint("No notes found");
        return Ok(());
    }
    for note in notes {
        output::note(note);
    }
    Ok(())
}
