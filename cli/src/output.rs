use colored::Colorize;
use notes_core::NoteReadDto;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn note(note: &NoteReadDto) {
    println!();
    println!("{}", note.title.bold());
    for line in note.content.lines() {
        println!("  {line}");
    }
}
