//! Subcommand handlers.
//!
//! Each handler opens its own service over the shared key-value medium and
//! prints plain lines to stdout.

use crate::cli::Commands;
use versemem_core::lookup::{BIBLE_BOOKS, POPULAR_MEMORY_VERSES};
use versemem_core::{
    overall_progress, reading_percent, reciting_percent, step_percentage, ActionOutcome,
    KeyValueStore, LibraryService, PracticeService, PracticeServiceError, ProgressRecord,
    ProgressStore, Verse,
};

pub fn run<S: KeyValueStore>(command: Commands, kv: S) -> Result<(), String> {
    match command {
        Commands::List { search } => list(&kv, search.as_deref()),
        Commands::Add {
            reference,
            text,
            notes,
        } => add(&kv, &reference, &text, notes),
        Commands::Show { id } => show(&kv, &id),
        Commands::Read { id } => act(&kv, &id, |service| service.complete_reading(&id)),
        Commands::Recite { id } => act(&kv, &id, |service| service.attempt_recitation(&id)),
        Commands::Review { id } => act(&kv, &id, |service| service.mark_reviewed(&id)),
        Commands::Note { id, text } => act(&kv, &id, |service| service.add_note(&id, text)),
        Commands::Delete { id } => delete(&kv, &id),
        Commands::Stats => stats(&kv),
        Commands::Books => {
            for book in BIBLE_BOOKS {
                println!("{:<16} {:<18} {} chapters", book.id, book.name, book.chapters);
            }
            Ok(())
        }
        Commands::Popular => {
            for reference in POPULAR_MEMORY_VERSES {
                println!("{reference}");
            }
            Ok(())
        }
    }
}

fn list<S: KeyValueStore>(kv: &S, search: Option<&str>) -> Result<(), String> {
    let library = LibraryService::new(kv);
    let progress = ProgressStore::new(kv);
    let verses = match search {
        Some(term) => library.search(term),
        None => library.list(),
    };

    if verses.is_empty() {
        println!("No verses.");
        return Ok(());
    }

    for verse in verses {
        let step = progress
            .get_progress(&verse.id)
            .map(|record| record.current_step);
        let label = step.map_or("Not started", |step| step.label());
        println!(
            "{}  {:<24} {:<12} {:>4.0}%",
            verse.id,
            verse.reference,
            label,
            step_percentage(step)
        );
    }
    Ok(())
}

fn add<S: KeyValueStore>(
    kv: &S,
    reference: &str,
    text: &str,
    notes: Option<String>,
) -> Result<(), String> {
    let verse = LibraryService::new(kv)
        .add_manual(reference, text, notes)
        .map_err(|err| format!("add failed: {err}"))?;
    println!("Added {} ({})", verse.reference, verse.id);
    Ok(())
}

fn show<S: KeyValueStore>(kv: &S, id: &str) -> Result<(), String> {
    let verse = LibraryService::new(kv)
        .get(id)
        .ok_or_else(|| format!("verse not found: {id}"))?;
    print_verse(&verse);
    match ProgressStore::new(kv).get_progress(id) {
        Some(record) => print_progress(&record),
        None => println!("Not started."),
    }
    Ok(())
}

fn act<S: KeyValueStore>(
    kv: &S,
    id: &str,
    action: impl FnOnce(&PracticeService<&S>) -> Result<ActionOutcome, PracticeServiceError>,
) -> Result<(), String> {
    let service = PracticeService::new(kv);
    service
        .open_session(id)
        .map_err(|err| format!("practice failed: {err}"))?;
    let outcome = action(&service).map_err(|err| format!("practice failed: {err}"))?;
    if let Some(reason) = outcome.ignored {
        println!("Nothing recorded: {reason}.");
    }
    print_progress(&outcome.record);
    Ok(())
}

fn delete<S: KeyValueStore>(kv: &S, id: &str) -> Result<(), String> {
    LibraryService::new(kv)
        .delete(id)
        .map_err(|err| format!("delete failed: {err}"))?;
    println!("Deleted {id}.");
    Ok(())
}

fn stats<S: KeyValueStore>(kv: &S) -> Result<(), String> {
    let stats = LibraryService::new(kv).dashboard_stats();
    println!("Total verses:  {}", stats.total);
    println!("In progress:   {}", stats.in_progress);
    println!("Mastered:      {}", stats.mastered);
    println!(
        "Day streak:    {}{}",
        stats.current_streak,
        if stats.has_studied_today {
            " (studied today)"
        } else {
            ""
        }
    );
    Ok(())
}

fn print_verse(verse: &Verse) {
    println!("{}", verse.reference);
    println!("{}", verse.text);
    if let Some(notes) = &verse.notes {
        println!("Notes: {notes}");
    }
    println!("Added: {}", verse.date_added.to_rfc3339());
}

fn print_progress(record: &ProgressRecord) {
    println!("Phase:    {}", record.current_step);
    println!(
        "Reading:  {}/10 ({:.0}%)",
        record.reading_count,
        reading_percent(record)
    );
    println!(
        "Reciting: {}/10 ({:.0}%)",
        record.reciting_count,
        reciting_percent(record)
    );
    println!("Reviews:  {}", record.daily_review_streak);
    println!("Overall:  {:.0}%", overall_progress(record));
    for (index, note) in record.notes.iter().enumerate() {
        println!("Note {}: {note}", index + 1);
    }
}
