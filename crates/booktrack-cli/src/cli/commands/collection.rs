//! Personal collection command handlers.
//!
//! Status and rating updates load the collection first: the store only
//! updates books it already tracks.

use anyhow::{Context, Result};
use booktrack_core::api::{BookId, MyBookEntry, Rating, ReadingStatus};
use booktrack_core::config::Config;
use booktrack_core::store::Request;
use booktrack_core::view::{CollectionQuery, CollectionStats};
use comfy_table::{ContentArrangement, Table};

use super::CommandContext;

pub async fn list(config: &Config, query: &CollectionQuery, json: bool) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::FetchMyBooks).await?;

    let entries = &ctx.store.my_books.entries;
    let visible = query.apply(entries);

    if json {
        let out = serde_json::to_string_pretty(&visible).context("serialize collection")?;
        println!("{out}");
        return Ok(());
    }

    if visible.is_empty() {
        if entries.is_empty() {
            println!("Your collection is empty. Add a book with `booktrack mybooks add <BOOK_ID>`.");
        } else {
            println!("No books match the current filter.");
        }
        return Ok(());
    }

    println!("Showing {} of {} books", visible.len(), entries.len());
    println!("{}", entries_table(&visible));
    Ok(())
}

pub async fn add(config: &Config, book_id: BookId) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::AddToMyBooks(book_id.clone())).await?;
    match ctx.store.my_books.entry(&book_id) {
        Some(entry) => println!(
            "Added \"{}\" to your collection ({})",
            entry.book.title, entry.status
        ),
        None => println!("Added {book_id} to your collection"),
    }
    Ok(())
}

pub async fn set_status(config: &Config, book_id: BookId, status: ReadingStatus) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::FetchMyBooks).await?;
    ctx.run(Request::UpdateStatus {
        book_id: book_id.clone(),
        status,
    })
    .await?;
    println!("{} → {status}", title_of(&ctx, &book_id));
    Ok(())
}

pub async fn rate(config: &Config, book_id: BookId, rating: u8) -> Result<()> {
    let rating = Rating::new(rating)?;
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::FetchMyBooks).await?;
    ctx.run(Request::UpdateRating {
        book_id: book_id.clone(),
        rating,
    })
    .await?;
    println!("{} → {}", title_of(&ctx, &book_id), rating_label(rating));
    Ok(())
}

pub async fn stats(config: &Config) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::FetchMyBooks).await?;
    let stats = CollectionStats::from_entries(&ctx.store.my_books.entries);

    let mut table = Table::new();
    table.set_header(vec!["Status", "Books"]);
    for status in ReadingStatus::ALL {
        table.add_row(vec![status.label().to_string(), stats.count(status).to_string()]);
    }
    table.add_row(vec!["Total".to_string(), stats.total.to_string()]);
    table.add_row(vec!["Rated".to_string(), stats.rated.to_string()]);
    println!("{table}");
    Ok(())
}

fn title_of(ctx: &CommandContext, book_id: &BookId) -> String {
    ctx.store
        .my_books
        .entry(book_id)
        .map_or_else(|| book_id.to_string(), |entry| entry.book.title.clone())
}

fn rating_label(rating: Rating) -> String {
    if rating.is_rated() {
        rating.to_string()
    } else {
        "No rating".to_string()
    }
}

fn entries_table(entries: &[&MyBookEntry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Book ID", "Title", "Author", "Status", "Rating", "Added"]);
    for entry in entries {
        table.add_row(vec![
            entry.book.id.to_string(),
            entry.book.title.clone(),
            entry.book.author.clone(),
            entry.status.to_string(),
            rating_label(entry.rating),
            entry
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ]);
    }
    table
}
