//! Catalog command handlers.

use anyhow::{Context, Result};
use booktrack_core::api::Book;
use booktrack_core::config::Config;
use booktrack_core::forms::BookForm;
use booktrack_core::store::Request;
use booktrack_core::view::{CatalogQuery, CatalogSort};
use comfy_table::{ContentArrangement, Table};

use super::CommandContext;

pub async fn list(config: &Config, search: String, sort: CatalogSort, json: bool) -> Result<()> {
    let mut ctx = CommandContext::new(config);
    ctx.run(Request::FetchBooks).await?;

    let books = &ctx.store.books.books;
    let visible = CatalogQuery { search, sort }.apply(books);

    if json {
        let out = serde_json::to_string_pretty(&visible).context("serialize books")?;
        println!("{out}");
        return Ok(());
    }

    if visible.is_empty() {
        println!("No books found.");
        return Ok(());
    }

    let noun = if books.len() == 1 { "Book" } else { "Books" };
    println!("{} {noun} Available", books.len());
    if visible.len() != books.len() {
        println!("Showing {} of {} books", visible.len(), books.len());
    }
    println!("{}", books_table(&visible));
    Ok(())
}

/// Raw flag values for `books add`; validated through [`BookForm`].
pub struct AddArgs {
    pub title: String,
    pub author: String,
    pub cover: String,
    pub available: bool,
}

pub async fn add(config: &Config, args: AddArgs) -> Result<()> {
    let form = BookForm {
        title: args.title,
        author: args.author,
        cover_image: args.cover,
        availability: args.available,
    };
    let book = form.validate().map_err(|errors| {
        let messages: Vec<&str> = [errors.title, errors.author].into_iter().flatten().collect();
        anyhow::anyhow!(messages.join("; "))
    })?;

    let mut ctx = CommandContext::new(config);
    ctx.run(Request::CreateBook(book)).await?;

    if let Some(created) = ctx.store.books.books.last() {
        println!("Added \"{}\" by {} ({})", created.title, created.author, created.id);
    }
    Ok(())
}

fn books_table(books: &[&Book]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Author", "Availability"]);
    for book in books {
        table.add_row(vec![
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            if book.availability { "Available" } else { "Unavailable" }.to_string(),
        ]);
    }
    table
}
