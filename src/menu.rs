//! Interactive text-menu shell.
//!
//! A numbered menu looped until explicit exit: view, remove, add (manual),
//! add from JSON file, exit. Every operation reports its failure as a
//! human-readable message and returns control to the menu — nothing short of
//! option 5 (or end of input) ends the session.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::import;
use crate::models::TurnPair;
use crate::session::Session;

/// Run the menu loop until exit or EOF.
pub async fn run_menu(session: &Session) -> Result<()> {
    println!("Curating dataset '{}'", session.dataset());
    loop {
        println!();
        println!("--- MENU ---");
        println!("1. View data");
        println!("2. Remove pairs");
        println!("3. Add pair (manual)");
        println!("4. Add pairs from JSON file");
        println!("5. Exit");

        let Some(choice) = prompt("Enter your option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => report(view_op(session).await),
            "2" => report(remove_op(session).await),
            "3" => report(add_op(session).await),
            "4" => report(import_op(session).await),
            "5" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid option! Please try again."),
        }
    }
    Ok(())
}

/// Print turn pairs with their 1-based display indices.
pub fn print_pairs(pairs: &[TurnPair]) {
    if pairs.is_empty() {
        println!("Dataset is empty.");
        return;
    }
    for pair in pairs {
        println!("Index {}:", pair.index + 1);
        println!("  User: {}", pair.user);
        println!("  Assistant: {}", pair.assistant);
        println!("{}", "-".repeat(30));
    }
}

async fn view_op(session: &Session) -> Result<()> {
    let pairs = session.view().await?;
    print_pairs(&pairs);
    Ok(())
}

async fn remove_op(session: &Session) -> Result<()> {
    // Always show current state before asking which pairs to drop.
    let pairs = session.view().await?;
    print_pairs(&pairs);
    if pairs.is_empty() {
        return Ok(());
    }

    let Some(tokens) = prompt("Enter the indices to remove (e.g., 1 3 5-7): ")? else {
        return Ok(());
    };
    let outcome = session.remove(&tokens).await?;
    println!(
        "Removed {} pair(s); {} remain. Data successfully updated.",
        outcome.removed, outcome.remaining
    );
    Ok(())
}

async fn add_op(session: &Session) -> Result<()> {
    let Some(user) = prompt("Enter User value: ")? else {
        return Ok(());
    };
    let Some(assistant) = prompt("Enter Assistant value: ")? else {
        return Ok(());
    };
    let total = session.add(&user, &assistant).await?;
    println!("Data successfully added and saved ({} pairs total).", total);
    Ok(())
}

async fn import_op(session: &Session) -> Result<()> {
    let Some(path) = prompt("Enter the path to the JSON file: ")? else {
        return Ok(());
    };
    let entries = import::load_import_file(&PathBuf::from(path))?;
    let added = session.import(entries).await?;
    println!("Added {} pair(s) from file and saved.", added);
    Ok(())
}

/// Print a prompt and read one trimmed line. `None` means end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        println!("Error: {:#}", e);
    }
}
