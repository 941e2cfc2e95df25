//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage without the Flutter runtime.
//! - Drive a store file directly for quick local sanity checks.
//!
//! Usage: `todo_cli [<path> (list | add <text> | toggle <index> | remove <index> | move <from> <to>)]`

use std::process::ExitCode;
use todo_core::{ItemStore, JsonFileCodec, LoadOutcome, StoreConfig};

fn main() -> ExitCode {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        match StoreConfig::default_location() {
            Some(config) => println!("todo_core default_store={}", config.path.display()),
            None => println!("todo_core default_store=unavailable"),
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let (path, command) = args
        .split_first()
        .ok_or_else(|| "missing store path".to_string())?;
    let (mut store, outcome) =
        ItemStore::open(&StoreConfig::new(path)).map_err(|err| err.to_string())?;
    if let LoadOutcome::Recovered { backup, .. } = &outcome {
        let backup = backup
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "none".to_string());
        eprintln!("warning: store file was unreadable; started empty (backup={backup})");
    }

    match command {
        [] => print_items(&store),
        [cmd] if cmd == "list" => print_items(&store),
        [cmd, text] if cmd == "add" => {
            store.add(text.as_str()).map_err(|err| err.to_string())?;
            print_items(&store);
        }
        [cmd, index] if cmd == "toggle" => {
            let id = id_at(&store, index)?;
            store.toggle_completed(id).map_err(|err| err.to_string())?;
            print_items(&store);
        }
        [cmd, index] if cmd == "remove" => {
            let id = id_at(&store, index)?;
            store.remove(id).map_err(|err| err.to_string())?;
            print_items(&store);
        }
        [cmd, from, to] if cmd == "move" => {
            store
                .reorder(parse_index(from)?, parse_index(to)?)
                .map_err(|err| err.to_string())?;
            print_items(&store);
        }
        other => return Err(format!("unrecognized command: {}", other.join(" "))),
    }
    Ok(())
}

fn print_items(store: &ItemStore<JsonFileCodec>) {
    for (index, item) in store.items().iter().enumerate() {
        println!("{index}: {item}");
    }
    println!(
        "{} item(s), {} completed",
        store.len(),
        store.completed_count()
    );
}

fn id_at(store: &ItemStore<JsonFileCodec>, raw: &str) -> Result<todo_core::ItemId, String> {
    let index = parse_index(raw)?;
    store
        .id_at(index)
        .ok_or_else(|| format!("no item at index {index}"))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("invalid index `{raw}`"))
}
