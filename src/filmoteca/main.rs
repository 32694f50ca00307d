use clap::Parser;
use colored::*;
use filmoteca::api::CatalogApi;
use filmoteca::backup::{human_size, BackupManager, BackupTag};
use filmoteca::commands::add::NewEntry;
use filmoteca::commands::{CmdMessage, CmdResult, MessageLevel, WriteOptions};
use filmoteca::config::CatalogConfig;
use filmoteca::error::{CatalogError, Result};
use filmoteca::model::Schema;
use filmoteca::store::fs::FileStore;
use filmoteca::validate;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

mod args;
use args::{BackupCommands, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: CatalogApi<FileStore>,
    backups: BackupManager,
    schema: Schema,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Add {
            title,
            key,
            created,
            original_title,
            kind,
            genres,
            rating,
            notes,
            imdb_rating,
            format,
            no_prompt,
            dry_run,
            no_backup,
        } => {
            let entry = assemble_entry(
                ctx.schema,
                AddArgs {
                    title,
                    key,
                    created,
                    original_title,
                    kind,
                    genres,
                    rating,
                    notes,
                    imdb_rating,
                    format,
                },
                no_prompt,
            )?;
            let opts = write_options(dry_run, no_backup);
            let result = ctx.api.add_entry(&entry, &opts)?;
            print_result(&result);
            Ok(())
        }
        Commands::Delete {
            id,
            dry_run,
            no_backup,
        } => {
            let target = match id {
                Some(v) => v,
                None => prompt_required("Const/id to delete")?,
            };
            let opts = write_options(dry_run, no_backup);
            let result = ctx.api.delete_entry(&target, &opts)?;
            print_result(&result);
            Ok(())
        }
        Commands::Rate {
            id,
            rating,
            date,
            clear,
            dry_run,
            no_backup,
        } => handle_rate(&mut ctx, id, rating, date, clear, dry_run, no_backup),
        Commands::Backup(cmd) => handle_backup(&ctx, cmd),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let catalog = cli.file.clone();
    let dir = catalog
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let config = CatalogConfig::load(&dir).unwrap_or_default();
    let schema = cli.schema.map(Schema::from).unwrap_or(config.schema);
    let backup_dir = dir.join(&config.backup_dir);

    let store = FileStore::new(catalog.clone(), backup_dir.clone());
    Ok(AppContext {
        api: CatalogApi::new(store, schema),
        backups: BackupManager::new(catalog, backup_dir),
        schema,
    })
}

fn write_options(dry_run: bool, no_backup: bool) -> WriteOptions {
    WriteOptions {
        dry_run,
        backup: !no_backup,
    }
}

struct AddArgs {
    title: Option<String>,
    key: Option<String>,
    created: Option<String>,
    original_title: Option<String>,
    kind: Option<String>,
    genres: Option<String>,
    rating: Option<String>,
    notes: Option<String>,
    imdb_rating: Option<String>,
    format: Option<String>,
}

/// Fill the entry from flags, prompting for whatever is missing unless
/// `--no-prompt` was given (then unset fields stay empty and validation in
/// the command layer has the final say).
fn assemble_entry(schema: Schema, args: AddArgs, no_prompt: bool) -> Result<NewEntry> {
    let title = match args.title {
        Some(t) if !t.is_empty() => t,
        _ if no_prompt => String::new(),
        _ => prompt_required("Title")?,
    };

    let mut entry = NewEntry {
        title,
        ..NewEntry::default()
    };
    entry.key = opt_field(args.key, no_prompt, || {
        prompt_validated("IMDb const (e.g. tt0133093, optional)", validate::valid_key)
    })?;
    entry.created = opt_field(args.created, no_prompt, || {
        prompt_validated("Inclusion date YYYY-MM-DD (optional)", |s| {
            s.is_empty() || validate::valid_date(s)
        })
    })?;
    entry.original_title = opt_field(args.original_title, no_prompt, || {
        prompt("Original title (optional)")
    })?;
    entry.kind = opt_field(args.kind, no_prompt, || {
        prompt("Type, Película or Serie (default Película)")
    })?;
    entry.genres = opt_field(args.genres, no_prompt, || {
        prompt("Genres, comma-separated (optional)")
    })?;
    entry.rating = opt_field(args.rating, no_prompt, || {
        prompt_validated("Personal rating 0-10 (optional)", |s| {
            validate::parse_rating(s).is_some()
        })
    })?;
    entry.notes = opt_field(args.notes, no_prompt, || prompt("Notes (optional)"))?;
    match schema {
        Schema::Legacy => {
            entry.imdb_rating = opt_field(args.imdb_rating, no_prompt, || {
                prompt("IMDb rating (optional)")
            })?;
        }
        Schema::Current => {
            entry.format = opt_field(args.format, no_prompt, || {
                prompt("Format, br or dvd (optional)")
            })?;
        }
    }
    Ok(entry)
}

fn opt_field<F>(flag: Option<String>, no_prompt: bool, ask: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    match flag {
        Some(v) => Ok(v),
        None if no_prompt => Ok(String::new()),
        None => ask(),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_rate(
    ctx: &mut AppContext,
    id: Option<String>,
    rating: Option<String>,
    date: Option<String>,
    clear: bool,
    dry_run: bool,
    no_backup: bool,
) -> Result<()> {
    let target = match id {
        Some(v) => v,
        None => prompt_required("Const/id to update")?,
    };
    let opts = write_options(dry_run, no_backup);

    if clear {
        let result = ctx.api.rate_entry(&target, None, None, true, &opts)?;
        print_result(&result);
        return Ok(());
    }

    let rating = match rating {
        Some(r) => r,
        None => {
            let matches = ctx.api.current_ratings(&target)?;
            if matches.is_empty() {
                println!(
                    "{}",
                    format!("No record found with id {}. Nothing to do.", target).dimmed()
                );
                return Ok(());
            }
            prompt_validated(&rating_prompt_label(&matches), |s| {
                validate::parse_rating(s).is_some()
            })?
        }
    };

    let result = ctx
        .api
        .rate_entry(&target, Some(&rating), date.as_deref(), false, &opts)?;
    print_result(&result);
    Ok(())
}

/// Phrase the rating prompt with the matched titles and their current
/// ratings, showing up to three examples when the const is duplicated.
fn rating_prompt_label(matches: &[(String, String)]) -> String {
    let describe = |(title, rating): &(String, String)| {
        let current = if rating.is_empty() {
            "no rating".to_string()
        } else {
            rating.clone()
        };
        format!("\"{}\" ({})", title, current)
    };

    if matches.len() == 1 {
        format!(
            "New rating for {} (e.g. 7.5, blank to clear)",
            describe(&matches[0])
        )
    } else {
        let examples: Vec<String> = matches.iter().take(3).map(describe).collect();
        format!(
            "{} matches: {} — new rating (e.g. 7.5, blank to clear)",
            matches.len(),
            examples.join("; ")
        )
    }
}

fn handle_backup(ctx: &AppContext, cmd: BackupCommands) -> Result<()> {
    match cmd {
        BackupCommands::List => {
            let entries = ctx.backups.list()?;
            if entries.is_empty() {
                println!("No backups found.");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{:3}. {} — {} — {}",
                    entry.index,
                    entry.name,
                    entry.modified.format("%Y-%m-%d %H:%M:%S"),
                    human_size(entry.size)
                );
            }
            Ok(())
        }
        BackupCommands::Show { which } => {
            let path = ctx.backups.resolve(&which)?;
            println!("{}", format!("--- {} ---", path.display()).dimmed());
            let reader = BufReader::new(File::open(&path)?);
            for line in reader.lines() {
                println!("{}", line?);
            }
            Ok(())
        }
        BackupCommands::Diff { a, b } => {
            let path_a = ctx.backups.resolve(&a)?;
            let path_b = match b {
                Some(token) => ctx.backups.resolve(&token)?,
                None => {
                    let live = ctx.backups.catalog_path();
                    if !live.exists() {
                        return Err(CatalogError::CatalogMissing(live.to_path_buf()));
                    }
                    live.to_path_buf()
                }
            };
            print_diff(&ctx.backups.diff(&path_a, &path_b)?);
            Ok(())
        }
        BackupCommands::Restore {
            which,
            yes,
            backup,
        } => handle_restore(ctx, &which, yes, backup),
        BackupCommands::Delete { which, yes } => {
            let path = ctx.backups.resolve(&which)?;
            let name = display_name(&path);
            if !yes && !confirm(&format!("Delete backup {}?", name))? {
                println!("Operation cancelled.");
                return Ok(());
            }
            ctx.backups.delete(&path)?;
            println!("{}", format!("Backup deleted: {}", name).green());
            Ok(())
        }
    }
}

fn handle_restore(ctx: &AppContext, which: &str, yes: bool, pre_snapshot: bool) -> Result<()> {
    let src = ctx.backups.resolve(which)?;
    let name = display_name(&src);

    if pre_snapshot {
        match ctx.backups.create(BackupTag::PreRestore)? {
            Some(path) => println!(
                "{}",
                format!("Pre-restore copy created: {}", path.display()).dimmed()
            ),
            None => println!("{}", "No live catalog to snapshot.".dimmed()),
        }
    }

    let live = ctx.backups.catalog_path();
    if !yes && !confirm(&format!("Restore {} over {}?", name, live.display()))? {
        println!("Operation cancelled.");
        return Ok(());
    }

    ctx.backups.restore(&src)?;
    println!(
        "{}",
        format!("Restored {} → {}", name, live.display()).green()
    );
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_result(result: &CmdResult) {
    print_messages(&result.messages);
    for line in &result.preview {
        println!("{}", line);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn print_diff(text: &str) {
    for line in text.lines() {
        if line.starts_with("@@") {
            println!("{}", line.cyan());
            println!();
        } else if line.starts_with("+++ ") || line.starts_with("--- ") {
            println!("{}", line.dimmed());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} (y/N): ", question);
    io::stdout().flush()?;
    match read_input()? {
        Some(answer) => Ok(answer.eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    Ok(read_input()?.unwrap_or_default())
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value = prompt_or_eof(label)?;
        match value {
            Some(v) if !v.is_empty() => return Ok(v),
            Some(_) => println!("A value is required."),
            None => return Err(CatalogError::Input(format!("{} is required", label))),
        }
    }
}

/// Re-ask until the validator accepts the input. End of input counts as a
/// blank answer, which only passes when blank itself is valid.
fn prompt_validated<F>(label: &str, valid: F) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    loop {
        match prompt_or_eof(label)? {
            Some(v) if valid(&v) => return Ok(v),
            Some(_) => println!("Invalid value, try again."),
            None => {
                if valid("") {
                    return Ok(String::new());
                }
                return Err(CatalogError::Input(format!("{} is required", label)));
            }
        }
    }
}

fn prompt_or_eof(label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;
    read_input()
}

fn read_input() -> Result<Option<String>> {
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
