use std::path::Path;

use colored::Colorize;
use tracing::debug;
use tribble_backlog::{Backlog, BacklogEntry, Config};
use tribble_frame::Frames;
use tribble_store::{DiskMedium, FramedFileStore, StoreConfig, SyncMode};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let sync = if cli.sync { SyncMode::EveryWrite } else { SyncMode::OsDefault };
    match cli.command {
        Command::Init => cmd_init(&cli.root, sync),
        Command::Add(args) => cmd_add(open_backlog(&cli.root, sync)?, args),
        Command::List(args) => cmd_list(open_backlog(&cli.root, sync)?, args),
        Command::Config => cmd_config(&cli.root, sync),
        Command::Check => cmd_check(open_backlog(&cli.root, sync)?),
    }
}

fn open_backlog(root: &Path, sync: SyncMode) -> anyhow::Result<Backlog> {
    debug!(root = %root.display(), ?sync, "opening backlog");
    let config = Config::load_or_init(&DiskMedium::new(sync), root)?;
    let store = FramedFileStore::new(StoreConfig {
        root: root.to_path_buf(),
        sync,
        create_parents: true,
    });
    Ok(Backlog::open(config, store))
}

fn cmd_init(root: &Path, sync: SyncMode) -> anyhow::Result<()> {
    let config = Config::load_or_init(&DiskMedium::new(sync), root)?;
    println!(
        "{} Initialized tribble in {}",
        "✓".green().bold(),
        root.display().to_string().bold()
    );
    println!("  Config:  {}", Config::config_path(root).display());
    println!("  Backlog: {}", config.backlog_path.display().to_string().cyan());
    Ok(())
}

fn cmd_add(backlog: Backlog, args: AddArgs) -> anyhow::Result<()> {
    let entry = BacklogEntry::new(args.title)
        .with_description(args.description)
        .with_status(args.status);
    backlog.write(&entry, args.mode)?;
    println!(
        "{} Added {} ({})",
        "✓".green().bold(),
        entry.title.bold(),
        args.mode.to_string().dimmed()
    );
    println!("  Id: {}", entry.id.to_string().yellow());
    Ok(())
}

fn cmd_list(backlog: Backlog, args: ListArgs) -> anyhow::Result<()> {
    let entries = if args.all { backlog.entries()? } else { backlog.latest()? };
    if entries.is_empty() {
        println!("Backlog is empty.");
        return Ok(());
    }
    for entry in &entries {
        let id = entry.id.simple().to_string();
        let short_id = &id[id.len() - 8..];
        println!(
            "{} [{}] {}  {}",
            short_id.yellow(),
            entry.status.to_string().cyan(),
            entry.title.bold(),
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        );
        if !entry.description.is_empty() {
            println!("    {}", entry.description);
        }
    }
    Ok(())
}

fn cmd_config(root: &Path, sync: SyncMode) -> anyhow::Result<()> {
    let config = Config::load_or_init(&DiskMedium::new(sync), root)?;
    println!("backlog_path = {}", config.backlog_path.display());
    println!("entry_format = {:?}", config.entry_format);
    Ok(())
}

fn cmd_check(backlog: Backlog) -> anyhow::Result<()> {
    let path = backlog.path();
    if !path.exists() {
        println!("{} No backlog at {}", "✓".green(), path.display());
        return Ok(());
    }

    let raw = backlog.store().read_raw(&backlog.config().backlog_path)?;
    let mut frames = Frames::new(&raw);
    let mut count = 0usize;
    while let Some(frame) = frames.next() {
        match frame {
            Ok(payload) => {
                backlog.config().entry_format.decode(payload)?;
                count += 1;
            }
            Err(e) => {
                println!(
                    "{} Corrupt frame at byte {}: {}",
                    "✗".red().bold(),
                    frames.offset(),
                    e
                );
                anyhow::bail!(
                    "backlog {} is corrupt after {} valid entries",
                    path.display(),
                    count
                );
            }
        }
    }

    println!("{} {} entries, {} bytes, all frames intact", "✓".green().bold(), count, raw.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tribble_store::StorageMedium;

    fn run(root: &Path, args: &[&str]) -> anyhow::Result<()> {
        let root = root.to_str().unwrap();
        let mut argv = vec!["tribble", "--root", root];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn init_add_list_check() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["init"]).unwrap();
        assert!(Config::config_path(dir.path()).exists());

        run(dir.path(), &["add", "first", "-d", "desc"]).unwrap();
        run(dir.path(), &["add", "second", "-s", "done"]).unwrap();
        run(dir.path(), &["list", "--all"]).unwrap();
        run(dir.path(), &["check"]).unwrap();
        run(dir.path(), &["config"]).unwrap();

        let backlog = open_backlog(dir.path(), SyncMode::OsDefault).unwrap();
        let titles: Vec<_> = backlog.entries().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn config_on_fresh_root_bootstraps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["config"]).unwrap();

        let config = Config::load(&DiskMedium::default(), dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn init_honors_sync_flag() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["--sync", "init"]).unwrap();
        assert!(Config::config_path(dir.path()).exists());
    }

    #[test]
    fn add_with_overwrite_mode_resets() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["add", "old"]).unwrap();
        run(dir.path(), &["add", "new", "--mode", "overwrite"]).unwrap();

        let backlog = open_backlog(dir.path(), SyncMode::OsDefault).unwrap();
        let entries = backlog.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "new");
    }

    #[test]
    fn check_fails_on_corrupt_backlog() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["add", "ok"]).unwrap();
        let backlog = open_backlog(dir.path(), SyncMode::OsDefault).unwrap();
        DiskMedium::default().append(&backlog.path(), &[7, 0, 0, 0, 1]).unwrap();

        assert!(run(dir.path(), &["check"]).is_err());
    }
}
