use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use docstore_core::{Backend, DocumentsStore, DocumentsStoreExt, StoreConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let format = cli.format;

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut store = config
        .build_store()
        .context("invalid documents store configuration")?;
    store.open()?;
    let result = run_store_command(store.as_mut(), cli.command, format);
    store.close();
    result
}

/// Start from the configuration file (or defaults) and apply flag overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(location) = &cli.location {
        config.location = location.clone();
    }
    if let Some(store) = &cli.store {
        config.name = store.clone();
    }
    if let Some(archive) = &cli.archive {
        config.archive = Some(archive.clone());
    }
    if cli.memory {
        config.backend = Backend::Memory;
    }
    Ok(config)
}

fn run_store_command(
    store: &mut dyn DocumentsStore,
    command: Command,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Command::List => cmd_list(store, format),
        Command::Count => {
            match format {
                OutputFormat::Text => println!("{}", store.count()),
                OutputFormat::Json => println!("{}", json!({ "count": store.count() })),
            }
            Ok(())
        }
        Command::Get(args) => cmd_get(store, args, format),
        Command::Put(args) => {
            let outcome = match (&args.file, &args.text) {
                (Some(path), _) => store.import_document(path, &args.name)?,
                (None, Some(text)) => store.save_string(&args.name, text)?,
                (None, None) => anyhow::bail!("a file or text is required"),
            };
            report(outcome.message(), format);
            Ok(())
        }
        Command::Rename(args) => {
            let outcome = store.rename(&args.from, &args.to)?;
            report(outcome.message(), format);
            Ok(())
        }
        Command::Delete(args) => {
            let outcome = store.delete(&args.name)?;
            report(outcome.message(), format);
            Ok(())
        }
        Command::Config => Ok(()),
    }
}

fn cmd_list(store: &dyn DocumentsStore, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let mut empty = true;
            for document in store.documents() {
                empty = false;
                println!(
                    "{}  {}",
                    document.name().bold(),
                    format!("{} bytes", document.len()).dimmed()
                );
            }
            if empty {
                println!("No documents in {}.", store.name().yellow());
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = store
                .documents()
                .map(|d| json!({ "name": d.name(), "size": d.len() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn cmd_get(store: &dyn DocumentsStore, args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(path) = &args.output {
        let outcome = store.export_document(&args.name, path)?;
        report(outcome.message(), format);
        return Ok(());
    }

    let document = store.load(&args.name)?.into_data();
    let text = String::from_utf8_lossy(document.content());
    match format {
        OutputFormat::Text => print!("{text}"),
        OutputFormat::Json => println!(
            "{}",
            json!({ "name": document.name(), "size": document.len(), "content": text })
        ),
    }
    Ok(())
}

fn report(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{} {}", "✓".green().bold(), message),
        OutputFormat::Json => println!("{}", json!({ "success": true, "message": message })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("docstore").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_without_config_file() {
        let config = resolve_config(&parse(&["list"])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docstore.toml");
        std::fs::write(&path, "name = \"from-file\"\nlocation = \"/srv\"\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let config = resolve_config(&parse(&[
            "--config",
            &path,
            "--store",
            "cli",
            "--archive",
            "attic",
            "--memory",
            "list",
        ]))
        .unwrap();
        assert_eq!(config.name, "cli");
        assert_eq!(config.location, std::path::PathBuf::from("/srv"));
        assert_eq!(config.archive.as_deref(), Some("attic"));
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().into_owned();
        assert!(resolve_config(&parse(&["--config", &path, "list"])).is_err());
    }

    #[test]
    fn put_get_delete_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().to_string_lossy().into_owned();
        let base = ["--location", location.as_str(), "--store", "cli"];
        let run = |extra: &[&str]| {
            let args: Vec<&str> = base.iter().copied().chain(extra.iter().copied()).collect();
            run_command(parse(&args))
        };

        run(&["put", "note", "--text", "hello"]).unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("cli").join("note")).unwrap(),
            b"hello"
        );

        let exported = dir.path().join("exported.txt");
        let exported_arg = exported.to_string_lossy().into_owned();
        run(&["get", "note", "-o", &exported_arg]).unwrap();
        assert_eq!(std::fs::read(&exported).unwrap(), b"hello");

        run(&["rename", "note", "memo"]).unwrap();
        assert!(dir.path().join("cli").join("memo").is_file());

        run(&["delete", "memo"]).unwrap();
        assert!(!dir.path().join("cli").join("memo").exists());
        assert!(run(&["delete", "memo"]).is_err());
    }

    #[test]
    fn delete_with_archive_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().to_string_lossy().into_owned();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, [1u8, 2, 3]).unwrap();
        let source_arg = source.to_string_lossy().into_owned();

        let common = ["--location", location.as_str(), "--archive", "attic"];
        let put: Vec<&str> = common
            .iter()
            .copied()
            .chain(["put", "blob", "--file", source_arg.as_str()])
            .collect();
        run_command(parse(&put)).unwrap();

        let delete: Vec<&str> = common.iter().copied().chain(["delete", "blob"]).collect();
        run_command(parse(&delete)).unwrap();

        assert!(!dir.path().join("documents").join("blob").exists());
        assert_eq!(
            std::fs::read(dir.path().join("attic").join("blob")).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn invalid_store_name_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().to_string_lossy().into_owned();
        let err = run_command(parse(&[
            "--location",
            &location,
            "--store",
            "bad*",
            "list",
        ]))
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid character"));
    }
}
