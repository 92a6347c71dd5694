use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chal_model::Challenge;
use chal_store::{open_store, EntityStore, StoreConfig};
use chal_types::{Entity, EntityId};
use colored::Colorize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.store)?;
    debug!(dir = %config.dir.display(), "resolved store configuration");
    match cli.command {
        Command::Init(args) => cmd_init(config, args),
        Command::Create(args) => cmd_create(&config, args, &cli.format).map(|_| ()),
        Command::Show(args) => cmd_show(&config, args, &cli.format),
        Command::Rename(args) => cmd_rename(&config, args),
        Command::Update(args) => cmd_update(&config, args),
        Command::Delete(args) => cmd_delete(&config, args),
    }
}

/// Config file first, then `--store` on top; defaults otherwise.
fn resolve_config(config_path: Option<&Path>, store: Option<PathBuf>) -> anyhow::Result<StoreConfig> {
    let mut config = match config_path {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(dir) = store {
        config.dir = dir;
    }
    Ok(config)
}

fn read_challenge(path: &Path) -> anyhow::Result<Challenge> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading challenge from {}", path.display()))?;
    let challenge: Challenge = serde_json::from_str(&text)
        .with_context(|| format!("parsing challenge in {}", path.display()))?;
    challenge.validate()?;
    Ok(challenge)
}

fn cmd_init(mut config: StoreConfig, args: InitArgs) -> anyhow::Result<()> {
    if let Some(path) = args.path {
        config.dir = path;
    }
    config.create_dir = true;
    let store = open_store(&config)?;
    println!("{} Initialized challenge store in {}", "✓".green().bold(), store.dir().display().to_string().bold());
    Ok(())
}

fn cmd_create(config: &StoreConfig, args: CreateArgs, format: &OutputFormat) -> anyhow::Result<EntityId> {
    let store = open_store(config)?;
    let mut challenge = read_challenge(&args.file)?;
    if let Some(id) = challenge.id() {
        anyhow::bail!("{} already carries id {id}; use `update` instead", args.file.display());
    }
    let id = store.create(&mut challenge)?;
    match format {
        OutputFormat::Text => println!("{} Created challenge {} ({})", "✓".green().bold(), id.to_string().yellow(), challenge.name()),
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
    }
    Ok(id)
}

fn cmd_show(config: &StoreConfig, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let challenge: Challenge = store.load(args.id)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&challenge)?),
        OutputFormat::Text => {
            println!("Challenge {}  {}", args.id.to_string().yellow().bold(), challenge.name().bold());
            println!("  {}", challenge.description());
            println!("  Signature: {}->{}", challenge.class_name(), challenge.method().to_string().cyan());
            for constraint in challenge.method().constraints() {
                println!("  Constraint: {constraint}");
            }
            for test_case in challenge.test_cases() {
                let label = if test_case.is_example() { "example".green() } else { "hidden".dimmed() };
                println!("  [{label}] {test_case}");
            }
        }
    }
    Ok(())
}

fn cmd_rename(config: &StoreConfig, args: RenameArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut challenge: Challenge = store.load(args.id)?;
    let old = challenge.name().to_string();
    challenge.update_name(args.name)?;
    store.update(&challenge)?;
    println!("{} Renamed {} → {}", "✓".green().bold(), old.dimmed(), challenge.name().yellow());
    Ok(())
}

fn cmd_update(config: &StoreConfig, args: UpdateArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut challenge = read_challenge(&args.file)?;
    if let Some(id) = challenge.id() {
        if id != args.id {
            anyhow::bail!("{} carries id {id}, not {}", args.file.display(), args.id);
        }
    }
    challenge.set_id(args.id);
    store.update(&challenge)?;
    println!("{} Updated challenge {}", "✓".green().bold(), args.id.to_string().yellow());
    Ok(())
}

fn cmd_delete(config: &StoreConfig, args: DeleteArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;
    EntityStore::<Challenge>::delete(&store, args.id)?;
    println!("{} Deleted challenge {}", "✓".green().bold(), args.id.to_string().yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chal_store::StoreError;

    const BOGGLE: &str = r#"{
        "name": "Boggle",
        "description": "The Boggle test",
        "class_name": "BoggleTest",
        "method": {
            "name": "test-m",
            "return_type": "int",
            "parameters": [
                { "name": "test-1", "type": "string[]", "constraints": ["test-1 has 1 to 50 strings"] }
            ],
            "constraints": ["max memory is 100"]
        },
        "test_cases": [
            { "is_example": true, "inputs": [["ABCDEFGH"]], "expected_output": 1 }
        ]
    }"#;

    fn setup() -> (tempfile::TempDir, StoreConfig, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path().join("store"));
        cmd_init(config.clone(), InitArgs { path: None }).unwrap();
        let file = dir.path().join("boggle.json");
        fs::write(&file, BOGGLE).unwrap();
        (dir, config, file)
    }

    #[test]
    fn store_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chal.toml");
        fs::write(&path, "dir = \"/from/file\"\nextension = \"json\"\n").unwrap();

        let config = resolve_config(Some(&path), Some("/from/flag".into())).unwrap();
        assert_eq!(config.dir, PathBuf::from("/from/flag"));
        assert_eq!(config.extension, "json");
    }

    #[test]
    fn create_show_rename_delete() {
        let (_dir, config, file) = setup();

        let id = cmd_create(&config, CreateArgs { file }, &OutputFormat::Text).unwrap();
        assert_eq!(id, EntityId::new(1));
        cmd_show(&config, ShowArgs { id }, &OutputFormat::Json).unwrap();

        cmd_rename(&config, RenameArgs { id, name: "Boggler".into() }).unwrap();
        let store = open_store(&config).unwrap();
        let loaded: Challenge = store.load(id).unwrap();
        assert_eq!(loaded.name(), "Boggler");

        cmd_delete(&config, DeleteArgs { id }).unwrap();
        let err = EntityStore::<Challenge>::load(&store, id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_replaces_record() {
        let (dir, config, file) = setup();
        let id = cmd_create(&config, CreateArgs { file }, &OutputFormat::Json).unwrap();

        let edited = dir.path().join("edited.json");
        fs::write(&edited, BOGGLE.replace("The Boggle test", "Find every word")).unwrap();
        cmd_update(&config, UpdateArgs { id, file: edited }).unwrap();

        let store = open_store(&config).unwrap();
        let loaded: Challenge = store.load(id).unwrap();
        assert_eq!(loaded.description(), "Find every word");
        assert_eq!(loaded.id(), Some(id));
    }

    #[test]
    fn update_of_unknown_id_fails() {
        let (_dir, config, file) = setup();
        let err = cmd_update(&config, UpdateArgs { id: EntityId::new(7), file }).unwrap_err();
        let store_err = err.downcast_ref::<StoreError>().unwrap();
        assert!(store_err.is_not_found());
    }

    #[test]
    fn invalid_challenge_file_rejected() {
        let (dir, config, _file) = setup();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, BOGGLE.replace("\"Boggle\"", "\"\"")).unwrap();
        assert!(cmd_create(&config, CreateArgs { file: bad }, &OutputFormat::Text).is_err());
        assert!(!config.dir.join("1.rec").exists());
    }

    #[test]
    fn commands_need_an_existing_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path().join("missing"));
        let err = cmd_show(&config, ShowArgs { id: EntityId::new(1) }, &OutputFormat::Text).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }
}
