use clap::Subcommand;
use focusplan_core::Config;

/// Keys are dotted paths into `config.toml`:
/// `session.focus_minutes`, `session.break_enabled`,
/// `policy.base_focus_unit`, `policy.base_break_unit`.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `session.focus_minutes`
    Get { key: String },
    /// Change one value and save
    Set {
        key: String,
        /// Minutes for the `*_minutes` and `*_unit` keys, true/false for
        /// `session.break_enabled`
        value: String,
    },
    /// Print the whole file as TOML
    List,
    /// Print the location of config.toml
    Path,
    /// Overwrite config.toml with the defaults (25 min, no breaks, 25/5 chunks)
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            let stored = config.get(&key).unwrap_or(value);
            println!("{key} = {stored}");
            if key.starts_with("session.") {
                eprintln!("note: a running timer picks this up at its next start");
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("reset {}", Config::path()?.display());
        }
    }
    Ok(())
}
