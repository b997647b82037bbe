//! Command handling: the plain-text front end over the bridge list.
//!
//! Every mutating command edits a copy of the rows through the manager, then
//! validates and commits them in one go.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use pulse2jack_core::{Bridge, BridgeList, Direction, SettingsStore, codec, is_valid};
use tracing::{debug, info};

/// Bridge list subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the saved bridges.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a bridge. Without options the missing sink or source default is added.
    Add {
        #[command(flatten)]
        fields: BridgeFields,
    },

    /// Change fields of an existing bridge.
    Edit {
        /// Row index as shown by `list`.
        index: usize,
        #[command(flatten)]
        fields: BridgeFields,
    },

    /// Remove a bridge.
    Remove {
        /// Row index as shown by `list`.
        index: usize,
    },

    /// Replace all bridges with the default source and sink.
    Defaults,

    /// Regenerate the connection file from the saved bridges.
    Write,

    /// Report where the connection file lives and whether it is up to date.
    Check,
}

/// Optional field overrides for `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct BridgeFields {
    /// Bridge name (must not contain `|` or line breaks).
    #[arg(long)]
    pub name: Option<String>,
    /// `source` or `sink`.
    #[arg(long)]
    pub direction: Option<Direction>,
    /// Number of channels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub channels: Option<u32>,
    /// Connect automatically (`true` or `false`).
    #[arg(long)]
    pub auto_connect: Option<bool>,
}

impl BridgeFields {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.direction.is_none()
            && self.channels.is_none()
            && self.auto_connect.is_none()
    }

    fn apply(self, bridge: &mut Bridge) {
        if let Some(name) = self.name {
            bridge.name = name;
        }
        if let Some(direction) = self.direction {
            bridge.direction = direction;
        }
        if let Some(channels) = self.channels {
            bridge.channels = channels;
        }
        if let Some(auto_connect) = self.auto_connect {
            bridge.auto_connect = auto_connect;
        }
    }
}

/// Run a command against `list`, printing results to `out`.
pub fn run<S: SettingsStore>(
    command: Command,
    list: &mut BridgeList<S>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List { json } => {
            if json {
                serde_json::to_writer_pretty(&mut *out, list.bridges())?;
                writeln!(out)?;
            } else {
                print_bridges(list.bridges(), out)?;
            }
            Ok(())
        }

        Command::Add { fields } => {
            let rows = list.bridges().to_vec();
            let mut bridge = list.add_row(&rows);
            if !fields.is_empty() {
                fields.apply(&mut bridge);
                list.edit_row(rows.len(), bridge)?;
            }
            commit(list, out)
        }

        Command::Edit { index, fields } => {
            let mut bridge = list
                .bridges()
                .get(index)
                .cloned()
                .with_context(|| format!("No bridge at row {index}"))?;
            fields.apply(&mut bridge);
            list.edit_row(index, bridge)?;
            commit(list, out)
        }

        Command::Remove { index } => {
            let rows = list.bridges().to_vec();
            let removed = list.remove_row(&rows, index)?;
            debug!(name = %removed.name, "Removing bridge");
            commit(list, out)
        }

        Command::Defaults => {
            list.reset_to_defaults();
            commit(list, out)
        }

        Command::Write => {
            let lines = codec::encode(list.bridges());
            list.connection_file().write(&lines)?;
            let path = list.connection_file().path();
            writeln!(out, "Wrote {} bridges to {}", lines.len(), path.display())?;
            Ok(())
        }

        Command::Check => check(list, out),
    }
}

/// Validate the working rows and save them, or restore the saved list.
fn commit<S: SettingsStore>(list: &mut BridgeList<S>, out: &mut impl Write) -> Result<()> {
    let rows = list.bridges().to_vec();

    if !is_valid(&rows) {
        list.revert()?;
        bail!(
            "Bridge list not saved: at least one bridge is required and names must be \
             non-empty, unique and must not contain '|' or line breaks"
        );
    }

    if !list.has_pending_changes(&rows)? {
        writeln!(out, "No changes")?;
        return Ok(());
    }

    list.save(&rows)?;
    print_bridges(list.bridges(), out)
}

fn check<S: SettingsStore>(list: &BridgeList<S>, out: &mut impl Write) -> Result<()> {
    let file = list.connection_file();
    let path = file.path();
    writeln!(out, "Connection file: {}", path.display())?;

    if !is_valid(list.bridges()) {
        writeln!(out, "Saved bridges: invalid")?;
    }

    if !path.exists() {
        writeln!(out, "Status: missing (run `write` to create it)")?;
        return Ok(());
    }

    let on_disk = codec::decode(&file.read()?)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    if list.has_pending_changes(&on_disk)? {
        info!(?path, "Connection file differs from saved bridges");
        writeln!(out, "Status: out of date (run `write` to regenerate it)")?;
    } else {
        writeln!(out, "Status: up to date ({} bridges)", on_disk.len())?;
    }
    Ok(())
}

fn print_bridges(bridges: &[Bridge], out: &mut impl Write) -> Result<()> {
    let width = bridges.iter().map(|b| b.name.len()).max().unwrap_or(0);
    for (index, bridge) in bridges.iter().enumerate() {
        writeln!(
            out,
            "{index:>2}  {name:<width$}  {direction:<6}  {channels}ch  {auto}",
            name = bridge.name,
            direction = bridge.direction.as_str(),
            channels = bridge.channels,
            auto = if bridge.auto_connect { "auto-connect" } else { "manual" },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse2jack_core::{ConnectionFile, MemoryStore, SETTINGS_KEY, default_bridges};
    use tempfile::TempDir;

    fn test_list() -> (TempDir, BridgeList<MemoryStore>) {
        let temp = TempDir::new().unwrap();
        let list = BridgeList::new(MemoryStore::new(), ConnectionFile::new(temp.path())).unwrap();
        (temp, list)
    }

    fn run_to_string(command: Command, list: &mut BridgeList<MemoryStore>) -> Result<String> {
        let mut out = Vec::new();
        run(command, list, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn saved(list: &BridgeList<MemoryStore>) -> Vec<String> {
        list.store().value(SETTINGS_KEY).unwrap().unwrap()
    }

    #[test]
    fn test_list_text() {
        let (_temp, mut list) = test_list();
        let output = run_to_string(Command::List { json: false }, &mut list).unwrap();

        assert!(output.contains(" 0  PulseAudio JACK Source"));
        assert!(output.contains(" 1  PulseAudio JACK Sink"));
        assert!(output.contains("auto-connect"));
    }

    #[test]
    fn test_list_json() {
        let (_temp, mut list) = test_list();
        let output = run_to_string(Command::List { json: true }, &mut list).unwrap();

        let parsed: Vec<Bridge> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, default_bridges());
    }

    #[test]
    fn test_add_named_bridge() {
        let (_temp, mut list) = test_list();
        let fields = BridgeFields {
            name: Some("Browser".into()),
            channels: Some(6),
            ..Default::default()
        };

        run_to_string(Command::Add { fields }, &mut list).unwrap();

        assert_eq!(saved(&list).last().unwrap(), "Browser|source|6|False");
        assert_eq!(
            list.connection_file().read().unwrap().last().unwrap(),
            "Browser|source|6|False"
        );
    }

    #[test]
    fn test_add_blank_bridge_is_rejected() {
        let (_temp, mut list) = test_list();

        let result = run_to_string(Command::Add { fields: BridgeFields::default() }, &mut list);
        assert!(result.is_err());
        assert_eq!(list.bridges(), default_bridges().as_slice());
        assert_eq!(saved(&list).len(), 2);
    }

    #[test]
    fn test_edit_bridge() {
        let (_temp, mut list) = test_list();
        let fields = BridgeFields { auto_connect: Some(false), ..Default::default() };

        run_to_string(Command::Edit { index: 1, fields }, &mut list).unwrap();
        assert_eq!(saved(&list)[1], "PulseAudio JACK Sink|sink|2|False");
    }

    #[test]
    fn test_edit_duplicate_name_is_rejected() {
        let (_temp, mut list) = test_list();
        let fields =
            BridgeFields { name: Some("PulseAudio JACK Source".into()), ..Default::default() };

        assert!(run_to_string(Command::Edit { index: 1, fields }, &mut list).is_err());
        assert_eq!(list.bridges(), default_bridges().as_slice());
    }

    #[test]
    fn test_edit_line_break_name_is_rejected() {
        let (_temp, mut list) = test_list();
        let fields = BridgeFields { name: Some("a\nb".into()), ..Default::default() };

        assert!(run_to_string(Command::Edit { index: 0, fields }, &mut list).is_err());
        assert_eq!(list.bridges(), default_bridges().as_slice());
        assert_eq!(saved(&list)[0], "PulseAudio JACK Source|source|2|True");
    }

    #[test]
    fn test_edit_unchanged_reports_no_changes() {
        let (_temp, mut list) = test_list();
        let output =
            run_to_string(Command::Edit { index: 0, fields: BridgeFields::default() }, &mut list)
                .unwrap();
        assert_eq!(output, "No changes\n");
    }

    #[test]
    fn test_remove_last_bridge_is_rejected() {
        let (_temp, mut list) = test_list();

        run_to_string(Command::Remove { index: 0 }, &mut list).unwrap();
        assert_eq!(saved(&list), vec!["PulseAudio JACK Sink|sink|2|True".to_string()]);

        assert!(run_to_string(Command::Remove { index: 0 }, &mut list).is_err());
        assert_eq!(saved(&list).len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let (_temp, mut list) = test_list();
        assert!(run_to_string(Command::Remove { index: 9 }, &mut list).is_err());
    }

    #[test]
    fn test_defaults_restores_seed() {
        let (_temp, mut list) = test_list();
        run_to_string(Command::Remove { index: 1 }, &mut list).unwrap();

        run_to_string(Command::Defaults, &mut list).unwrap();
        assert_eq!(saved(&list).len(), 2);
    }

    #[test]
    fn test_write_and_check() {
        let (_temp, mut list) = test_list();

        let output = run_to_string(Command::Check, &mut list).unwrap();
        assert!(output.contains("Status: missing"));

        run_to_string(Command::Write, &mut list).unwrap();
        let output = run_to_string(Command::Check, &mut list).unwrap();
        assert!(output.contains("Status: up to date (2 bridges)"));

        list.connection_file().write(&["Other|sink|2|True".to_string()]).unwrap();
        let output = run_to_string(Command::Check, &mut list).unwrap();
        assert!(output.contains("Status: out of date"));
    }
}
