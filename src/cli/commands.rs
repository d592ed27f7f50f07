//! Command dispatch: one function per subcommand

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{render_html, to_csv};
use crate::application::Session;
use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs, InputArgs, LevelArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{resolve, LevelRange, RootSelector, TableFilter};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::SelectionItem;
use crate::infrastructure::InfraError;

/// Shown instead of any output when no usable input was given.
pub const UPLOAD_PROMPT: &str = "Upload JSON files";

/// Target meaning "write to stdout".
const STDOUT_TARGET: &str = "-";

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let project_dir = project_dir(cli);
    match &cli.command {
        Some(Commands::Table { input, filter }) => cmd_table(container, input, filter),
        Some(Commands::Export {
            input,
            filter,
            output,
        }) => cmd_export(container, input, filter, output.as_deref()),
        Some(Commands::Subtree { root, input }) => cmd_subtree(container, input, root),
        Some(Commands::Fathers { input, levels }) => cmd_fathers(container, input, levels),
        Some(Commands::Levels { input }) => cmd_levels(container, input),
        Some(Commands::Tree { input }) => cmd_tree(container, input),
        Some(Commands::Graph { input, output }) => cmd_graph(container, input, output.as_deref()),
        Some(Commands::Config { command }) => cmd_config(container, command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "objtree", &mut io::stdout());
            Ok(())
        }
        None => {
            output::info(UPLOAD_PROMPT);
            Ok(())
        }
    }
}

/// Project directory from `-C`, else the current directory.
pub fn project_dir(cli: &Cli) -> PathBuf {
    cli.project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load all inputs into a session; `None` when there is nothing to show.
fn load_session(container: &ServiceContainer, input: &InputArgs) -> CliResult<Option<Session>> {
    if input.files.is_empty() {
        output::info(UPLOAD_PROMPT);
        return Ok(None);
    }

    let report = container.ingest.load(&input.files)?;
    for skipped in &report.skipped {
        output::warning(&format!(
            "invalid file: {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }
    if report.records.is_empty() {
        output::info(UPLOAD_PROMPT);
        return Ok(None);
    }

    debug!(
        "loaded {} records from {} files",
        report.records.len(),
        report.loaded.len()
    );
    Ok(Some(Session::new(report.records)))
}

fn level_range(session: &Session, levels: &LevelArgs) -> CliResult<LevelRange> {
    Ok(session.level_range(levels.min_level, levels.max_level)?)
}

/// Build the table filter from flags, asking the selector when `--pick` is set.
fn table_filter(
    container: &ServiceContainer,
    session: &Session,
    args: &FilterArgs,
) -> CliResult<TableFilter> {
    let levels = level_range(session, &args.levels)?;
    let root = if args.pick {
        pick_root(container, session, levels)?
    } else {
        args.root
            .as_deref()
            .map(RootSelector::from)
            .unwrap_or_default()
    };
    session.check_root(&root)?;
    Ok(TableFilter::new(levels, root))
}

fn pick_root(
    container: &ServiceContainer,
    session: &Session,
    levels: LevelRange,
) -> CliResult<RootSelector> {
    let items: Vec<SelectionItem> = session
        .father_options(levels)
        .into_iter()
        .map(|o| SelectionItem {
            display: o.clone(),
            value: o,
        })
        .collect();

    let selected = container
        .selector
        .select_one(&items, "Select Father> ")
        .map_err(|message| InfraError::Selection { message })?;

    // cancelling the picker keeps everything
    Ok(selected
        .map(|item| RootSelector::from(item.value.as_str()))
        .unwrap_or_default())
}

#[instrument(skip(container))]
fn cmd_table(container: &ServiceContainer, input: &InputArgs, filter: &FilterArgs) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let filter = table_filter(container, &session, filter)?;
    let filtered = session.apply(&filter);

    output::table(&filtered);
    println!();
    output::detail(&format!(
        "{} of {} rows (levels {}..={}, root {})",
        filtered.len(),
        session.table().len(),
        filter.levels.min(),
        filter.levels.max(),
        filter.root
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_export(
    container: &ServiceContainer,
    input: &InputArgs,
    filter: &FilterArgs,
    target: Option<&Path>,
) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let filter = table_filter(container, &session, filter)?;
    let filtered = session.apply(&filter);

    match target {
        Some(path) if path == Path::new(STDOUT_TARGET) => {
            write_stdout(&to_csv(&filtered))?;
        }
        _ => {
            let path = target
                .map(Path::to_path_buf)
                .unwrap_or_else(|| container.settings.export_path());
            container.export.export(&filtered, &path)?;
            output::action(
                "Exported",
                &format!("{} rows to {}", filtered.len(), path.display()),
            );
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_subtree(container: &ServiceContainer, input: &InputArgs, root: &str) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let selector = RootSelector::from(root);
    if selector == RootSelector::All {
        return Err(CliError::InvalidArgs(
            "subtree needs a node name, not \"All\"".to_string(),
        ));
    }
    session.check_root(&selector)?;

    let mut names: Vec<String> = resolve(session.table(), root).into_iter().collect();
    names.sort();
    for name in names {
        output::info(&name);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_fathers(container: &ServiceContainer, input: &InputArgs, levels: &LevelArgs) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let levels = level_range(&session, levels)?;
    for option in session.father_options(levels) {
        output::info(&option);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_levels(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    if let Some((min, max)) = session.level_bounds() {
        output::action("min", &min);
        output::action("max", &max);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, input: &InputArgs) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let trees = session.forest()?;
    output::header(&format!("Found {} trees:", trees.len()));
    for tree in &trees {
        output::info(&tree.to_tree_string());
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_graph(container: &ServiceContainer, input: &InputArgs, target: Option<&Path>) -> CliResult<()> {
    let Some(session) = load_session(container, input)? else {
        return Ok(());
    };
    let graph_settings = &container.settings.graph;
    let graph = session.graph(&graph_settings.root_label, &graph_settings.probe_key);
    let options = graph_settings.options();

    match target {
        Some(path) if path == Path::new(STDOUT_TARGET) => {
            write_stdout(&render_html(&graph, &options)?)?;
        }
        _ => {
            let path = target
                .map(Path::to_path_buf)
                .unwrap_or_else(|| container.settings.graph_path());
            container.graph.write(&graph, &options, &path)?;
            output::action(
                "Rendered",
                &format!(
                    "{} nodes, {} edges to {}",
                    graph.nodes.len(),
                    graph.edges.len(),
                    path.display()
                ),
            );
        }
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &describe_config(container, &path)),
                None => output::action("global", "unavailable"),
            }
            output::action(
                "local",
                &describe_config(container, &local_config_path(project_dir)),
            );
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write config {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

fn describe_config(container: &ServiceContainer, path: &Path) -> String {
    let state = if container.fs.exists(path) {
        "exists"
    } else {
        "missing"
    };
    format!("{} ({})", path.display(), state)
}

fn write_stdout(content: &str) -> CliResult<()> {
    io::stdout()
        .write_all(content.as_bytes())
        .map_err(|e| InfraError::io("write stdout", e).into())
}
