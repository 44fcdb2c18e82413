//! Subcommand execution
//!
//! Every run loads the snapshot, applies one command through the
//! view-model and, for mutating commands, writes the snapshot back.

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use paymatrix_model::{Grade, LevelId, MatrixId, RawPair};
use paymatrix_seed::{MatrixData, MatrixSeeder, SeedFile};
use paymatrix_store::{DocumentStore, InMemoryStore, StoreOptions, StoreSnapshot};
use paymatrix_view::{LevelDialog, Notice, PayMatrixView, ViewConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Split `SCALE=AMOUNT`; a missing `=` leaves the amount blank
#[must_use]
pub fn parse_pair(text: &str) -> RawPair {
    match text.split_once('=') {
        Some((scale, amount)) => RawPair::new(scale, amount),
        None => RawPair::new(text, ""),
    }
}

/// Run the selected subcommand, writing user output to `out`
///
/// # Errors
/// Store, configuration or I/O failure, or a rejected operation
pub async fn execute(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let store_path = matches
        .get_one::<PathBuf>("store")
        .context("missing --store")?
        .clone();
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ViewConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewConfig::default(),
    };
    let options = StoreOptions {
        enforce_grade_links: !matches.get_flag("no-grade-links"),
    };
    let matrix_name = matches
        .get_one::<String>("matrix")
        .context("missing --matrix")?;
    let matrix = MatrixId::from_str(matrix_name).context("invalid --matrix")?;

    let store = Arc::new(open_store(&store_path, options)?);
    let mut view = PayMatrixView::new(Arc::clone(&store), Some(matrix)).with_config(config);

    let Some((name, args)) = matches.subcommand() else {
        bail!("no command given");
    };
    tracing::debug!(command = name, store = %store_path.display(), "running command");

    let mutated = match name {
        "show" => {
            view.refresh().await?;
            let rendered = match args.get_one::<String>("format").map(String::as_str) {
                Some("html") => view.html(),
                Some("json") => serde_json::to_string_pretty(view.snapshot())?,
                _ => view.text(),
            };
            writeln!(out, "{}", rendered.trim_end())?;
            false
        }
        "levels" => {
            view.refresh().await?;
            for row in view.snapshot().rows() {
                writeln!(out, "{}\t{}", row.level, row.grade)?;
            }
            false
        }
        "add" => {
            let mut dialog = view.open_create_dialog()?;
            fill_dialog(&mut dialog, args, true)?;
            report(view.submit(&mut dialog).await, out)?;
            true
        }
        "edit" => {
            let level = level_arg(args)?;
            let mut dialog = view.open_edit_dialog(&level).await?;
            fill_dialog(&mut dialog, args, false)?;
            report(view.submit(&mut dialog).await, out)?;
            true
        }
        "delete" => {
            let level = level_arg(args)?;
            let mut dialog = view.open_edit_dialog(&level).await?;
            let Some(request) = view.request_delete(&dialog) else {
                bail!("level {level} cannot be deleted");
            };
            if !args.get_flag("yes") {
                writeln!(out, "{} Re-run with --yes to confirm.", request.prompt())?;
                request.cancel();
                return Ok(());
            }
            report(view.confirm_delete(&mut dialog, request).await, out)?;
            true
        }
        "grades" => {
            let labels: Vec<&String> = args
                .get_many::<String>("add")
                .map(Iterator::collect)
                .unwrap_or_default();
            for label in &labels {
                let grade = Grade::new(label.as_str())?;
                store.insert_grade(grade.clone()).await?;
                tracing::info!(grade = %grade, "grade added");
            }
            for grade in view.grade_options().await? {
                writeln!(out, "{grade}")?;
            }
            !labels.is_empty()
        }
        "seed" => seed(&mut view, args, out).await?,
        "reset" => {
            if !args.get_flag("yes") {
                writeln!(out, "This deletes every Pay Matrix. Re-run with --yes to confirm.")?;
                return Ok(());
            }
            let removed = MatrixSeeder::new(&*store).delete_all().await?;
            writeln!(out, "Deleted {removed} pay matrices")?;
            true
        }
        other => bail!("unknown command {other}"),
    };

    if mutated {
        store
            .snapshot()
            .save(&store_path)
            .with_context(|| format!("saving {}", store_path.display()))?;
        tracing::info!(path = %store_path.display(), "store saved");
    }
    Ok(())
}

async fn seed(
    view: &mut PayMatrixView<InMemoryStore>,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<bool> {
    let path = args.get_one::<PathBuf>("file");
    let file = match path {
        Some(path) if path.exists() => Some(
            SeedFile::load(path).with_context(|| format!("loading seed file {}", path.display()))?,
        ),
        _ => None,
    };

    if args.get_flag("ensure") {
        let Some(file) = file else {
            bail!("--ensure needs an existing --file");
        };
        let store = Arc::clone(view.store());
        return match MatrixSeeder::new(&*store).ensure_matrices(&file).await? {
            Some(outcome) => {
                for report in &outcome.reports {
                    writeln!(out, "{}", report.message())?;
                }
                Ok(true)
            }
            None => {
                writeln!(out, "All seed matrices already exist")?;
                Ok(false)
            }
        };
    }

    // A missing file falls back to the built-in table
    let data = match (&file, path) {
        (Some(file), _) => file.standard_data(),
        (None, Some(path)) => MatrixData::load_or_standard(path),
        (None, None) => MatrixData::standard(),
    };
    report(view.seed_standard(&data).await, out)?;

    if let Some(file) = file.filter(|f| !f.matrices.is_empty()) {
        let store = Arc::clone(view.store());
        let seeder = MatrixSeeder::new(&*store);
        for named in file.matrices.values() {
            let report = seeder.seed_named(&named.name, &named.data).await?;
            writeln!(out, "{}", report.message())?;
        }
    }
    Ok(true)
}

fn open_store(path: &Path, options: StoreOptions) -> Result<InMemoryStore> {
    let snapshot = StoreSnapshot::load_or_default(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let store = InMemoryStore::from_snapshot(snapshot, options)
        .with_context(|| format!("restoring {}", path.display()))?;
    Ok(store)
}

fn level_arg(args: &ArgMatches) -> Result<LevelId> {
    let raw = args.get_one::<String>("level").context("missing level id")?;
    LevelId::from_str(raw).context("invalid level id")
}

fn fill_dialog(dialog: &mut LevelDialog, args: &ArgMatches, replace_blank: bool) -> Result<()> {
    if let Some(grade) = args.get_one::<String>("grade") {
        dialog.set_grade(grade.as_str())?;
    }
    let pairs: Vec<RawPair> = args
        .get_many::<String>("pair")
        .map(|values| values.map(|v| parse_pair(v)).collect())
        .unwrap_or_default();
    if pairs.is_empty() && !replace_blank {
        return Ok(());
    }
    let rows = dialog.rows_mut()?;
    while rows.remove_row(0).is_some() {}
    for pair in pairs {
        rows.push(pair.scale, pair.amount);
    }
    Ok(())
}

fn report(notice: Notice, out: &mut impl Write) -> Result<()> {
    if notice.is_success() {
        writeln!(out, "{}", notice.message)?;
        Ok(())
    } else {
        bail!("{notice}")
    }
}
