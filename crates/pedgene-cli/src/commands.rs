use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{info, info_span};

use pedgene_model::{IndexedFrame, MalformedPolicy, PEDIATRIC_CANCERS, Split};
use pedgene_taiga::{DatasetRef, DatasetSource, TaigaClient, TaigaConfig};
use pedgene_transform::{IndexMap, get_from_taiga, remap_index};

use crate::cli::{FetchArgs, RemapArgs};
use crate::io::{read_csv_file, write_csv};
use crate::summary::{FetchSummary, RemapSummary, apply_table_style};

pub fn run_cancers() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Cancer type"]);
    apply_table_style(&mut table);
    for (pos, label) in PEDIATRIC_CANCERS.iter().enumerate() {
        table.add_row(vec![(pos + 1).to_string(), (*label).to_string()]);
    }
    println!("{table}");
    Ok(())
}

/// Taiga settings: environment first, then command-line overrides.
pub fn taiga_config(args: &FetchArgs) -> TaigaConfig {
    let mut config = TaigaConfig::from_env();
    if let Some(url) = &args.taiga_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(path) = &args.token_file {
        config = config.with_token_path(path.clone());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout_secs(secs);
    }
    if args.matrix {
        config = config.with_matrix_index(true);
    }
    config
}

/// Dataset id from the positional argument and the override flags.
pub fn dataset_ref(args: &FetchArgs) -> Result<DatasetRef> {
    let mut dataset: DatasetRef = args
        .dataset
        .parse()
        .with_context(|| format!("parse dataset id '{}'", args.dataset))?;
    if let Some(version) = args.version {
        dataset.version = Some(version);
    }
    if let Some(file) = &args.file {
        dataset.file = Some(file.clone());
    }
    Ok(dataset)
}

pub fn run_fetch(args: &FetchArgs) -> Result<FetchSummary> {
    let client = TaigaClient::new(taiga_config(args)).context("create Taiga client")?;
    fetch_with(&client, args)
}

/// Fetch, reshape, and write a dataset using any source.
pub fn fetch_with<S: DatasetSource + ?Sized>(source: &S, args: &FetchArgs) -> Result<FetchSummary> {
    let dataset = dataset_ref(args)?;
    let split = Split::from_parts(args.split.as_deref(), args.col.as_deref())?;
    let policy = if args.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Fail
    };

    let span = info_span!("fetch", dataset = %dataset);
    let _guard = span.enter();

    let frame = get_from_taiga(source, &dataset, &split, policy)
        .with_context(|| format!("fetch {dataset}"))?
        .into_frame()?;
    let summary = FetchSummary {
        dataset: dataset.to_string(),
        split: split.to_string(),
        rows: frame.height(),
        columns: frame.data().width(),
        output: args.output.clone(),
    };
    write_csv(frame, args.output.as_deref())?;
    info!(rows = summary.rows, columns = summary.columns, "Wrote dataset");
    Ok(summary)
}

pub fn run_remap(args: &RemapArgs) -> Result<RemapSummary> {
    let table = read_csv_file(&args.table, args.index_col.as_deref())?;

    let map_frame = read_csv_file(&args.map, None)?;
    let names = map_frame.data().get_column_names_owned();
    let target_col = match &args.map_index_col {
        Some(name) => name.clone(),
        None => names
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| anyhow!("mapping table {} has no columns", args.map.display()))?,
    };
    let value_col = match &args.map_value_col {
        Some(name) => name.clone(),
        None => names
            .iter()
            .find(|name| name.as_str() != target_col)
            .map(|name| name.to_string())
            .ok_or_else(|| {
                anyhow!(
                    "mapping table {} needs a value column besides '{target_col}'",
                    args.map.display()
                )
            })?,
    };
    let map_frame = IndexedFrame::with_index(map_frame.into_data(), target_col)
        .with_context(|| format!("index {}", args.map.display()))?;
    let index_map = IndexMap::from_frame(&map_frame, &value_col)?;

    let span = info_span!("remap", table = %args.table.display());
    let _guard = span.enter();

    let rows_in = table.height();
    let drop_unmapped = !args.keep_unmapped;
    let remapped = remap_index(table, &index_map, &args.name, drop_unmapped)?;
    let unmapped = if drop_unmapped {
        rows_in - remapped.height()
    } else {
        remapped.index_values()?.null_count()
    };
    let summary = RemapSummary {
        rows_in,
        rows_out: remapped.height(),
        unmapped,
        output: args.output.clone(),
    };
    write_csv(remapped, args.output.as_deref())?;
    info!(rows_in, rows_out = summary.rows_out, unmapped, "Wrote remapped table");
    Ok(summary)
}
