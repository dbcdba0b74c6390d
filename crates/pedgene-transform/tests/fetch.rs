//! Tests for dataset retrieval with in-memory sources.

use std::cell::RefCell;

use pedgene_model::{IndexedFrame, MalformedPolicy, Split};
use pedgene_taiga::{DatasetRef, DatasetSource, FetchError};
use pedgene_transform::{Dataset, GENE_ID_COLUMN, TransformError, get_from_taiga};
use polars::prelude::*;

/// Serves one table and records the requested datasets.
struct StaticSource {
    frame: IndexedFrame,
    requests: RefCell<Vec<DatasetRef>>,
}

impl StaticSource {
    fn new(frame: IndexedFrame) -> Self {
        Self {
            frame,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self, dataset: &DatasetRef) -> pedgene_taiga::Result<IndexedFrame> {
        self.requests.borrow_mut().push(dataset.clone());
        Ok(self.frame.clone())
    }
}

struct MissingSource;

impl DatasetSource for MissingSource {
    fn fetch(&self, dataset: &DatasetRef) -> pedgene_taiga::Result<IndexedFrame> {
        Err(FetchError::NotFound(dataset.to_string()))
    }
}

fn dataset() -> DatasetRef {
    DatasetRef::new("gene-effect").with_version(2).with_file("effect")
}

fn matrix() -> IndexedFrame {
    let df = df! {
        "cell_line" => ["ACH-1", "ACH-2"],
        "TP53 (7157)" => [0.1, 0.2],
        "X1 & X2 (100)" => [0.3, 0.4],
    }
    .unwrap();
    IndexedFrame::with_index(df, "cell_line").unwrap()
}

#[test]
fn no_split_returns_table_unmodified() {
    let source = StaticSource::new(matrix());
    let result = get_from_taiga(&source, &dataset(), &Split::None, MalformedPolicy::Fail).unwrap();

    let Dataset::Raw(frame) = result else {
        panic!("expected raw dataset");
    };
    assert!(frame.data().equals(matrix().data()));
    assert_eq!(frame.index_name(), Some("cell_line"));
    assert_eq!(source.requests.borrow().as_slice(), &[dataset()]);
}

#[test]
fn header_split_returns_gene_columns() {
    let source = StaticSource::new(matrix());
    let result =
        get_from_taiga(&source, &dataset(), &Split::Header, MalformedPolicy::Fail).unwrap();

    let Dataset::GeneColumns(genes) = result else {
        panic!("expected gene columns");
    };
    assert_eq!(genes.gene_ids(), vec![7157]);
}

#[test]
fn column_split_returns_gene_rows() {
    let df = df! {
        "gene" => ["MYCN (4613)", "ALK (238)"],
        "lineage" => ["neuroblastoma", "neuroblastoma"],
    }
    .unwrap();
    let source = StaticSource::new(IndexedFrame::positional(df));
    let split = Split::Column("gene".to_string());

    let result = get_from_taiga(&source, &dataset(), &split, MalformedPolicy::Fail).unwrap();
    assert_eq!(result.height(), 2);

    let frame = result.into_frame().unwrap();
    assert_eq!(frame.index_name(), Some(GENE_ID_COLUMN));
    let ids = frame.data().column(GENE_ID_COLUMN).unwrap().i64().unwrap();
    assert_eq!(ids.get(0), Some(4613));
    assert_eq!(ids.get(1), Some(238));
}

#[test]
fn fetch_errors_propagate_unchanged() {
    let err = get_from_taiga(&MissingSource, &dataset(), &Split::Header, MalformedPolicy::Fail)
        .unwrap_err();

    assert!(matches!(
        &err,
        TransformError::Fetch(FetchError::NotFound(id)) if id == "gene-effect.2/effect"
    ));
    assert_eq!(err.to_string(), "dataset not found: gene-effect.2/effect");
}

#[test]
fn boxed_sources_are_accepted() {
    let source: Box<dyn DatasetSource> = Box::new(StaticSource::new(matrix()));
    let result = get_from_taiga(&source, &dataset(), &Split::None, MalformedPolicy::Fail).unwrap();
    assert_eq!(result.height(), 2);
}

#[test]
fn header_dataset_flattens_to_labelled_columns() {
    let source = StaticSource::new(matrix());
    let frame = get_from_taiga(&source, &dataset(), &Split::Header, MalformedPolicy::Fail)
        .unwrap()
        .into_frame()
        .unwrap();

    assert_eq!(frame.data().width(), 2);
    assert!(frame.data().column("TP53 (7157)").is_ok());
}
