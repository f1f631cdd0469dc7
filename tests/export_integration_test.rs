//! Integration tests for the export run
//!
//! These drive the coordinator against an in-memory database and check the
//! bundles written to a temporary directory.

mod common;

use common::{author, named, publication, run_export, MemoryDatabase, Workspace};
use dcexport::adapters::database::queries;
use dcexport::core::export::ExportCoordinator;
use dcexport::domain::{DcExportError, Row};
use std::fs;
use std::sync::Arc;
use tokio::sync::watch;

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<dublin_core>\n";
const FOOTER: &str = "</dublin_core>\n";

#[tokio::test]
async fn test_single_publication_bundle() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"%PDF-1.4 study");

    let database = Arc::new(
        MemoryDatabase::new()
            .with_rows(
                queries::PUBLICATIONS,
                None,
                vec![publication(7, "A Study", "2020", "a.pdf")],
            )
            .with_rows(queries::AUTHORS, Some(7), vec![author("Jane", "Doe")]),
    );

    let summary = run_export(ws.config(4, false), database.clone())
        .await
        .unwrap();

    assert_eq!(ws.output_entries(), vec!["0007"]);
    assert_eq!(
        ws.item_entries("0007"),
        vec!["a.pdf", "contents", "dublin_core.xml"]
    );
    assert_eq!(
        ws.read_item("0007", "dublin_core.xml"),
        format!(
            "{HEADER}\
             \t<dcvalue element=\"title\">A Study</dcvalue>\n\
             \t<dcvalue element=\"date\" qualifier=\"created\">2020</dcvalue>\n\
             \t<dcvalue element=\"creator\">Doe, Jane</dcvalue>\n\
             {FOOTER}"
        )
    );
    assert_eq!(ws.read_item("0007", "contents"), "a.pdf\tbundle:ORIGINAL\n");

    // PDF moved out of the intake directory
    assert_eq!(
        fs::read(ws.item_dir("0007").join("a.pdf")).unwrap(),
        b"%PDF-1.4 study"
    );
    assert!(!ws.intake_dir().join("a.pdf").exists());

    assert_eq!(summary.total_publications, 1);
    assert_eq!(summary.exported, 1);
    assert_eq!(summary.pdfs_moved, 1);
    assert_eq!(summary.folder_digits, 4);
    assert_eq!(summary.exit_code(), 0);
    assert!(database.is_closed());
}

#[tokio::test]
async fn test_missing_or_empty_pdf_is_skipped() {
    let ws = Workspace::new();
    ws.add_pdf("present.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![
            publication(1, "Has PDF", "2001", "present.pdf"),
            publication(2, "No file on disk", "2002", "absent.pdf"),
            publication(3, "No filename", "2003", ""),
            publication(4, "Escapes intake", "2004", "../present.pdf"),
        ],
    ));

    let summary = run_export(ws.config(4, false), database.clone())
        .await
        .unwrap();

    assert_eq!(ws.output_entries(), vec!["0001"]);
    assert_eq!(summary.exported, 1);
    assert_eq!(summary.skipped_missing_pdf, 3);
    assert_eq!(summary.exit_code(), 1);

    // Skipped publications are never looked up
    assert!(database
        .executed()
        .iter()
        .all(|(_, param)| matches!(param, None | Some(1))));
}

#[tokio::test]
async fn test_field_order_and_suppression() {
    let ws = Workspace::new();
    ws.add_pdf("paper.pdf", b"pdf");

    let journal = Row::new()
        .with("journal", "Journal of Tests")
        .with("volume", "12")
        .with("spage", "0")
        .with("epage", "  ")
        .with("extent", serde_json::Value::Null);

    let database = Arc::new(
        MemoryDatabase::new()
            .with_rows(
                queries::PUBLICATIONS,
                None,
                vec![Row::new()
                    .with("pub_id", 12)
                    .with("title", "  Ordered  ")
                    .with("abstract", "Fish & <chips>\u{7}")
                    .with("year", 0)
                    .with("pub_file", "paper.pdf")],
            )
            .with_rows(
                queries::AUTHORS,
                Some(12),
                vec![author("Ada", "Lovelace"), author("", "Babbage")],
            )
            .with_rows(queries::JOURNALS, Some(12), vec![journal])
            .with_rows(queries::SUBJECTS, Some(12), vec![named("Computing")])
            .with_rows(
                queries::KEYWORDS,
                Some(12),
                vec![named("engines"), named("0"), named("")],
            ),
    );

    run_export(ws.config(4, false), database).await.unwrap();

    assert_eq!(
        ws.read_item("0012", "dublin_core.xml"),
        format!(
            "{HEADER}\
             \t<dcvalue element=\"title\">Ordered</dcvalue>\n\
             \t<dcvalue element=\"description\" qualifier=\"abstract\">Fish &amp; &lt;chips&gt;</dcvalue>\n\
             \t<dcvalue element=\"creator\">Lovelace, Ada</dcvalue>\n\
             \t<dcvalue element=\"creator\">Babbage</dcvalue>\n\
             \t<dcvalue element=\"relation\" qualifier=\"ispartof\">Journal of Tests</dcvalue>\n\
             \t<dcvalue element=\"citation\" qualifier=\"volume\">12</dcvalue>\n\
             \t<dcvalue element=\"subject\">Computing</dcvalue>\n\
             \t<dcvalue element=\"subject\" qualifier=\"keyword\">engines</dcvalue>\n\
             {FOOTER}"
        )
    );
}

#[tokio::test]
async fn test_failing_query_still_writes_publication() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");

    let database = Arc::new(
        MemoryDatabase::new()
            .with_rows(
                queries::PUBLICATIONS,
                None,
                vec![publication(5, "Resilient", "1999", "a.pdf")],
            )
            .with_rows(queries::KEYWORDS, Some(5), vec![named("kept")])
            .failing(queries::AUTHORS),
    );

    let summary = run_export(ws.config(4, false), database).await.unwrap();

    let xml = ws.read_item("0005", "dublin_core.xml");
    assert!(xml.contains("<dcvalue element=\"title\">Resilient</dcvalue>"));
    assert!(!xml.contains("creator"));
    assert!(xml.contains("<dcvalue element=\"subject\" qualifier=\"keyword\">kept</dcvalue>"));
    assert!(xml.ends_with(FOOTER));

    assert_eq!(summary.exported, 1);
    assert_eq!(summary.failed_queries, 1);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn test_failing_main_query_exports_nothing() {
    let ws = Workspace::new();
    let database = Arc::new(MemoryDatabase::new().failing(queries::PUBLICATIONS));

    let summary = run_export(ws.config(4, false), database.clone())
        .await
        .unwrap();

    assert!(ws.output_entries().is_empty());
    assert_eq!(summary.total_publications, 0);
    assert_eq!(summary.failed_queries, 1);
    assert!(database.is_closed());
}

#[tokio::test]
async fn test_dry_run_is_repeatable() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");

    let database = || {
        Arc::new(
            MemoryDatabase::new()
                .with_rows(
                    queries::PUBLICATIONS,
                    None,
                    vec![publication(42, "Twice", "2010", "a.pdf")],
                )
                .with_rows(queries::SUBJECTS, Some(42), vec![named("Repeats")]),
        )
    };

    let first = run_export(ws.config(4, true), database()).await.unwrap();
    let xml = ws.read_item("0042", "dublin_core.xml");
    let contents = ws.read_item("0042", "contents");

    let second = run_export(ws.config(4, true), database()).await.unwrap();

    assert_eq!(ws.read_item("0042", "dublin_core.xml"), xml);
    assert_eq!(ws.read_item("0042", "contents"), contents);

    // PDF never leaves the intake directory
    assert_eq!(ws.item_entries("0042"), vec!["contents", "dublin_core.xml"]);
    assert!(ws.intake_dir().join("a.pdf").exists());
    assert!(!ws.item_dir("0042").join("a.pdf").exists());

    for summary in [first, second] {
        assert!(summary.dry_run);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.pdfs_moved, 0);
    }
}

#[tokio::test]
async fn test_folder_overflow_aborts_before_output() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");
    ws.add_pdf("b.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![
            publication(1, "Fits", "2000", "a.pdf"),
            publication(12345, "Too wide", "2000", "b.pdf"),
        ],
    ));

    let err = run_export(ws.config(4, false), database.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, DcExportError::Configuration(_)));
    assert!(err.to_string().contains("12345"));
    assert!(!ws.output_dir().exists());
    assert!(ws.intake_dir().join("a.pdf").exists());
    assert!(database.is_closed());
}

#[tokio::test]
async fn test_auto_folder_width() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");
    ws.add_pdf("b.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![
            publication(3, "Short", "2000", "a.pdf"),
            publication(12345, "Long", "2000", "b.pdf"),
        ],
    ));

    let summary = run_export(ws.config(0, false), database).await.unwrap();

    assert_eq!(summary.folder_digits, 5);
    assert_eq!(ws.output_entries(), vec!["00003", "12345"]);
}

#[tokio::test]
async fn test_unreadable_publication_row_is_counted() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![
            publication(1, "Fine", "2000", "a.pdf"),
            Row::new().with("pub_id", "abc").with("pub_file", "a.pdf"),
        ],
    ));

    let summary = run_export(ws.config(4, false), database).await.unwrap();

    assert_eq!(summary.total_publications, 2);
    assert_eq!(summary.exported, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn test_filenames_with_spaces_are_bundled_verbatim() {
    let ws = Workspace::new();
    ws.add_pdf("Smith (2020) final.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![publication(8, "Spaces", "2020", "Smith (2020) final.pdf")],
    ));

    run_export(ws.config(4, false), database).await.unwrap();

    assert_eq!(
        ws.read_item("0008", "contents"),
        "Smith (2020) final.pdf\tbundle:ORIGINAL\n"
    );
    assert!(ws.item_dir("0008").join("Smith (2020) final.pdf").exists());
}

#[tokio::test]
async fn test_shutdown_before_first_publication() {
    let ws = Workspace::new();
    ws.add_pdf("a.pdf", b"pdf");

    let database = Arc::new(MemoryDatabase::new().with_rows(
        queries::PUBLICATIONS,
        None,
        vec![publication(1, "Never", "2000", "a.pdf")],
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    let summary = ExportCoordinator::new(ws.config(4, false), database.clone(), shutdown_rx)
        .execute_export()
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.processed(), 0);
    assert_eq!(summary.exit_code(), 130);
    assert!(ws.output_entries().is_empty());
    assert!(database.is_closed());
}
