//! Integration tests for claimlens-cli
//!
//! Commands run against state files in a temporary directory, the way
//! separate invocations of the binary would.

use claimlens_cli::cli::{
    AnalyzeArgs, ClearArgs, ClearTarget, CorrectArgs, ExportArgs, ImportArgs, IndexArgs,
    KeywordArgs, ReportArgs,
};
use claimlens_cli::commands;
use claimlens_cli::config::{Config, OutputFormat, Paths};
use claimlens_cli::{CliError, Formatter, Session};
use claimlens_domain::{Efficacy, Persistence};
use std::fs;
use tempfile::TempDir;

fn config(dir: &TempDir) -> Config {
    Config {
        paths: Paths {
            learning: Some(dir.path().join("learning.json")),
            session: Some(dir.path().join("session.json")),
        },
        ..Config::default()
    }
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

fn analyze(session: &mut Session, text: &str) {
    commands::execute_analyze(
        AnalyzeArgs {
            text: Some(text.to_string()),
            file: None,
            stdin: false,
        },
        session,
        &quiet(),
    )
    .unwrap();
}

#[test]
fn test_correction_survives_between_invocations() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);

    {
        let mut session = Session::from_config(&config).unwrap();
        analyze(&mut session, "雪肌奇迹\n长效保湿");
    }

    {
        let mut session = Session::from_config(&config).unwrap();
        assert_eq!(session.engine().results().len(), 2);
        commands::execute_correct(
            CorrectArgs {
                index: 1,
                dimension: "efficacy".to_string(),
                labels: vec!["whitening".to_string()],
                keyword: Some("雪肌".to_string()),
            },
            &mut session,
            &quiet(),
        )
        .unwrap();
    }

    let mut session = Session::from_config(&config).unwrap();
    assert!(session.engine().results()[0].efficacy.contains(&Efficacy::Whitening));
    analyze(&mut session, "雪肌精华");
    assert!(session.engine().results()[0].efficacy.contains(&Efficacy::Whitening));
}

#[test]
fn test_feedback_without_results_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::from_config(&config(&dir)).unwrap();

    let err =
        commands::execute_confirm(IndexArgs { index: 1 }, &mut session, &quiet()).unwrap_err();
    assert!(matches!(err, CliError::NoResults));
}

#[test]
fn test_out_of_range_index() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::from_config(&config(&dir)).unwrap();
    analyze(&mut session, "保湿");

    let err =
        commands::execute_confirm(IndexArgs { index: 5 }, &mut session, &quiet()).unwrap_err();
    assert!(matches!(err, CliError::Engine(_)));
    assert_eq!(session.engine().learning_summary().feedback_actions, 0);
}

#[test]
fn test_unknown_label_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::from_config(&config(&dir)).unwrap();

    let err = commands::execute_learn(
        KeywordArgs {
            dimension: "persistence".to_string(),
            label: "forever".to_string(),
            keyword: "永久".to_string(),
        },
        &mut session,
        &quiet(),
    )
    .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[test]
fn test_export_then_import_elsewhere() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let export_path = source_dir.path().join("export.json");

    let mut source = Session::from_config(&config(&source_dir)).unwrap();
    commands::execute_learn(
        KeywordArgs {
            dimension: "3".to_string(),
            label: "持久".to_string(),
            keyword: "一晚".to_string(),
        },
        &mut source,
        &quiet(),
    )
    .unwrap();
    commands::execute_export(
        ExportArgs {
            output: Some(export_path.clone()),
        },
        &source,
        &quiet(),
    )
    .unwrap();

    let mut target = Session::from_config(&config(&target_dir)).unwrap();
    commands::execute_import(ImportArgs { file: export_path }, &mut target, &quiet()).unwrap();
    analyze(&mut target, "妆效一晚不脱");
    assert_eq!(target.engine().results()[0].persistence, Persistence::Durable);
}

#[test]
fn test_invalid_import_leaves_state() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"newKeywords": {"功效": ["not", "a", "mapping"]}}"#).unwrap();

    let mut session = Session::from_config(&config(&dir)).unwrap();
    let err =
        commands::execute_import(ImportArgs { file: bad }, &mut session, &quiet()).unwrap_err();
    assert!(matches!(err, CliError::Engine(_)));
    assert!(session.engine().store().is_empty());
}

#[test]
fn test_csv_report_file() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.csv");
    let mut session = Session::from_config(&config(&dir)).unwrap();
    analyze(&mut session, "长效保湿\n美白");

    commands::execute_report(
        ReportArgs {
            csv: true,
            output: Some(report_path.clone()),
        },
        &session,
        &quiet(),
    )
    .unwrap();

    let csv = fs::read_to_string(report_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("序号,宣称内容"));
    assert!(lines[1].starts_with("1,长效保湿,保湿,"));
    assert!(lines[2].starts_with("2,美白,"));
    assert!(csv.contains("当前准确率,100%"));
}

#[test]
fn test_clear_all() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    {
        let mut session = Session::from_config(&config).unwrap();
        analyze(&mut session, "保湿");
        commands::execute_confirm(IndexArgs { index: 1 }, &mut session, &quiet()).unwrap();
        commands::execute_clear(
            ClearArgs {
                target: ClearTarget::All,
            },
            &mut session,
            &quiet(),
        )
        .unwrap();
    }

    let session = Session::from_config(&config).unwrap();
    assert!(session.engine().results().is_empty());
    assert!(session.engine().store().is_empty());
}
