//! Integration tests for checking Tally files on disk

use std::io::Write;
use tally_compiler::{CheckError, Checker, CheckOptions};
use tempfile::NamedTempFile;

/// Helper to write a Tally source string to a temp file and check it
fn check_source(source: &str) -> (NamedTempFile, tally_compiler::Result<tally_compiler::CheckOutput>) {
    let mut file = tempfile::Builder::new()
        .suffix(".tly")
        .tempfile()
        .expect("temp file");
    file.write_all(source.as_bytes()).expect("write source");

    let options = CheckOptions::new(file.path()).trace(true);
    let result = Checker::new(options).check();
    (file, result)
}

#[test]
fn test_well_formed_file() {
    let source = r#"
// running total
begin
    total := 0;
    for (i := 1; i <= 10; i := i + 1) do
        total := total + i * i
    end loop;
    call show(total)
end
"#;
    let (file, result) = check_source(source);
    let output = result.expect("check succeeds");
    assert_eq!(output.source_file, file.path());
    assert_eq!(output.trace.first().map(String::as_str), Some("BEGIN StatementPart"));
    assert_eq!(output.trace.last().map(String::as_str), Some("SUCCESS"));
    // `begin` sits on the third line of the file
    assert_eq!(output.trace[1], "TOKEN begin on line 2");
}

#[test]
fn test_syntax_error_reports_file_line() {
    let source = "begin\n  x := 1;\n  if x > 1 then\n    y := 2\n  end\nend\n";
    let (_file, result) = check_source(source);
    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "SYNTAX ERROR on line 6: Expected token if but found end (Encountered token: end 'end')"
    );
    match &err {
        CheckError::Syntax { context, .. } => {
            assert_eq!(context.len(), 5);
            assert_eq!(context.last().map(|l| l.nonterminal), Some(None));
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
    assert!(err.trace().contains(&"BEGIN IfStatement".to_string()));
    assert!(!err.trace().contains(&"END IfStatement".to_string()));
}

#[test]
fn test_scan_error_in_file() {
    let (_file, result) = check_source("begin\n  x := 'single'\nend\n");
    let err = result.unwrap_err();
    assert!(matches!(err, CheckError::Scan { .. }), "{:?}", err);
    assert_eq!(err.to_string(), "SCAN ERROR on line 2: unexpected character '''");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let options = CheckOptions::new(dir.path().join("missing.tly"));
    let err = Checker::new(options).check().unwrap_err();
    assert!(matches!(err, CheckError::FileNotFound(_)));
    assert!(err.trace().is_empty());
}

#[test]
fn test_trace_not_kept_without_option() {
    let mut file = tempfile::Builder::new()
        .suffix(".tly")
        .tempfile()
        .expect("temp file");
    file.write_all(b"begin call p(a) end\n").expect("write source");

    let output = Checker::new(CheckOptions::new(file.path()))
        .check()
        .expect("check succeeds");
    assert!(output.trace.is_empty());
    assert_eq!(output.terminals, 7);
}
