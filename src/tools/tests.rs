use super::*;
use crate::config::{DiffConfig, ParserConfig};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn default_accept() -> Vec<String> {
    vec!["Y".to_string(), "y".to_string(), "yes".to_string()]
}

fn have_diff() -> bool {
    std::process::Command::new("diff")
        .arg("--version")
        .output()
        .is_ok()
}

#[test]
fn test_is_affirmative_exact_answers() {
    let accept = default_accept();
    assert!(is_affirmative("Y", &accept));
    assert!(is_affirmative("y\n", &accept));
    assert!(is_affirmative("yes\r\n", &accept));
}

#[test]
fn test_is_affirmative_rejects_other_spellings() {
    let accept = default_accept();
    assert!(!is_affirmative("", &accept));
    assert!(!is_affirmative("\n", &accept));
    assert!(!is_affirmative("Yes", &accept));
    assert!(!is_affirmative("YES\n", &accept));
    assert!(!is_affirmative(" y", &accept));
    assert!(!is_affirmative("y \n", &accept));
    assert!(!is_affirmative("n", &accept));
}

#[test]
fn test_scripted_confirm_records_prompts() {
    let confirm = ScriptedConfirm::new(["yes", "no"], default_accept());
    assert!(confirm.confirm("gild?"));
    assert!(!confirm.confirm("gild?"));
    // Out of answers
    assert!(!confirm.confirm("gild?"));
    assert_eq!(confirm.prompts(), vec!["gild?", "gild?", "gild?"]);
}

#[test]
fn test_fixed_confirm() {
    assert!(FixedConfirm(true).confirm("gild?"));
    assert!(!FixedConfirm(false).confirm("gild?"));
}

#[test]
fn test_parse_output_failure_flag() {
    assert!(!ParseOutput::tree("(a)").is_failure());
    assert!(ParseOutput::failure("line 1:0 token recognition error").is_failure());
}

#[test]
fn test_mock_parser_unknown_test_fails() {
    let parser = MockParser::new().with("known", ParseOutput::tree("(a)"));
    assert_eq!(parser.parse_tree("known").unwrap(), ParseOutput::tree("(a)"));
    assert!(parser.parse_tree("other").unwrap().is_failure());
}

#[test]
fn test_builtin_diff_missing_golden() {
    let tmp = TempDir::new().unwrap();
    let outcome = BuiltinDiff
        .diff_text(&tmp.path().join("foo.golden"), "(a)")
        .unwrap();
    assert_eq!(outcome, DiffOutcome::Missing);
}

#[test]
fn test_builtin_diff_identical_and_differs() {
    let tmp = TempDir::new().unwrap();
    let golden = tmp.path().join("foo.golden");
    std::fs::write(&golden, "(a\n  (b))").unwrap();

    assert_eq!(
        BuiltinDiff.diff_text(&golden, "(a\n  (b))").unwrap(),
        DiffOutcome::Identical
    );

    match BuiltinDiff.diff_text(&golden, "(a\n  (c))").unwrap() {
        DiffOutcome::Differs(diff) => {
            assert!(diff.starts_with(&format!("--- {}\n+++ -\n", golden.display())));
            assert!(diff.contains("-  (b))\n"));
            assert!(diff.contains("+  (c))\n"));
        }
        other => panic!("expected a diff, got {:?}", other),
    }
}

#[test]
fn test_builtin_diff_unreadable_golden_is_error() {
    let tmp = TempDir::new().unwrap();
    // A directory can't be read as a file
    let err = BuiltinDiff.diff_text(tmp.path(), "(a)").unwrap_err();
    assert!(matches!(err, ToolError::Io { .. }));
}

#[test]
fn test_external_diff_missing_golden_does_not_spawn() {
    let tmp = TempDir::new().unwrap();
    let differ = ExternalDiff::new(&DiffConfig {
        builtin: false,
        program: "definitely-not-a-diff-tool".to_string(),
        args: vec![],
    });
    assert_eq!(
        differ
            .diff_text(&tmp.path().join("missing.golden"), "(a)")
            .unwrap(),
        DiffOutcome::Missing
    );
}

#[test]
fn test_external_diff_spawn_failure() {
    let tmp = TempDir::new().unwrap();
    let golden = tmp.path().join("foo.golden");
    std::fs::write(&golden, "(a)").unwrap();
    let differ = ExternalDiff::new(&DiffConfig {
        builtin: false,
        program: "definitely-not-a-diff-tool".to_string(),
        args: vec![],
    });
    let err = differ.diff_text(&golden, "(a)").unwrap_err();
    assert!(matches!(err, ToolError::Spawn { .. }));
}

#[test]
fn test_external_diff_against_real_diff() {
    if !have_diff() {
        return;
    }
    let tmp = TempDir::new().unwrap();
    let golden = tmp.path().join("foo.golden");
    std::fs::write(&golden, "(a\n  (b))").unwrap();
    let differ = ExternalDiff::new(&DiffConfig::default());

    assert_eq!(
        differ.diff_text(&golden, "(a\n  (b))").unwrap(),
        DiffOutcome::Identical
    );
    match differ.diff_text(&golden, "(a\n  (c))").unwrap() {
        DiffOutcome::Differs(diff) => {
            assert!(diff.contains("-  (b))"));
            assert!(diff.contains("+  (c))"));
        }
        other => panic!("expected a diff, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_command_parser_captures_streams() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("ok.bas"), "(program (stmt))").unwrap();
    let parser = CommandParser::new(&ParserConfig {
        program: "cat".to_string(),
        args: vec!["{test}".to_string()],
        working_dir: tmp.path().to_path_buf(),
    });

    assert_eq!(
        parser.parse_tree("ok.bas").unwrap(),
        ParseOutput::tree("(program (stmt))")
    );
    let missing = parser.parse_tree("missing.bas").unwrap();
    assert!(missing.is_failure());
    assert!(missing.stderr.contains("missing.bas"));
}

#[test]
fn test_command_parser_spawn_failure() {
    let parser = CommandParser::new(&ParserConfig {
        program: "definitely-not-a-parser".to_string(),
        args: vec![],
        working_dir: PathBuf::from("."),
    });
    let err = parser.parse_tree("foo").unwrap_err();
    assert!(matches!(err, ToolError::Spawn { .. }));
    assert!(err.to_string().starts_with("failed to run `definitely-not-a-parser`"));
}
