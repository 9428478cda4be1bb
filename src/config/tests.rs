use super::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.parser.program, "grun");
    assert_eq!(config.parser.working_dir, PathBuf::from("build"));
    assert_eq!(config.diff.args, vec!["-du".to_string()]);
    assert_eq!(config.gild.accept, vec!["Y", "y", "yes"]);
    assert!(!config.render.strict);
}

#[test]
fn test_parse_full_config() {
    let content = r#"
[parser]
program = "antlr4-parse"
args = ["Expr.g4", "prog", "-tree", "inputs/{test}.txt"]
working-dir = "."

[golden]
dir = "golden"
extension = "tree"

[diff]
builtin = true

[gild]
prompt = "accept?"
accept = ["y"]

[render]
strict = true
"#;

    let config = Config::parse(content).unwrap();
    assert_eq!(config.parser.program, "antlr4-parse");
    assert_eq!(config.parser.working_dir, PathBuf::from("."));
    assert_eq!(config.golden.extension, "tree");
    assert!(config.diff.builtin);
    assert_eq!(config.diff.program, "diff");
    assert_eq!(config.gild.prompt, "accept?");
    assert_eq!(config.gild.accept, vec!["y"]);
    assert!(config.render.strict);
}

#[test]
fn test_parse_rejects_bad_types() {
    assert!(Config::parse("[render]\nstrict = \"yes\"\n").is_err());
}

#[test]
fn test_args_for_substitutes_test_name() {
    let parser = ParserConfig::default();
    assert_eq!(
        parser.args_for("loops/for_next.bas"),
        vec!["qbasic", "program", "-tree", "../loops/for_next.bas"]
    );
}

#[test]
fn test_golden_path_for() {
    let golden = GoldenConfig {
        dir: PathBuf::from("expected"),
        extension: "golden".to_string(),
    };
    assert_eq!(
        golden.path_for("print.bas"),
        PathBuf::from("expected/print.bas.golden")
    );
    assert_eq!(
        GoldenConfig::default().path_for("foo"),
        PathBuf::from("./foo.golden")
    );
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = Config::discover(None, tmp.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_discover_reads_default_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(CONFIG_FILE), "[golden]\nextension = \"gold\"\n").unwrap();
    let config = Config::discover(None, tmp.path()).unwrap();
    assert_eq!(config.golden.extension, "gold");
}

#[test]
fn test_load_missing_explicit_file_is_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let err = Config::discover(Some(&missing), tmp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_load_reports_parse_errors_with_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.toml");
    std::fs::write(&path, "[parser\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("failed to parse"));
}

#[test]
fn test_to_toml_reparses() {
    let mut config = Config::default();
    config.golden.dir = PathBuf::from("golden");
    let text = config.to_toml().unwrap();
    assert!(text.contains("working-dir"));
    assert_eq!(Config::parse(&text).unwrap(), config);
}
