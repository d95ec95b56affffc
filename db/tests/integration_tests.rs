use std::path::{Path, PathBuf};

use nixargs_config::{CommandManifest, ConfigError, EnvBindings, load_config_args};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const SERVE_YAML: &str = r#"
names: [serve]
summary: Serve files
options:
  - key: port
    flags: [-p, --port]
    accepts_value: true
    defaults: ["80"]
    env: [SERVE_PORT]
  - key: root
    flags: [--root]
    multi_value: true
    delimiters: ":"
    env: [SERVE_ROOT]
  - key: verbose
    flags: [-v, --verbose]
"#;

// ---------------------------------------------------------------------------
// Manifests
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_and_json_manifests() {
    let dir = TempDir::new().unwrap();
    let yaml_path = write_file(dir.path(), "serve.yaml", SERVE_YAML);

    let from_yaml = CommandManifest::load(&yaml_path).unwrap();
    let json = serde_json::to_string(&from_yaml).unwrap();
    let json_path = write_file(dir.path(), "serve.json", &json);
    let from_json = CommandManifest::load(&json_path).unwrap();

    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.options.len(), 3);
}

#[test]
fn test_save_load_round_trip_builds_same_tree() {
    let dir = TempDir::new().unwrap();
    let manifest = CommandManifest::from_yaml_str(SERVE_YAML).unwrap();
    let path = dir.path().join("saved.yaml");
    manifest.save(&path).unwrap();

    let reloaded = CommandManifest::load(&path).unwrap();
    assert_eq!(reloaded, manifest);
    assert_eq!(reloaded.build().unwrap().help(), manifest.build().unwrap().help());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = CommandManifest::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.yaml", "names: [unterminated");
    let err = CommandManifest::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

// ---------------------------------------------------------------------------
// Config-argument files
// ---------------------------------------------------------------------------

#[test]
fn test_text_config_args_skip_comments() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "serve.args", "# local overrides\n--port\n8080\n\n-v\n");
    assert_eq!(load_config_args(&path).unwrap(), vec!["--port", "8080", "-v"]);
}

#[test]
fn test_structured_config_args() {
    let dir = TempDir::new().unwrap();
    let yaml = write_file(dir.path(), "args.yml", "- --port\n- '8080'\n");
    let json = write_file(dir.path(), "args.json", r#"["--port", "8080"]"#);
    assert_eq!(load_config_args(&yaml).unwrap(), vec!["--port", "8080"]);
    assert_eq!(load_config_args(&json).unwrap(), vec!["--port", "8080"]);
}

#[test]
fn test_structured_config_args_must_be_strings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "args.json", r#"{"port": 8080}"#);
    assert!(matches!(load_config_args(&path), Err(ConfigError::Json(_))));
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_manifest_config_and_env_precedence() {
    let dir = TempDir::new().unwrap();
    let manifest = CommandManifest::load(write_file(dir.path(), "serve.yaml", SERVE_YAML)).unwrap();
    let serve = manifest.build().unwrap();
    let config = load_config_args(write_file(dir.path(), "serve.args", "--port\n9000\n-v\n")).unwrap();

    let env = manifest
        .env_bindings(&["serve"])
        .unwrap()
        .resolve(|name| (name == "SERVE_ROOT").then(|| "/srv:/var/www".to_string()));

    let result = serve.parse_with_env(&["serve", "--port", "8080"], &config, &env);
    assert_eq!(result.commands(), ["serve"]);
    assert_eq!(result.get_uint("port").unwrap(), Some(8080));
    assert_eq!(result.values("root").unwrap(), ["/srv", "/var/www"]);
    assert_eq!(result.get_bool("verbose").unwrap(), Some(true));
    assert!(!result.has_flag_key("verbose"));

    let result = serve.parse_with_env(&["serve"], &[] as &[&str], &EnvBindings::new().resolve_from_process());
    assert_eq!(result.value("port"), Some("80"));
}
