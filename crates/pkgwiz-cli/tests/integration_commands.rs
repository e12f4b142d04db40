//! Integration tests for the command implementations.
//!
//! Every test runs against a temporary project passed as `--cwd`.

use pkgwiz_cli::cli::{CheckArgs, ExportsArgs, InitArgs, MergeArgs, PlanArgs};
use pkgwiz_cli::commands;
use pkgwiz_cli::error::{CliError, EntryError};
use pkgwiz_config::{ConfigDiscovery, CONFIG_FILE};
use pkgwiz_entry::{EntryShape, Format, BARREL_DIR, BARREL_FILE};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn init_args() -> InitArgs {
    InitArgs {
        entry: None,
        out_dir: None,
        format: Vec::new(),
        platform: None,
        minify: None,
        global_name: None,
        merge_in_one: false,
        dts: false,
        sourcemap: false,
        clean: false,
        auto_export: false,
        format_dir: false,
        force: false,
    }
}

#[test]
fn check_accepts_existing_entries() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    write(temp.path(), "src/cli.ts", "export {}");

    let args = CheckArgs {
        entry: Some("src/index.ts, src/cli.ts".to_string()),
        config: None,
    };
    commands::check_execute(args, Some(temp.path())).unwrap();
}

#[test]
fn check_rejects_missing_entries() {
    let temp = TempDir::new().unwrap();
    let args = CheckArgs {
        entry: Some("src/nope.ts".to_string()),
        config: None,
    };
    let err = commands::check_execute(args, Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::Entry(EntryError::NoValidEntries { .. })));
}

#[test]
fn check_requires_both_sides() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/client.ts", "export {}");
    let args = CheckArgs {
        entry: Some(r#"{"client": "src/client.ts", "server": "src/server.ts"}"#.to_string()),
        config: None,
    };
    let err = commands::check_execute(args, Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::Entry(EntryError::MandatoryMissing { .. })));
}

#[test]
fn merge_writes_barrel_for_glob() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.ts", "export const a = 1");
    write(temp.path(), "src/nested/b.ts", "export const b = 2");

    let args = MergeArgs {
        entry: Some("src/**/*.ts".to_string()),
        flatten: true,
        config: None,
    };
    commands::merge_execute(args, Some(temp.path())).unwrap();

    let barrel = fs::read_to_string(temp.path().join(BARREL_DIR).join(BARREL_FILE)).unwrap();
    assert!(barrel.contains("export * as a from \"./../src/a.ts\";"));
    assert!(barrel.contains("export * as nested_b from \"./../src/nested/b.ts\";"));
}

#[test]
fn merge_rejects_single_entry() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    let args = MergeArgs {
        entry: Some("src/index.ts".to_string()),
        flatten: false,
        config: None,
    };
    let err = commands::merge_execute(args, Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
}

#[test]
fn merge_rejects_one_member_list() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.ts", "export {}");
    let args = MergeArgs {
        entry: Some(r#"["src/a.ts"]"#.to_string()),
        flatten: false,
        config: None,
    };
    let err = commands::merge_execute(args, Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
    assert!(!temp.path().join(".tmp-pkgwiz").exists());
}

#[test]
fn plan_backs_up_and_cleans_output() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    write(temp.path(), "dist/old.js", "old");
    write(
        temp.path(),
        CONFIG_FILE,
        r#"{"entry": "src/index.ts", "clean": true}"#,
    );

    let args = PlanArgs {
        json: true,
        force: false,
        config: None,
    };
    commands::plan_execute(args, Some(temp.path())).unwrap();

    assert!(!temp.path().join("dist/old.js").exists());
    assert!(temp.path().join(".pkgwiz-backup/old.js").exists());
}

#[test]
fn exports_updates_package_json() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    write(temp.path(), "src/utils.ts", "export {}");
    write(temp.path(), "dist/index.mjs", "");
    write(temp.path(), "dist/index.cjs", "");
    write(temp.path(), "dist/index.d.mts", "");
    write(temp.path(), "dist/utils.mjs", "");
    write(temp.path(), "dist/utils.cjs", "");
    write(
        temp.path(),
        CONFIG_FILE,
        r#"{"entry": ["src/index.ts", "src/utils.ts"]}"#,
    );
    write(
        temp.path(),
        "package.json",
        r#"{"name": "demo", "version": "1.0.0", "type": "module"}"#,
    );

    let args = ExportsArgs {
        dry_run: false,
        config: None,
    };
    commands::exports_execute(args, Some(temp.path())).unwrap();

    let pkg = read_json(&temp.path().join("package.json"));
    assert_eq!(pkg["name"], "demo");
    assert_eq!(pkg["main"], "./dist/index.mjs");
    assert_eq!(pkg["module"], "./dist/index.mjs");
    assert_eq!(pkg["types"], "./dist/index.d.mts");
    assert_eq!(pkg["exports"]["."]["require"], "./dist/index.cjs");
    assert_eq!(pkg["exports"]["./utils"]["import"], "./dist/utils.mjs");
    assert_eq!(pkg["exports"]["./package.json"], "./package.json");
    assert_eq!(pkg["files"], serde_json::json!(["dist"]));
}

#[test]
fn exports_dry_run_leaves_package_json_alone() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    write(temp.path(), "dist/index.cjs", "");
    write(temp.path(), CONFIG_FILE, r#"{"entry": "src/index.ts", "formats": ["cjs"]}"#);
    let original = r#"{"name": "demo"}"#;
    write(temp.path(), "package.json", original);

    let args = ExportsArgs {
        dry_run: true,
        config: None,
    };
    commands::exports_execute(args, Some(temp.path())).unwrap();
    assert_eq!(fs::read_to_string(temp.path().join("package.json")).unwrap(), original);
}

#[test]
fn exports_without_artifacts_is_a_warning() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.ts", "export {}");
    write(temp.path(), "package.json", r#"{"name": "demo"}"#);

    let args = ExportsArgs {
        dry_run: false,
        config: None,
    };
    commands::exports_execute(args, Some(temp.path())).unwrap();
    let pkg = read_json(&temp.path().join("package.json"));
    assert!(pkg.get("exports").is_none());
}

#[test]
fn init_writes_inferred_config() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/main.ts", "export {}");

    let args = InitArgs {
        format: vec![Format::Esm],
        ..init_args()
    };
    commands::init_execute(args, Some(temp.path())).unwrap();

    let config = ConfigDiscovery::new(temp.path()).load().unwrap();
    assert_eq!(config.entry, EntryShape::Single("src/main.ts".to_string()));
    assert_eq!(config.formats, vec![Format::Esm]);
}

#[test]
fn init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), CONFIG_FILE, "{}");

    let err = commands::init_execute(init_args(), Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));

    let args = InitArgs {
        force: true,
        ..init_args()
    };
    commands::init_execute(args, Some(temp.path())).unwrap();
    assert_eq!(
        read_json(&temp.path().join(CONFIG_FILE))["entry"],
        "src/**/*.ts"
    );
}

#[test]
fn init_rejects_invalid_global_name() {
    let temp = TempDir::new().unwrap();
    let args = InitArgs {
        global_name: Some("my-lib".to_string()),
        ..init_args()
    };
    let err = commands::init_execute(args, Some(temp.path())).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
    assert!(!temp.path().join(CONFIG_FILE).exists());
}
