//! End to end runs against files in a temporary directory

use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tfsync::{sync, SyncError, SyncOptions, SyncSummary};

struct Workspace {
    _dir: tempfile::TempDir,
    tfvars: PathBuf,
    env: PathBuf,
}

impl Workspace {
    fn new(tfvars: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Self {
            tfvars: dir.path().join("terraform.tfvars"),
            env: dir.path().join(".env"),
            _dir: dir,
        };
        std::fs::write(&workspace.tfvars, tfvars).unwrap();
        workspace
    }

    fn with_env(self, env: &str) -> Self {
        std::fs::write(&self.env, env).unwrap();
        self
    }

    fn sync(&self, options: &SyncOptions) -> SyncSummary {
        sync(&self.tfvars, &self.env, options).unwrap()
    }

    fn env_contents(&self) -> String {
        std::fs::read_to_string(&self.env).unwrap()
    }

    /// entry lines only, header removed
    fn entries(&self) -> Vec<String> {
        self.env_contents()
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}

fn summary(new_count: usize, updated_count: usize, total_count: usize) -> SyncSummary {
    SyncSummary {
        new_count,
        updated_count,
        total_count,
    }
}

#[test]
fn quoted_string() {
    let ws = Workspace::new(r#"region = "us-east-1""#);
    ws.sync(&SyncOptions::default());
    assert_eq!(ws.entries(), ["REGION=us-east-1"]);
}

#[test]
fn boolean() {
    let ws = Workspace::new("enabled = true");
    ws.sync(&SyncOptions::default());
    assert_eq!(ws.entries(), ["ENABLED=true"]);
}

#[test]
fn multi_line_list() {
    let ws = Workspace::new("tags = [\n  \"a\",\n  \"b\"\n]\n");
    ws.sync(&SyncOptions::default());
    assert_eq!(ws.entries(), ["TAGS=a,b"]);
}

#[test]
fn prefix() {
    let ws = Workspace::new(r#"name = "svc""#);
    ws.sync(&SyncOptions::default().with_prefix("APP_"));
    assert_eq!(ws.entries(), ["APP_NAME=svc"]);
}

#[test]
fn changed_value_is_updated() {
    let ws = Workspace::new(r#"region = "us-east-1""#).with_env("REGION=us-west-2\n");
    let summary = ws.sync(&SyncOptions::default());

    assert_eq!(summary, self::summary(0, 1, 1));
    assert_eq!(ws.entries(), ["REGION=us-east-1"]);
}

#[test]
fn missing_source_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let env = dir.path().join(".env");
    std::fs::write(&env, "KEEP=1\n").unwrap();
    let before = std::fs::read(&env).unwrap();

    let err = sync(
        &dir.path().join("missing.tfvars"),
        &env,
        &SyncOptions::default().with_overwrite(true),
    )
    .unwrap_err();

    assert!(matches!(err, SyncError::SourceNotFound(ref path) if path.ends_with("missing.tfvars")));
    assert_eq!(std::fs::read(&env).unwrap(), before);
}

#[test]
fn missing_source_does_not_create_destination() {
    let dir = tempfile::tempdir().unwrap();
    let env = dir.path().join(".env");

    let result = sync(&dir.path().join("missing.tfvars"), &env, &SyncOptions::default());

    assert!(result.is_err());
    assert!(!env.exists());
}

#[test]
fn second_run_is_a_no_op() {
    let ws = Workspace::new(
        r#"
project = "demo"
description = "has spaces and a $dollar"
path = "C:\\tools"
ports = [80, 443]
ratio = 1.0
labels = { env = "prod" }
owner = null
"#,
    );

    let first = ws.sync(&SyncOptions::default());
    let written = ws.env_contents();
    let second = ws.sync(&SyncOptions::default());

    assert_eq!(first, summary(7, 0, 7));
    assert_eq!(second, summary(0, 0, 7));
    assert_eq!(ws.env_contents(), written);
}

#[test]
fn merge_keeps_unrelated_entries() {
    let ws = Workspace::new("region = \"eu-west-1\"").with_env("# mine\nLOCAL_ONLY='keep me'\n");
    let summary = ws.sync(&SyncOptions::default());

    assert_eq!(summary, self::summary(1, 0, 2));
    assert_eq!(ws.entries(), ["LOCAL_ONLY=\"keep me\"", "REGION=eu-west-1"]);
}

#[test]
fn overwrite_discards_existing_entries() {
    let ws = Workspace::new("region = \"eu-west-1\"").with_env("LOCAL_ONLY=1\nREGION=eu-west-1\n");
    let summary = ws.sync(&SyncOptions::default().with_overwrite(true));

    assert_eq!(summary, self::summary(1, 0, 1));
    assert_eq!(ws.entries(), ["REGION=eu-west-1"]);
}

#[test]
fn output_is_sorted_by_key() {
    let ws = Workspace::new("zeta = 1\nalpha = 2\nmid = 3\n").with_env("BETA=x\n");
    ws.sync(&SyncOptions::default());

    assert_eq!(ws.entries(), ["ALPHA=2", "BETA=x", "MID=3", "ZETA=1"]);
}

#[test]
fn full_file_layout() {
    let ws = Workspace::new(
        r#"
# general
region      = "us-east-1" # primary
environment = "staging"
instance_count = 3
enable_logs = TRUE

subnets = [
  "10.0.1.0/24",
  "10.0.2.0/24",
]

tags = { team = "core" }
"#,
    );
    ws.sync(&SyncOptions::default().with_header(false));

    insta::assert_snapshot!(ws.env_contents(), @r###"
    ENABLE_LOGS=true
    ENVIRONMENT=staging
    INSTANCE_COUNT=3
    REGION=us-east-1
    SUBNETS=10.0.1.0/24,10.0.2.0/24
    TAGS="{\"team\":\"core\"}"
    "###);
}

#[test]
fn multi_line_map_becomes_json() {
    let ws = Workspace::new("labels = {\n  env  = \"prod\"\n  team = \"core\"\n}\n");
    ws.sync(&SyncOptions::default());

    assert_eq!(ws.entries(), [r#"LABELS="{\"env\":\"prod\",\"team\":\"core\"}""#]);
}

#[test]
fn multi_line_map_is_idempotent() {
    let ws = Workspace::new("labels = {\n  env  = \"prod\"\n  team = \"core\"\n}\n");

    ws.sync(&SyncOptions::default());
    let second = ws.sync(&SyncOptions::default());

    assert_eq!(second, summary(0, 0, 1));
}

#[test]
fn header_is_written_first() {
    let ws = Workspace::new("a = 1");
    ws.sync(&SyncOptions::default());

    let contents = ws.env_contents();
    let (header, entries) = contents.split_once("\n\n").unwrap();

    assert!(header.lines().all(|line| line.starts_with('#')));
    assert!(header.contains("synced from terraform.tfvars"));
    assert_eq!(entries, "A=1\n");
}

#[test]
fn strict_mode_rejects_unterminated_lists() {
    let ws = Workspace::new("tags = [\n  \"a\",\n").with_env("KEEP=1\n");

    let err = sync(&ws.tfvars, &ws.env, &SyncOptions::default().with_strict(true)).unwrap_err();

    assert!(matches!(err, SyncError::UnterminatedBracket { line: 1, .. }));
    assert_eq!(ws.env_contents(), "KEEP=1\n");
}

#[test]
fn lenient_mode_keeps_unterminated_fragment() {
    let ws = Workspace::new("tags = [\n  \"a\",\n");
    ws.sync(&SyncOptions::default());

    assert_eq!(ws.entries(), [r#"TAGS="[ \"a\"""#]);
}
