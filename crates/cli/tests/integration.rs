use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

const PROJECTS: &str = r#"{
  "projects": [
    { "id": "root", "name": "Root" },
    { "id": "team", "externalId": "Team", "parent": "root" },
    {
      "id": "app",
      "externalId": "App",
      "parent": "team",
      "buildTypes": [
        {
          "id": "C",
          "runners": [{ "runType": "gradle-runner", "parameters": { "ui.gradleRunner.additional.gradle.cmd.params": "--info" } }],
          "features": [{ "type": "gradle-init-scripts", "parameters": { "initScriptName": "common.gradle" } }]
        },
        {
          "id": "M",
          "runners": [{ "runType": "gradle-runner" }],
          "features": [{ "type": "gradle-init-scripts", "parameters": { "initScriptName": "missing.gradle" } }]
        }
      ]
    },
    { "id": "app_copy", "parent": "team" }
  ]
}"#;

fn setup(path: &Path) {
    std::fs::create_dir_all(path.join(".initscripts")).unwrap();
    std::fs::write(path.join(".initscripts/projects.json"), PROJECTS).unwrap();
}

fn script_file(path: &Path, project: &str, name: &str) -> std::path::PathBuf {
    path.join(".initscripts/data")
        .join(project)
        .join("gradleInitScripts")
        .join(name)
}

async fn run(args: &[&str]) -> anyhow::Result<()> {
    let mut all = vec!["initscripts".to_string()];
    all.extend(args.iter().map(|arg| arg.to_string()));
    initscripts_cli::main(&all).await
}

#[tokio::test]
#[serial]
async fn test_cli_upload_show_delete() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    setup(temp_path);
    std::fs::write(temp_path.join("common.gradle"), "println 'root'").unwrap();
    std::fs::write(temp_path.join("app.gradle"), "println 'app'").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let uploaded_root = run(&["upload", "root", "common.gradle"]).await;
    let uploaded_app = run(&["upload", "App", "app.gradle", "--name", "common.gradle"]).await;
    let listed = run(&["list", "app"]).await;
    let listed_json = run(&["list", "app", "--format", "json"]).await;
    let shown = run(&["show", "team", "common.gradle"]).await;
    let deleted = run(&["delete", "app", "common.gradle"]).await;
    let deleted_again = run(&["delete", "app", "common.gradle"]).await;
    let missing = run(&["show", "app", "other.gradle"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert!(uploaded_root.is_ok());
    assert!(uploaded_app.is_ok());
    assert!(listed.is_ok());
    assert!(listed_json.is_ok());
    assert!(shown.is_ok());
    assert!(deleted.is_ok());
    assert!(deleted_again.is_ok());
    assert_eq!(
        missing.unwrap_err().to_string(),
        "Init script 'other.gradle' not found"
    );
    assert_eq!(
        std::fs::read_to_string(script_file(temp_path, "root", "common.gradle")).unwrap(),
        "println 'root'"
    );
    assert!(!script_file(temp_path, "app", "common.gradle").exists());
}

#[tokio::test]
#[serial]
async fn test_cli_upload_unknown_project() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    setup(temp_path);
    std::fs::write(temp_path.join("init.gradle"), "content").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let result = run(&["upload", "unknown", "init.gradle"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert_eq!(result.unwrap_err().to_string(), "Project 'unknown' not found");
}

#[tokio::test]
#[serial]
async fn test_cli_reports() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    setup(temp_path);
    std::fs::write(temp_path.join("common.gradle"), "println 'root'").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let uploaded = run(&["upload", "root", "common.gradle"]).await;
    let health = run(&["health"]).await;
    let health_json = run(&["health", "--project", "team", "--severity", "warn", "--format", "json"]).await;
    let inspect = run(&["inspect", "root"]).await;
    let usage = run(&["usage", "root"]).await;
    let usage_script = run(&["usage", "root", "common.gradle", "--format", "json"]).await;
    let unknown = run(&["inspect", "nowhere"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert!(uploaded.is_ok());
    assert!(health.is_ok());
    assert!(health_json.is_ok());
    assert!(inspect.is_ok());
    assert!(usage.is_ok());
    assert!(usage_script.is_ok());
    assert!(unknown.is_err());
}

#[tokio::test]
#[serial]
async fn test_cli_copy() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    setup(temp_path);
    std::fs::write(temp_path.join("a.gradle"), "a").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let uploaded = run(&["upload", "app", "a.gradle"]).await;
    let copied = run(&["copy", "app", "app_copy"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert!(uploaded.is_ok());
    assert!(copied.is_ok());
    assert_eq!(
        std::fs::read_to_string(script_file(temp_path, "app_copy", "a.gradle")).unwrap(),
        "a"
    );
}

#[tokio::test]
#[serial]
async fn test_cli_prepare_writes_init_script() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    setup(temp_path);
    std::fs::write(temp_path.join("common.gradle"), "println 'root'").unwrap();
    let build_temp = temp_path.join("build-temp");
    std::fs::create_dir_all(&build_temp).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let uploaded = run(&["upload", "root", "common.gradle"]).await;
    let prepared = run(&["prepare", "C", "--temp-dir", "build-temp"]).await;
    let missing = run(&["prepare", "M", "--temp-dir", "build-temp"]).await;
    let unknown = run(&["prepare", "nothing"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert!(uploaded.is_ok());
    assert!(prepared.is_ok());
    assert_eq!(
        missing.unwrap_err().to_string(),
        "Runner is configured to use init script 'missing.gradle', but no content was found. Please check runner settings."
    );
    assert!(unknown.is_err());

    let files = std::fs::read_dir(&build_temp)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read_to_string(&files[0]).unwrap(), "println 'root'");
}

#[tokio::test]
#[serial]
async fn test_cli_config_without_project_tree() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_path).unwrap();

    let config = run(&["config"]).await;
    let list = run(&["list", "root"]).await;

    std::env::set_current_dir(&original_dir).unwrap();

    assert!(config.is_ok());
    assert!(list.unwrap_err().to_string().starts_with("Failed to read project tree"));
}
