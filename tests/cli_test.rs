//! Integration tests for the fedconf binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Workspace with a global `.env` and a `shell` project holding a caller config.
fn setup_workspace() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".env"),
        "VITE_MODE=development\nVITE_SHELL=localhost:3000\nVITE_AUTH=localhost:3001\n",
    )
    .unwrap();
    let project = temp.path().join("shell");
    fs::create_dir(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name": "shell", "dependencies": {"react": "^18.0.0"}}"#,
    )
    .unwrap();
    fs::write(
        project.join("fedconf.json"),
        r#"{"federation": {"name": "shell"}, "plugins": [{"name": "react"}]}"#,
    )
    .unwrap();
    (temp, project)
}

fn fedconf() -> Command {
    Command::new(cargo_bin("fedconf"))
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    fedconf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Module-federation"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    fedconf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_prints_config() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"module-federation\""))
        .stdout(predicate::str::contains("\"strictPort\": true"));
    assert!(project.join("src").join("environment.ts").exists());
    Ok(())
}

#[test]
fn cli_config_output_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    let output = fedconf()
        .arg("config")
        .arg("--no-generate")
        .arg("--project")
        .arg(&project)
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["server"]["port"], 3000);
    assert_eq!(json["plugins"][0]["name"], "module-federation");
    assert_eq!(json["plugins"][1]["name"], "react");
    assert_eq!(
        json["plugins"][0]["options"]["shared"]["react"]["requiredVersion"],
        "^18.0.0"
    );
    assert!(!project.join("src").exists());
    Ok(())
}

#[test]
fn cli_config_warns_on_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .args(["config", "--no-generate", "--no-color"])
        .current_dir(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("refers to this project itself"));
    Ok(())
}

#[test]
fn cli_config_without_caller_config_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fs::remove_file(project.join("fedconf.json"))?;
    fedconf()
        .arg("config")
        .current_dir(&project)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No caller configuration found"));
    Ok(())
}

#[test]
fn cli_missing_project_variable_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let project = temp.path().join("orphan");
    fs::create_dir(&project)?;
    fedconf()
        .arg("remotes")
        .current_dir(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("VITE_ORPHAN"));
    Ok(())
}

#[test]
fn cli_remotes() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .arg("remotes")
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:3001/remoteEntry.js"))
        .stdout(predicate::str::contains("\"mode\"").not());
    Ok(())
}

#[test]
fn cli_env_shows_scopes() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fs::write(project.join(".env.production"), "VITE_SHELL=shell.example.com:443\n")?;
    fedconf()
        .args(["env", "--mode", "production"])
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "VITE_SHELL=shell.example.com:443  # local",
        ))
        .stdout(predicate::str::contains("VITE_AUTH=localhost:3001  # global"));
    Ok(())
}

#[test]
fn cli_rejects_local_mode() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .args(["env", "--mode", "local"])
        .current_dir(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mode"));
    Ok(())
}

#[test]
fn cli_shared() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .arg("shared")
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"singleton\": true"));
    Ok(())
}

#[test]
fn cli_generate_writes_module() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, project) = setup_workspace();
    fedconf()
        .args(["generate", "--ext", "js", "--quiet"])
        .current_dir(&project)
        .assert()
        .success();
    let generated = fs::read_to_string(project.join("src").join("environment.js"))?;
    assert!(generated.starts_with("export default {"));
    assert!(generated.contains("\"VITE_SHELL\": \"localhost:3000\""));
    Ok(())
}

#[test]
fn cli_schema() -> Result<(), Box<dyn std::error::Error>> {
    fedconf()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"federation\""));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    fedconf()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fedconf"));
    Ok(())
}
