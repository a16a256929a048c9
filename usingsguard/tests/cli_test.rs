//! Tests for the `usingsguard` binary.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_exit_codes() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("Usings.cs"), "global using System;\n")?;
    fs::write(temp.path().join("Program.cs"), "class Program { }\n")?;

    Command::cargo_bin("usingsguard")?
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("all using directives are in place"));

    fs::write(
        temp.path().join("Service.cs"),
        "using System.Linq;\nclass Service { }\n",
    )?;
    Command::cargo_bin("usingsguard")?
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Service.cs:1:1: warning USINGS001"));

    Ok(())
}

#[test]
fn test_cli_fix_apply_merges() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("Usings.cs"), "global using System;\n")?;
    fs::write(
        temp.path().join("Program.cs"),
        "using System;\nusing System.Linq;\n\nclass Program { }\n",
    )?;

    Command::cargo_bin("usingsguard")?
        .arg(temp.path())
        .arg("--fix")
        .arg("--apply")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("Usings.cs"))?,
        "global using System;\nglobal using System.Linq;\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("Program.cs"))?,
        "\nclass Program { }\n"
    );
    Ok(())
}

#[test]
fn test_cli_apply_without_fix_is_rejected() -> Result<()> {
    Command::cargo_bin("usingsguard")?
        .arg("--apply")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--fix"));
    Ok(())
}

#[test]
fn test_cli_verbose_logs_to_stderr() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("Program.cs"), "class Program { }\n")?;

    Command::cargo_bin("usingsguard")?
        .arg(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("debug:"))
        .stderr(predicate::str::contains("found 1 source files"));
    Ok(())
}
