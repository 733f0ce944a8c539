mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::{TestProject, header};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_scenario_output() -> Result<()> {
    let project = TestProject::scenario()?;

    project
        .command()?
        .assert()
        .success()
        .stdout(predicate::str::contains("Conversion completed successfully!"))
        .stdout(predicate::str::contains("proj.txt"));

    let expected = format!(
        "\n********** BELOW IS THE FILE AND FOLDER STRUCTURE OF THE CODEBASE **********\n\n\
         proj\\\n    a.txt\n    sub\\\n        b.txt\n\
         \n{}\n\nhi\n\
         \n{}\n\nx\n",
        header("\\a.txt"),
        header("\\sub\\b.txt")
    );
    assert_eq!(project.output()?, expected);

    Ok(())
}

#[test]
fn test_excluded_folder_listed_but_not_dumped() -> Result<()> {
    let project = TestProject::scenario()?;

    project
        .command()?
        .args(["--exclude", "sub"])
        .assert()
        .success();

    let output = project.output()?;
    assert!(output.contains("    sub\\\n        b.txt\n"));
    assert!(!output.contains(&header("\\sub\\b.txt")));
    assert!(output.contains(&header("\\a.txt")));

    Ok(())
}

#[test]
fn test_exclude_accepts_both_separator_styles() -> Result<()> {
    let project = TestProject::new("proj")?;
    project.write("src/utils/helpers.rs", "fn help() {}")?;
    project.write("src/main.rs", "fn main() {}")?;

    project
        .command()?
        .args(["--exclude", "\\src\\utils\\"])
        .assert()
        .success();

    let output = project.output()?;
    assert!(output.contains(&header("\\src\\main.rs")));
    assert!(!output.contains("fn help()"));

    Ok(())
}

#[test]
fn test_prefix_sibling_not_excluded() -> Result<()> {
    let project = TestProject::new("proj")?;
    project.write("src/lib.rs", "pub mod a;")?;
    project.write("src-backup/lib.rs", "pub mod old;")?;

    project
        .command()?
        .args(["--exclude", "src"])
        .assert()
        .success();

    let output = project.output()?;
    assert!(output.contains("pub mod old;"));
    assert!(!output.contains("pub mod a;"));

    Ok(())
}

#[test]
fn test_missing_directory_fails() -> Result<()> {
    let project = TestProject::new("proj")?;
    let missing = project.path().join("does-not-exist");

    Command::cargo_bin("codetext")?
        .env_remove("CODETEXT_CONFIG")
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!project.path().join("does-not-exist.txt").exists());
    Ok(())
}

#[test]
fn test_malformed_exclude_fails_before_writing() -> Result<()> {
    let project = TestProject::scenario()?;
    let output_path = project.output_path()?;
    fs::write(&output_path, "previous run")?;

    project
        .command()?
        .args(["--exclude", "../outside"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid exclude path '../outside'"));

    // Previous output untouched
    assert_eq!(fs::read_to_string(&output_path)?, "previous run");
    Ok(())
}

#[test]
fn test_debug_traces_on_stdout() -> Result<()> {
    let project = TestProject::scenario()?;
    project.write(".git/HEAD", "ref: refs/heads/main")?;
    project.write("notes.md", "notes")?;

    project
        .command()?
        .args(["--exclude", "sub", "notes.md", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exclude Paths: [.git, sub, notes.md]"))
        .stdout(predicate::str::contains("Processing File: a.txt\n"))
        .stdout(predicate::str::contains("Processing File: notes.md [EXCLUDED]"))
        .stdout(predicate::str::contains("Processing Folder: sub [EXCLUDED]"))
        .stdout(predicate::str::contains("Processing Folder: .git").not())
        .stdout(predicate::str::contains("HEAD").not())
        .stderr(predicate::str::contains("wrote 1 sections, excluded 1 files and 1 directories"));

    Ok(())
}

#[test]
fn test_silent_without_debug() -> Result<()> {
    let project = TestProject::scenario()?;

    project
        .command()?
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing").not());

    Ok(())
}

#[test]
fn test_quiet_suppresses_banner() -> Result<()> {
    let project = TestProject::scenario()?;

    project
        .command()?
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.output_path()?.exists());
    Ok(())
}

#[test]
fn test_rerun_replaces_output() -> Result<()> {
    let project = TestProject::scenario()?;

    project.command()?.assert().success();
    let first = project.output()?;

    project.command()?.assert().success();
    assert_eq!(project.output()?, first);

    Ok(())
}

#[test]
fn test_config_file_exclusions() -> Result<()> {
    let project = TestProject::scenario()?;
    let config = project.path().join("codetext.toml");
    fs::write(
        &config,
        "[exclude]\npaths = [\"sub\"]\n\n[output]\nseparator = \"/\"\n",
    )?;

    project
        .command()?
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let output = project.output()?;
    assert!(output.contains("proj/\n"));
    assert!(output.contains(&header("/a.txt")));
    assert!(!output.contains(&header("/sub/b.txt")));

    Ok(())
}

#[test]
fn test_config_from_environment() -> Result<()> {
    let project = TestProject::scenario()?;
    let config = project.path().join("codetext.toml");
    fs::write(&config, "[exclude]\npaths = [\"a.txt\"]\n")?;

    project
        .command()?
        .env("CODETEXT_CONFIG", &config)
        .assert()
        .success();

    assert!(!project.output()?.contains(&header("\\a.txt")));
    Ok(())
}

#[test]
fn test_missing_config_fails() -> Result<()> {
    let project = TestProject::scenario()?;

    project
        .command()?
        .args(["--config", "/nonexistent/codetext.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));

    Ok(())
}

#[test]
fn test_invalid_utf8_does_not_abort() -> Result<()> {
    let project = TestProject::new("proj")?;
    project.write("image.bin", [0x89, b'P', b'N', b'G', 0xFF, 0x00, 0xFE])?;
    project.write("z.txt", "after")?;

    project.command()?.assert().success();

    let output = project.output()?;
    assert!(output.contains(&header("\\image.bin")));
    assert!(output.contains("after\n"));

    Ok(())
}

#[test]
fn test_completions() -> Result<()> {
    Command::cargo_bin("codetext")?
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codetext"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_abort() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::scenario()?;
    let locked = project.write("locked/inside.txt", "never read")?;
    let locked = locked.parent().unwrap().to_path_buf();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Root ignores permission bits
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let assert = project.command()?.assert();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    assert
        .success()
        .stderr(predicate::str::contains("Warning:"))
        .stderr(predicate::str::contains("2 traversal error(s)"))
        .stdout(predicate::str::contains("Conversion completed successfully!"));

    let output = project.output()?;
    assert!(output.contains(&header("\\sub\\b.txt")));
    assert!(!output.contains("never read"));
    Ok(())
}
