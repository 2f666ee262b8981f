//! Integration tests for the `skillpath` binary.
//!
//! Only paths that never reach the network are exercised: `init`, and
//! argument validation that fails before any provider call. Each test
//! points `XDG_CONFIG_HOME` at its own temporary directory.

use std::path::Path;
use std::process::{Command, Output};

fn skillpath(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skillpath"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("SERPER_API_KEY")
        .env_remove("SKILLPATH_MODEL")
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to run skillpath binary")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// -----------------------------------------------------------------------
// init
// -----------------------------------------------------------------------

#[test]
fn init_writes_config_file() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = skillpath(
        tmp.path(),
        &["init", "--gemini-key", "g-key", "--serper-key", "s-key"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let path = tmp.path().join("skillpath").join("config.toml");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("g-key"));
    assert!(contents.contains("s-key"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = tempfile::TempDir::new().unwrap();

    assert!(skillpath(tmp.path(), &["init"]).status.success());

    let out = skillpath(tmp.path(), &["init", "--gemini-key", "new"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("already exists"), "stderr: {}", stderr(&out));

    let out = skillpath(tmp.path(), &["init", "--gemini-key", "new", "--force"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let contents =
        std::fs::read_to_string(tmp.path().join("skillpath").join("config.toml")).unwrap();
    assert!(contents.contains("new"));
}

// -----------------------------------------------------------------------
// Argument validation
// -----------------------------------------------------------------------

#[test]
fn day_number_out_of_range_fails_fast() {
    let tmp = tempfile::TempDir::new().unwrap();

    for bad in ["0", "8", "-1"] {
        let out = skillpath(tmp.path(), &["day", "Rust", "Traits", bad]);
        assert!(!out.status.success(), "day {bad} should fail");
        assert!(
            stderr(&out).contains("out of range"),
            "day {bad} stderr: {}",
            stderr(&out)
        );
    }
}

#[test]
fn blank_topic_fails_fast() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = skillpath(tmp.path(), &["plan", "   "]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("topic must not be empty"),
        "stderr: {}",
        stderr(&out)
    );
}

#[test]
fn malformed_config_file_is_reported() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("skillpath");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[server]\nport = \"x\"\n").unwrap();

    let out = skillpath(tmp.path(), &["plan", "Rust"]);
    assert!(!out.status.success());
    assert!(
        stderr(&out).contains("failed to parse config file"),
        "stderr: {}",
        stderr(&out)
    );
}
