use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn write_project(config_toml: &str) -> tempfile::TempDir {
    let tmp = tempdir().expect("tempdir");
    let project_dir = tmp.path().join(".wordgrep");
    fs::create_dir_all(&project_dir).expect("create .wordgrep directory");
    fs::write(project_dir.join("config.toml"), config_toml).expect("write config.toml");

    let docs = tmp.path().join("docs");
    fs::create_dir_all(&docs).expect("create docs");
    fs::write(docs.join("a.md"), "cat dog\ndog fish\n").expect("write a.md");
    fs::write(docs.join("b.txt"), "dog only\n").expect("write b.txt");

    tmp
}

#[test]
fn cli_uses_project_config_defaults_for_format_and_limit() {
    let tmp = write_project(
        r#"
[search]
format = "json"
limit = 1
"#,
    );

    let mut cmd = cargo_bin_cmd!("wordgrep");
    cmd.current_dir(tmp.path());
    cmd.args(["--dir", "docs"]);
    cmd.write_stdin("+dog fish\nquit\n");

    let assert = cmd.assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");

    let json_line = output
        .lines()
        .map(|line| line.trim_start_matches("> "))
        .find(|line| line.starts_with('{'))
        .expect("json result line");
    let value: Value = serde_json::from_str(json_line).expect("valid json output");

    assert_eq!(value["total_matches"], 3);
    assert_eq!(value["truncated"], true);
    assert_eq!(value["matches"][0]["text"], "dog fish");
}

#[test]
fn cli_project_config_globs_restrict_indexed_files() {
    let tmp = write_project(
        r#"
[index]
globs = ["*.md"]
"#,
    );

    let mut cmd = cargo_bin_cmd!("wordgrep");
    cmd.current_dir(tmp.path());
    cmd.args(["--dir", "docs"]);
    cmd.write_stdin("+dog\nquit\n");

    let assert = cmd.assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");

    assert!(output.contains("docs/a.md 1 \"cat dog\""));
    assert!(output.contains("docs/a.md 2 \"dog fish\""));
    assert!(
        !output.contains("b.txt"),
        "expected config globs to exclude b.txt, got:\n{output}"
    );
}
