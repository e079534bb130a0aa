//! Integration tests for the numerus CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn numerus() -> Command {
    Command::cargo_bin("numerus").unwrap()
}

#[test]
fn test_generate_english_text() {
    let mut cmd = numerus();
    cmd.args(["generate", "--type", "cardinal", "--filter", "en"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("cardinal en\n"))
        .stdout(predicate::str::contains("one: i = 1 and v = 0 @integer 1\n"))
        .stdout(predicate::str::contains("other: @integer 0, 2~16, 100, 1000"));
}

#[test]
fn test_generate_ordinal_only() {
    let mut cmd = numerus();
    cmd.args(["generate", "-t", "ordinal", "--filter", "fr"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("ordinal fr\n"))
        .stdout(predicate::str::contains("one: n = 1 @integer 1\n"))
        .stdout(predicate::str::contains("@decimal").not())
        .stdout(predicate::str::contains("cardinal").not());
}

#[test]
fn test_json_output() {
    let mut cmd = numerus();
    cmd.args(["generate", "--filter", "br", "-f", "json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let families = value.as_array().unwrap();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0]["kind"], "cardinal");

    let many = families[0]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|category| category["keyword"] == "many")
        .unwrap();
    assert_eq!(many["integer"], "1000000, …");
    assert_eq!(many["integer_bounded"], false);
}

#[test]
fn test_markdown_output() {
    let mut cmd = numerus();
    cmd.args(["generate", "-t", "cardinal", "--filter", "ja", "-f", "markdown"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("## cardinal ja\n"))
        .stdout(predicate::str::contains("| Keyword | Rule | Integer | Decimal |"))
        .stdout(predicate::str::contains("*Total families: 1*"));
}

#[test]
fn test_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("samples.txt");

    let mut cmd = numerus();
    cmd.args(["generate", "--filter", "ru", "-o"])
        .arg(&output_path);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.starts_with("cardinal ru\n"));
    assert!(content.contains("few: "));
}

#[test]
fn test_config_file_sets_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("numerus.toml");
    fs::write(
        &config_path,
        "[output]\ndefault_format = \"json\"\npretty_json = false\n",
    )
    .unwrap();

    let mut cmd = numerus();
    cmd.args(["generate", "-t", "ordinal", "--filter", "de", "-c"])
        .arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"kind\":\"ordinal\""));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("numerus.toml");
    fs::write(&config_path, "[generation]\nsample_limit = 0\n").unwrap();

    let mut cmd = numerus();
    cmd.args(["generate", "--filter", "en", "-c"]).arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("sample_limit must be greater than 0"));
}

#[test]
fn test_filter_matches_part_of_locale() {
    let mut cmd = numerus();
    cmd.args(["generate", "-t", "cardinal", "--filter", "e"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("cardinal en, de, et\n"))
        .stdout(predicate::str::contains("\ncardinal es\n"))
        .stdout(predicate::str::contains("fi").not());
}

#[test]
fn test_filter_decides_exponent_probes() {
    numerus()
        .args(["generate", "-t", "cardinal", "--filter", "^it$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@integer 1000000, 1c6, 1c9"));

    // without the probes nothing reaches the decimal side of `many`
    numerus()
        .args([
            "generate", "-t", "cardinal", "--filter", "^ca$", "--warn-mismatches",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cardinal ca\n"))
        .stdout(predicate::str::contains("c6").not())
        .stderr(predicate::str::contains(
            "decimal computation from rule ≠ from items; keyword: many",
        ));
}

#[test]
fn test_filter_without_matches() {
    let mut cmd = numerus();
    cmd.args(["generate", "--filter", "xx"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No locales match filter: xx"));
}

#[test]
fn test_invalid_filter() {
    let mut cmd = numerus();
    cmd.args(["generate", "--filter", "("]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid locale filter"));
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = numerus()
        .args(["generate", "-t", "cardinal", "--filter", "en|fr|ar"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parallel = numerus()
        .args([
            "generate", "-t", "cardinal", "--filter", "en|fr|ar", "--parallel", "--threads", "2",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_list_families() {
    let mut cmd = numerus();
    cmd.args(["list", "families", "--type", "cardinal"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cardinal\tbr\tone, two, few, many, other"))
        .stdout(predicate::str::contains("ordinal").not());
}

#[test]
fn test_list_formats() {
    let mut cmd = numerus();
    cmd.args(["list", "formats"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_help_and_version() {
    numerus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
    numerus()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("numerus"));
}
