use assert_cmd::Command;
use std::fs;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="r" style="fill:red;stroke-width:2px;x-foo:1.23456em"/></svg>"#;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("svgstyle-cli"))
}

fn rect_attrs(svg: &str) -> Vec<(String, String)> {
    let doc = roxmltree::Document::parse(svg).expect("output is well-formed");
    let rect = doc
        .descendants()
        .find(|n| n.has_tag_name("rect"))
        .expect("rect element");
    rect.attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn cli_reads_stdin_and_writes_stdout() {
    let out = cli().write_stdin(SVG).assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(
        rect_attrs(&text),
        pairs(&[
            ("id", "r"),
            ("style", "x-foo:1.235em"),
            ("fill", "red"),
            ("stroke-width", "2px"),
        ])
    );
}

#[test]
fn cli_writes_to_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("in.svg");
    let output = tmp.path().join("out.svg");
    fs::write(&input, SVG).expect("write input");

    cli()
        .args([
            "--out",
            output.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success()
        .stdout("");

    let text = fs::read_to_string(&output).expect("read output");
    assert!(text.contains(r#"fill="red""#), "unexpected output: {text}");
}

#[test]
fn cli_precision_and_exclude_flags() {
    let out = cli()
        .args(["--precision", "1", "--exclude", "stroke-width", "-"])
        .write_stdin(SVG)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(
        rect_attrs(&text),
        pairs(&[("id", "r"), ("style", "x-foo:1.2em"), ("fill", "red")])
    );
}

#[test]
fn cli_reads_options_from_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("options.json");
    fs::write(&config, r#"{"precision": 2, "excluded": ["fill"]}"#).expect("write config");

    let out = cli()
        .args(["--config", config.to_string_lossy().as_ref()])
        .write_stdin(SVG)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(
        rect_attrs(&text),
        pairs(&[
            ("id", "r"),
            ("style", "x-foo:1.23em"),
            ("stroke-width", "2px"),
        ])
    );
}

#[test]
fn cli_prints_stats_to_stderr() {
    let assert = cli().arg("--stats").write_stdin(SVG).assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf-8 stderr");
    let line = stderr
        .lines()
        .find(|l| l.starts_with('{'))
        .expect("stats line");
    let stats: serde_json::Value = serde_json::from_str(line).expect("stats json");
    assert_eq!(stats["elements"], 2);
    assert_eq!(stats["rewritten"], 1);
    assert_eq!(stats["promoted"], 2);
}

#[test]
fn cli_rejects_malformed_svg() {
    cli().write_stdin("<svg><g></svg>").assert().failure().code(1);
}

#[test]
fn cli_rejects_bad_arguments() {
    cli().arg("--precision").assert().failure().code(2);
    cli().arg("--no-such-flag").assert().failure().code(2);
    cli()
        .args(["--precision", "0"])
        .write_stdin(SVG)
        .assert()
        .failure()
        .code(1);
}
