use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn tickline() -> Command {
    Command::new(assert_cmd::cargo_bin!("tickline"))
}

#[test]
fn cli_renders_svg_to_stdout() {
    let out = tickline()
        .arg(fixture("basic.tick"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(out).expect("utf-8 svg");
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn cli_renders_svg_from_stdin_with_id() {
    let input = fs::read_to_string(fixture("slice.tick")).expect("read fixture");
    let out = tickline()
        .args(["render", "--id", "light", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(out).expect("utf-8 svg");
    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");
    assert_eq!(doc.root_element().attribute("id"), Some("light"));
    assert!(svg.contains("<marker id=\"light-arrow\""));
    assert!(svg.contains("#light .title {"));
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    tickline()
        .args([
            "render",
            "--format",
            "png",
            "--background",
            "white",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("simplified.tick").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_renders_png_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_fixture = tmp.path().join("basic.tick");
    fs::copy(fixture("basic.tick"), &tmp_fixture).expect("copy fixture");

    tickline()
        .args([
            "--format",
            "png",
            tmp_fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp_fixture.with_extension("png")).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn cli_dumps_json_models() {
    let out = tickline()
        .args(["process", fixture("macros.tick").to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert!(json["processed"]["ticks"].is_array());
    assert!(json["warnings"].as_array().expect("warnings").is_empty());

    let out = tickline()
        .args(["layout", "--pretty", fixture("basic.tick").to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(json["lifelines"][0]["name"], "Client");
}

#[test]
fn cli_reports_fatal_errors_with_line_numbers() {
    let out = tickline()
        .arg("-")
        .write_stdin("lifeline \"A\"\nT0 \"B\" 0\n")
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
}

#[test]
fn cli_strict_rejects_what_lenient_skips() {
    let text = "lifeline \"A\"\nnonsense here\nT0 \"A\" 0\n";
    tickline()
        .args(["parse", "-"])
        .write_stdin(text)
        .assert()
        .success();
    tickline()
        .args(["parse", "--strict", "-"])
        .write_stdin(text)
        .assert()
        .code(1);
}

#[test]
fn cli_usage_errors_exit_with_two() {
    tickline().args(["--format", "gif"]).assert().code(2);
    tickline().arg("--help").assert().code(2);
}

#[test]
fn cli_debug_dumps_each_model_once() {
    let out = tickline()
        .args(["process", "--debug", "-"])
        .write_stdin("lifeline \"A\"\nT0 \"A\" 0\nT2 \"A\" 0\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("--- parsed ---").count(), 1, "{stderr}");
    assert_eq!(stderr.matches("--- processed ---").count(), 1, "{stderr}");
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(json["processed"]["ticks"].as_array().map(Vec::len), Some(3));
}
