use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pseudopy"))
}

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn make_temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("pseudopy_cli_tests")
        .join(format!("{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

struct CommandResult {
    status_ok: bool,
    stdout: String,
    stderr: String,
}

fn run_cmd(args: &[&str], input: Option<&str>) -> CommandResult {
    let mut cmd = Command::new(bin_path());
    cmd.args(args)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to start pseudopy");
    if let (Some(text), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin.write_all(text.as_bytes()).expect("Failed to write stdin");
    }

    let output = child.wait_with_output().expect("Failed to wait for pseudopy");
    CommandResult {
        status_ok: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn translate_prints_to_stdout() {
    let path = demo("greet.pseudo");
    let result = run_cmd(&["translate", path.to_str().unwrap()], None);

    assert!(result.status_ok, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "def greet():\n    print(\"Hello\")\ngreet()\n");
}

#[test]
fn translate_writes_output_file() {
    let dir = make_temp_dir("translate_out");
    let out = dir.join("greet.py");
    let path = demo("greet.pseudo");

    let result = run_cmd(
        &["translate", path.to_str().unwrap(), "-o", out.to_str().unwrap()],
        None,
    );

    assert!(result.status_ok, "stderr: {}", result.stderr);
    assert!(result.stdout.is_empty());
    let written = fs::read_to_string(&out).expect("Output file missing");
    assert_eq!(written, "def greet():\n    print(\"Hello\")\ngreet()\n");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn translate_reports_errors() {
    let dir = make_temp_dir("translate_err");
    let path = dir.join("bad.pseudo");
    fs::write(&path, "if x > 1 then\n    print x\n").unwrap();

    let result = run_cmd(&["translate", path.to_str().unwrap()], None);

    assert!(!result.status_ok);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("expected 'end', found end of input"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_reported() {
    let result = run_cmd(&["translate", "/nonexistent/program.pseudo"], None);

    assert!(!result.status_ok);
    assert!(result.stderr.contains("Failed to read"));
}

#[test]
fn lex_lists_tokens() {
    let path = demo("greet.pseudo");
    let result = run_cmd(&["lex", path.to_str().unwrap()], None);

    assert!(result.status_ok, "stderr: {}", result.stderr);
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines[0], "'function'");
    assert_eq!(lines[1], "identifier 'greet'");
    assert_eq!(lines.last(), Some(&"end of input"));
}

#[test]
fn run_executes_generated_code() {
    if !python_available() {
        eprintln!("python3 not available, skipping");
        return;
    }

    let path = demo("countdown.pseudo");
    let result = run_cmd(&["run", path.to_str().unwrap()], None);

    assert!(result.status_ok, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "3\n2\nliftoff next\ndone\n");
}

#[test]
fn run_feeds_program_input() {
    if !python_available() {
        eprintln!("python3 not available, skipping");
        return;
    }

    let path = demo("echo_name.pseudo");
    let result = run_cmd(&["run", path.to_str().unwrap()], Some("Grace\n"));

    assert!(result.status_ok, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "What is your name?\nHi Grace\n");
}

#[test]
fn run_reports_runtime_errors() {
    if !python_available() {
        eprintln!("python3 not available, skipping");
        return;
    }

    let dir = make_temp_dir("run_err");
    let path = dir.join("undefined.pseudo");
    fs::write(&path, "print 1\nprint missing\n").unwrap();

    let result = run_cmd(&["run", path.to_str().unwrap()], None);

    assert!(!result.status_ok);
    assert_eq!(result.stdout, "1\n");
    assert!(result.stderr.contains("Runtime error"));
    assert!(result.stderr.contains("NameError"));

    fs::remove_dir_all(&dir).ok();
}
