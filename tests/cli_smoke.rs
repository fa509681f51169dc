mod support;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

use support::DataDir;

fn artmark(data: &DataDir) -> Command {
    let mut cmd = Command::cargo_bin("artmark").expect("binary");
    cmd.env_remove("ARTMARK_DIR")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data.path());
    cmd
}

fn run_json(data: &DataDir, args: &[&str]) -> Value {
    let output = artmark(data)
        .arg("--json")
        .args(args)
        .output()
        .expect("run artmark");
    assert!(
        output.status.success(),
        "artmark {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn artmark_help_works() {
    Command::cargo_bin("artmark")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("follow-up tasks"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["init", "fav", "task", "artworks"] {
        Command::cargo_bin("artmark")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn commands_require_init() {
    let data = DataDir::new();
    artmark(&data)
        .args(["fav", "list"])
        .assert()
        .code(2)
        .stderr(contains("not initialized"))
        .stderr(contains("artmark init"));
}

#[test]
fn not_initialized_json_envelope() {
    let data = DataDir::new();
    let output = artmark(&data)
        .args(["--json", "task", "ls", "1"])
        .output()
        .expect("run artmark");
    assert_eq!(output.status.code(), Some(2));

    let body: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(body["schema_version"], "artmark.v1");
    assert_eq!(body["command"], "task ls");
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["kind"], "user_error");
}

#[test]
fn init_is_idempotent() {
    let data = DataDir::new();
    let first = run_json(&data, &["init"]);
    assert_eq!(first["data"]["created"], true);
    let second = run_json(&data, &["init"]);
    assert_eq!(second["data"]["created"], false);
    assert!(data.join(".artmark.toml").exists());
}

#[test]
fn favourite_toggle_round_trip() {
    let data = DataDir::new();
    run_json(&data, &["init"]);

    artmark(&data)
        .args(["fav", "toggle", "27992"])
        .assert()
        .success()
        .stdout(contains("27992 added"))
        .stderr(contains("added to favourites"));

    let listed = run_json(&data, &["fav", "list"]);
    assert_eq!(listed["data"]["artwork_ids"], serde_json::json!([27992]));

    let toggled = run_json(&data, &["fav", "toggle", "27992"]);
    assert_eq!(toggled["data"]["favourite"], false);

    let shown = run_json(&data, &["fav", "show", "27992"]);
    assert_eq!(shown["data"]["favourite"], false);
    assert_eq!(data.read_store()["favourites"], "");
}

#[test]
fn task_lifecycle() {
    let data = DataDir::new();
    run_json(&data, &["init"]);

    let added = run_json(
        &data,
        &["task", "add", "27992", "Sketch the hands", "--due", "2026-11-02 14:30"],
    );
    let task_id = added["data"]["task_id"].as_str().expect("task id").to_string();
    assert_eq!(added["data"]["tasks"][0]["dueDate"], "2026-11-02 14:30");
    assert_eq!(added["data"]["tasks"][0]["isCompleted"], false);

    let reminders = std::fs::read_to_string(data.join("reminders.json")).expect("reminders");
    assert!(reminders.contains(&task_id));

    run_json(&data, &["task", "add", "16568", "Compare palettes", "--due", "2026-11-03"]);
    let ids = run_json(&data, &["artworks", "--ids"]);
    assert_eq!(ids["data"]["ids"], "16568,27992");

    let done = run_json(&data, &["task", "done", "27992", task_id.as_str()]);
    assert_eq!(done["data"]["tasks"][0]["isCompleted"], true);
    assert_eq!(data.read_store()["completed"], task_id.as_str());

    let agenda = run_json(&data, &["artworks", "--open"]);
    assert_eq!(agenda["data"]["total"], 1);
    assert_eq!(agenda["data"]["artworks"][0]["artwork_id"], 16568);

    let removed = run_json(&data, &["task", "rm", "27992", task_id.as_str()]);
    assert_eq!(removed["data"]["tasks"], serde_json::json!([]));

    let store = data.read_store();
    assert!(store.get("27992").is_none());
    assert_eq!(store["completed"], "");

    let listed = run_json(&data, &["task", "ls", "27992"]);
    assert_eq!(listed["data"]["total"], 0);
}

#[test]
fn unknown_task_is_a_user_error() {
    let data = DataDir::new();
    run_json(&data, &["init"]);

    artmark(&data)
        .args(["task", "done", "5", "evt-404"])
        .assert()
        .code(2)
        .stderr(contains("not found"))
        .stderr(contains("artmark task ls 5"));
}

#[test]
fn bad_due_date_is_rejected() {
    let data = DataDir::new();
    run_json(&data, &["init"]);

    artmark(&data)
        .args(["task", "add", "5", "Look", "--due", "someday"])
        .assert()
        .code(2)
        .stderr(contains("unrecognized due date"));
}
