mod support;

use predicates::str::contains;
use serde_json::Value;

use support::DataDir;

fn seeded() -> DataDir {
    let data = DataDir::new();
    data.add_user("Ian", "ian@email.com");
    data.add_project("Ian", "Testing CLI", "2025-08-09");
    data
}

#[test]
fn add_task_defaults_to_incomplete() -> Result<(), Box<dyn std::error::Error>> {
    let data = seeded();

    data.cmd()
        .args([
            "add-task",
            "--project-id",
            "1",
            "--title",
            "Write tests",
            "--assigned-to",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("Task added: ID: 1, Title: Write tests (Incomplete), Assigned to: 1"));

    let tasks = data.read_json("tasks.json")?;
    assert_eq!(tasks[0]["project_id"], Value::from(1));
    assert_eq!(tasks[0]["status"], Value::from("Incomplete"));
    assert_eq!(tasks[0]["assigned_to"], Value::from("1"));
    Ok(())
}

#[test]
fn add_task_unknown_project() {
    let data = seeded();

    data.cmd()
        .args([
            "add-task",
            "--project-id",
            "999",
            "--title",
            "Nowhere",
            "--assigned-to",
            "1",
        ])
        .assert()
        .code(3)
        .stderr(contains("Project ID '999' could not be found"));

    assert!(!data.file("tasks.json").exists());
}

#[test]
fn add_task_rejects_unknown_status() {
    let data = seeded();

    data.cmd()
        .args([
            "add-task",
            "--project-id",
            "1",
            "--title",
            "Bad",
            "--assigned-to",
            "1",
            "--status",
            "Started",
        ])
        .assert()
        .code(2)
        .stderr(contains("Invalid status"));
}

#[test]
fn complete_task_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let data = seeded();
    let task = data.add_task(1, "Write tests", "1");
    let task = task.to_string();

    for _ in 0..2 {
        data.cmd()
            .args(["complete-task", "--task-id", &task])
            .assert()
            .success()
            .stdout(contains("Task has been marked complete"));
    }

    let tasks = data.read_json("tasks.json")?;
    assert_eq!(tasks.as_array().map(Vec::len), Some(1));
    assert_eq!(tasks[0]["status"], Value::from("Complete"));
    Ok(())
}

#[test]
fn complete_unknown_task() {
    let data = seeded();

    data.cmd()
        .args(["complete-task", "--task-id", "7", "--json"])
        .assert()
        .code(3)
        .stdout(contains("\"status\": \"error\""))
        .stdout(contains("\"kind\": \"reference\""));
}

#[test]
fn list_tasks_filters() {
    let data = seeded();
    data.add_user("Ann", "ann@email.com");
    data.add_project("Ann", "Other", "2025-09-01");
    data.add_task(1, "First", "1");
    data.add_task(2, "Second", "2");
    data.add_task(1, "Third", "1");
    data.cmd()
        .args(["complete-task", "--task-id", "3"])
        .assert()
        .success();

    let all = data.json_data(&["list-tasks"]);
    assert_eq!(all["total"].as_u64(), Some(3));

    let project_one = data.json_data(&["list-tasks", "--project-id", "1"]);
    assert_eq!(project_one["total"].as_u64(), Some(2));

    let done = data.json_data(&["list-tasks", "--status", "Complete"]);
    assert_eq!(done["total"].as_u64(), Some(1));
    assert_eq!(done["tasks"][0]["title"], Value::from("Third"));

    let open_in_one = data.json_data(&["list-tasks", "--project-id", "1", "--status", "Incomplete"]);
    assert_eq!(open_in_one["total"].as_u64(), Some(1));
}

#[test]
fn list_tasks_empty_is_silent_success() {
    let data = DataDir::new();

    data.cmd()
        .arg("list-tasks")
        .assert()
        .success()
        .stdout(contains("Tasks (0)"));
}
