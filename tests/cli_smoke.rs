use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn pm_help_works() {
    Command::cargo_bin("pm")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Project Manager"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "init",
        "add-user",
        "list-users",
        "show-user",
        "add-project",
        "list-projects",
        "show-project",
        "add-task",
        "list-tasks",
        "complete-task",
    ];

    for cmd in subcommands {
        Command::cargo_bin("pm")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    Command::cargo_bin("pm")
        .expect("binary")
        .args(["add-user", "--name", "Ian"])
        .assert()
        .failure()
        .stderr(contains("--email"));
}
