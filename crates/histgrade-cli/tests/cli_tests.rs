//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn histgrade() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("histgrade").unwrap()
}

fn histgrade_logins() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("histgrade-logins").unwrap()
}

const REQUIREMENTS: &str = r#"[
    {"slide": 1, "command": "ls"},
    {"slide": 2, "command": "pwd"},
    {"slide": 3, "command": "whoami"}
]"#;

/// A fake deployment: passwd file, home directories, requirements file, and a
/// config pointing at all of them.
struct Classroom {
    dir: TempDir,
    config_path: PathBuf,
    requirements_path: PathBuf,
}

impl Classroom {
    fn new(passwd: &str) -> Self {
        let dir = TempDir::new().unwrap();

        let passwd_path = dir.path().join("passwd");
        std::fs::write(&passwd_path, passwd).unwrap();

        let requirements_dir = dir.path().join("shared");
        std::fs::create_dir_all(&requirements_dir).unwrap();
        let requirements_path = requirements_dir.join("week1.json");
        std::fs::write(&requirements_path, REQUIREMENTS).unwrap();

        let config_path = dir.path().join("histgrade.toml");
        std::fs::write(
            &config_path,
            format!(
                "passwd_path = \"{}\"\nrequirements_dir = \"{}\"\n",
                passwd_path.display(),
                requirements_dir.display()
            ),
        )
        .unwrap();

        Self {
            dir,
            config_path,
            requirements_path,
        }
    }

    fn home(&self, student: &str) -> PathBuf {
        self.dir.path().join("home").join(student)
    }

    fn add_home(&self, student: &str) -> PathBuf {
        let home = self.home(student);
        std::fs::create_dir_all(&home).unwrap();
        home
    }

    fn write_history(&self, student: &str, lines: &str) {
        let home = self.add_home(student);
        std::fs::write(home.join(".bash_history"), lines).unwrap();
    }

    fn passwd_line(&self, student: &str, uid: u32) -> String {
        format!(
            "{student}:x:{uid}:{uid}::{}:/bin/bash\n",
            self.home(student).display()
        )
    }
}

#[test]
fn no_arguments_is_a_usage_error() {
    histgrade().assert().failure().code(2);
}

#[test]
fn missing_requirements_file_exits_2() {
    let classroom = Classroom::new("alice:x:1001:1001::/home/alice:/bin/bash\n");
    histgrade()
        .arg("/no/such/requirements.json")
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn malformed_requirements_exits_2() {
    let classroom = Classroom::new("alice:x:1001:1001::/home/alice:/bin/bash\n");
    let bad = classroom.dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    histgrade()
        .arg(&bad)
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn empty_requirements_exits_2() {
    let classroom = Classroom::new("alice:x:1001:1001::/home/alice:/bin/bash\n");
    let empty = classroom.dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();

    histgrade()
        .arg(&empty)
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn empty_roster_exits_1() {
    // Only out-of-range and excluded accounts.
    let classroom = Classroom::new(
        "root:x:0:0:root:/root:/bin/bash\nec2-user:x:1000:1000::/home/ec2-user:/bin/bash\n",
    );

    histgrade()
        .arg(&classroom.requirements_path)
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no student accounts"));
}

#[test]
fn grades_the_worked_example() {
    let mut passwd = String::new();
    let classroom = Classroom::new("");
    passwd.push_str(&classroom.passwd_line("alice", 1001));
    passwd.push_str(&classroom.passwd_line("bob", 1002));
    passwd.push_str(&classroom.passwd_line("carol", 1003));
    // dave has no home directory field
    passwd.push_str("dave:x:1004:1004:::/bin/bash\n");
    passwd.push_str(&classroom.passwd_line("erin", 1005));
    std::fs::write(classroom.dir.path().join("passwd"), &passwd).unwrap();

    classroom.write_history("alice", "ls\nwhoami\n");
    classroom.write_history("bob", "pwd\n");
    classroom.write_history("carol", "ls -l\npwd\nwhoami\n");
    classroom.add_home("erin"); // home exists, no history file

    histgrade()
        .arg("week1")
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("STUDENT"))
        .stdout(predicate::str::contains("SLIDE-FOR-MISSING-COMMAND"))
        // alice: 2/3, 17 points, missing pwd (slide 2)
        .stdout(predicate::str::contains("2/3"))
        .stdout(predicate::str::contains("17"))
        .stdout(predicate::str::contains("slide 2"))
        // bob: 1/3, 9 points (earliest matched takes the remainder bonus)
        .stdout(predicate::str::contains("1/3"))
        // carol: everything found
        .stdout(predicate::str::contains("3/3"))
        .stdout(predicate::str::contains("25"))
        .stdout(predicate::str::contains("(none)"))
        // degraded rows
        .stdout(predicate::str::contains("no home directory"))
        .stdout(predicate::str::contains("no history files"))
        // closing reminder after the table
        .stdout(predicate::str::contains("Reminder:"));
}

#[test]
fn json_output_carries_exact_scores() {
    let classroom = Classroom::new("");
    let passwd = classroom.passwd_line("alice", 1001) + &classroom.passwd_line("bob", 1002);
    std::fs::write(classroom.dir.path().join("passwd"), &passwd).unwrap();

    classroom.write_history("alice", "ls\nwhoami\n");
    classroom.write_history("bob", "pwd\n");

    let output = histgrade()
        .arg("week1")
        .arg("--config")
        .arg(&classroom.config_path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["student"], "alice");
    assert_eq!(rows[0]["points"], 17);
    assert_eq!(rows[0]["outcome"]["missing_slides"], serde_json::json!([2]));
    assert_eq!(rows[1]["student"], "bob");
    assert_eq!(rows[1]["points"], 9);
}

#[test]
fn fuzzy_matching_end_to_end() {
    let classroom = Classroom::new("");
    let passwd = classroom.passwd_line("frank", 1001);
    std::fs::write(classroom.dir.path().join("passwd"), &passwd).unwrap();

    // Extra whitespace still matches "uname -r"; lscpu must not satisfy "ls".
    let reqs = classroom.dir.path().join("reqs.json");
    std::fs::write(
        &reqs,
        r#"[{"slide": 4, "command": "uname -r"}, {"slide": 5, "command": "ls"}]"#,
    )
    .unwrap();
    classroom.write_history("frank", "#1700000000\nuname   -r\nlscpu\n");

    let output = histgrade()
        .arg(&reqs)
        .arg("--config")
        .arg(&classroom.config_path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(rows[0]["matched"], 1);
    assert_eq!(rows[0]["outcome"]["missing_slides"], serde_json::json!([5]));
}

#[test]
fn check_mode_reports_the_split_without_grading() {
    // No passwd needed: --check must not touch the roster.
    let dir = TempDir::new().unwrap();
    let reqs = dir.path().join("week1.json");
    std::fs::write(&reqs, REQUIREMENTS).unwrap();
    let config = dir.path().join("histgrade.toml");
    std::fs::write(&config, "passwd_path = \"/no/such/passwd\"\n").unwrap();

    histgrade()
        .arg(&reqs)
        .arg("--config")
        .arg(&config)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 requirements"))
        .stdout(predicate::str::contains("base 8 remainder 1 of 25 points"));
}

#[test]
fn help_output() {
    histgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade student shell histories"));
}

#[test]
fn version_output() {
    histgrade()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("histgrade"));
}

#[cfg(unix)]
fn write_fake_lastlog(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-lastlog");
    let script = r#"#!/bin/sh
# $1 is -u, $2 the account name
case "$2" in
  alice)
    echo 'Username         Port     From             Latest'
    echo 'alice            pts/0    10.0.0.5         Mon Sep  1 09:14:02 +0000 2025'
    ;;
  bob)
    echo 'Username         Port     From             Latest'
    echo 'bob                                        **Never logged in**'
    ;;
  *)
    ;;
esac
"#;
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn logins_classifies_yes_no_unknown() {
    let classroom = Classroom::new("");
    let passwd = classroom.passwd_line("alice", 1001)
        + &classroom.passwd_line("bob", 1002)
        + &classroom.passwd_line("carol", 1003);
    std::fs::write(classroom.dir.path().join("passwd"), &passwd).unwrap();

    let lastlog = write_fake_lastlog(classroom.dir.path());
    let config = classroom.dir.path().join("logins.toml");
    std::fs::write(
        &config,
        format!(
            "passwd_path = \"{}\"\nlastlog_command = \"{}\"\n",
            classroom.dir.path().join("passwd").display(),
            lastlog.display()
        ),
    )
    .unwrap();

    histgrade_logins()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("YES"))
        .stdout(predicate::str::contains("NO"))
        .stdout(predicate::str::contains("UNKNOWN"))
        .stdout(predicate::str::contains("pts/0"));
}

#[test]
fn logins_missing_tool_exits_2() {
    let classroom = Classroom::new("alice:x:1001:1001::/home/alice:/bin/bash\n");
    let config = classroom.dir.path().join("logins.toml");
    std::fs::write(
        &config,
        format!(
            "passwd_path = \"{}\"\nlastlog_command = \"/no/such/lastlog\"\n",
            classroom.dir.path().join("passwd").display()
        ),
    )
    .unwrap();

    histgrade_logins()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required tool not available"));
}

#[test]
fn logins_empty_roster_exits_1() {
    let classroom = Classroom::new("root:x:0:0:root:/root:/bin/bash\n");

    histgrade_logins()
        .arg("--config")
        .arg(&classroom.config_path)
        .assert()
        .failure()
        .code(1);
}
