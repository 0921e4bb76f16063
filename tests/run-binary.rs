use std::process::Command;

use assert_cmd::prelude::*;

fn run(args: &[&str]) -> (Option<i32>, String) {
    let output = Command::cargo_bin("sokoban-astar")
        .unwrap()
        .args(args)
        .output()
        .unwrap();
    (output.status.code(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn run_one_way() {
    let (code, stdout) = run(&["levels/custom/02-one-way.txt"]);
    assert_eq!(code, Some(0));
    assert!(stdout.starts_with("Solving levels/custom/02-one-way.txt...\n"));
    assert!(stdout.contains("States created total: 4\n"));
    assert!(stdout.ends_with("uuu\nMoves: 3\nPushes: 3\n"));
}

#[test]
fn run_long_way_exact() {
    let (code, stdout) = run(&["--exact-states", "--heuristic", "matching", "levels/custom/03-long-way.txt"]);
    assert_eq!(code, Some(0));
    assert!(stdout.ends_with("rrrrrddllll\nMoves: 11\nPushes: 3\n"));
}

#[test]
fn run_print_states() {
    let expected = r"Found solution:
#####
#@$.#
#####

#####
# @*#
#####

r
Moves: 1
Pushes: 1
";
    let (code, stdout) = run(&["--print-states", "levels/custom/01-simplest.txt"]);
    assert_eq!(code, Some(0));
    assert!(stdout.ends_with(expected));
}

#[test]
fn run_stats_table() {
    let (code, stdout) = run(&["--stats-table", "levels/custom/04-two-boxes.txt"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Depth"));
    assert!(stdout.contains("Deadlocks"));
    assert!(stdout.contains("Pushes: "));
}

#[test]
fn run_no_solution() {
    let (code, stdout) = run(&["levels/custom/no-solution.txt"]);
    assert_eq!(code, Some(2));
    assert!(stdout.ends_with("No solution\n"));
}

#[test]
fn run_node_limit() {
    let (code, stdout) = run(&["--max-nodes", "2", "levels/custom/05-four-boxes.txt"]);
    assert_eq!(code, Some(2));
    assert!(stdout.ends_with("Node limit reached\n"));
}

#[test]
fn run_missing_file() {
    Command::cargo_bin("sokoban-astar")
        .unwrap()
        .arg("levels/custom/does-not-exist.txt")
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn run_bad_args() {
    // clap prints the error to stderr
    Command::cargo_bin("sokoban-astar")
        .unwrap()
        .arg("--heuristic")
        .arg("fastest")
        .arg("levels/custom/01-simplest.txt")
        .assert()
        .failure()
        .stdout("");
}
