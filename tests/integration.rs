//! Integration tests for the graviton engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_graviton");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start graviton");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// All-size-2 board with one 10-ship garrison per side in opposite corners.
const DUEL: &str = "0a/a2:10,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,b2:10";

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["frobnicate", "attack x", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn commands_after_quit_are_not_processed() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn eof_without_quit_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn seeded_newgame_is_reproducible() {
    let first = run_engine(&["newgame seed 17", "quit"]);
    let second = run_engine(&["newgame seed 17", "quit"]);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert!(first[0].starts_with("position 0a/a"));
}

#[test]
fn position_then_board_echoes_notation() {
    let position = format!("position {DUEL}");
    let lines = run_engine(&[&position, "board", "quit"]);
    assert_eq!(lines, vec![position]);
}

#[test]
fn go_returns_bestmove_after_info() {
    let position = format!("position {DUEL}");
    let lines = run_engine(&[&position, "go difficulty hard", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("info depth 3 nodes 202 cutoffs 26 score 312 "));
    assert_eq!(lines[1], "bestmove 0,0 1,1 1");
}

#[test]
fn setoption_difficulty_controls_go() {
    let position = format!("position {DUEL}");
    let lines = run_engine(&[
        &position,
        "setoption name Difficulty value medium",
        "go side b",
        "quit",
    ]);
    assert_eq!(lines.last().map(String::as_str), Some("bestmove 3,3 3,2 1"));
}

#[test]
fn invalid_option_is_reported() {
    let lines = run_engine(&["setoption name Difficulty value nightmare", "quit"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("invalid unknown difficulty 'nightmare'"));
}

#[test]
fn attack_and_endturn_session() {
    let position = format!("position {DUEL}");
    let lines = run_engine(&[
        &position,
        "attack 0 0 1 1 4",
        "attack 0 0 1 1 6",
        "endturn",
        "attack 0 0 1 0 1",
        "attack 3 3 2 2 2",
        "board",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "attacked 0,0 1,1 a captured 4",
            "invalid cannot send 6 ships from a planet holding 6; one must stay",
            "turn 1 side b",
            "invalid planet 0,0 is not owned by side b",
            "attacked 3,3 2,2 b captured 2",
            "position 1b/a2:6,n2,n2,n2/n2,a2:5,n2,n2/n2,n2,b2:2,n2/n2,n2,n2,b2:4",
        ]
    );
}

#[test]
fn game_reaches_turn_limit() {
    let position = "position 28a/a1:3,a1,a1,n1/n1,n1,n1,n1/n1,n1,n1,n1/n1,n1,b1,b1:3";
    let lines = run_engine(&[position, "endturn", "endturn", "endturn", "quit"]);
    assert_eq!(
        lines,
        vec!["turn 29 side b", "turn 30 side a", "gameover a", "turn 30 side a", "gameover a"]
    );
}

#[test]
fn analyze_reports_fuzzy_view() {
    let position = format!("position {DUEL}");
    let lines = run_engine(&[&position, "analyze 0 0 3 3", "quit"]);
    assert_eq!(
        lines,
        vec!["analysis 0,0 3,3 side a value 1.5 low 1.0000 medium 0.0000 high 0.0000 aggressiveness 0.2500 ships 0 distance 6.3640"]
    );
}

#[test]
fn oversized_garrisons_are_rejected_and_engine_keeps_running() {
    let lines = run_engine(&[
        "position 0a/a2:4294967295,a2:5,n2,n2/n2,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,b2:10",
        "attack 0 0 1 0 4294967294",
        "position 0a/a2:3000000000,a2:3000000000,n2,n2/n2,n2,n2,n2/n2,n2,n2,n2/n2,n2,n2,b2:10",
        "go difficulty easy",
        "isready",
        "quit",
    ]);
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("invalid bad position:"));
    assert_eq!(lines[1], "invalid no position set");
    assert!(lines[2].starts_with("invalid bad position:"));
    assert_eq!(lines[3], "invalid no position set");
    assert_eq!(lines[4], "readyok");
}
