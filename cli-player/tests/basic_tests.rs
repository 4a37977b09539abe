use assert_cmd::prelude::*;
use predicates::prelude::predicate; // Add methods on commands
use std::io::Write;
use std::process::{Command, Stdio};

fn run_with_input(
    args: &[&str],
    input: &[u8],
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("squiffyplayer")?;

    cmd.args(args);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let mut stdin = child.stdin.take().unwrap();

    stdin.write_all(input)?;
    drop(stdin);

    Ok(child.wait_with_output()?)
}

#[test]
fn basic_story_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/hello.json"], b"1\n1\n")?;
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(output_str.starts_with("Hello\n\nHello\nGo northGo south\n\n"));
    assert!(output_str.contains("1: Go north\n2: Go south\n?> "));
    assert!(output_str.contains("\nCold wind.\n\n\n1: Go south\n?> "));
    assert!(output_str.ends_with("\nWarm sand.\n\n\n~ fin ~\n\n"));

    Ok(())
}

#[test]
fn no_choices_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/no_choices.json"], b"")?;
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(
        "\nShort\n\nNothing \nto\n choose.\nNot a link\n\n~ fin ~\n\n",
        output_str
    );

    Ok(())
}

#[test]
fn external_link_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["-n", "tests/data/cave.json"], b"1\n1\n1\n1\n2\n")?;
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(output_str.contains("<open: https://example.com/map>"));
    assert_eq!(2, output_str.matches("1: Look at the map\n2: Leave\n").count());
    assert!(output_str.ends_with("\nYou are out.\n\n\n~ fin ~\n\n"));

    Ok(())
}

#[test]
fn alert_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/alert.json"], b"1\n")?;
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(
        "\nDark.\n  ---------  \n |  Saved  | \n  ---------  \nOn\n\n1: On\n?> \nDone.\n\n\n~ fin ~\n\n",
        output_str
    );

    Ok(())
}

#[test]
fn unknown_destination_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/broken_link.json"], b"1\nquit\n")?;
    let stderr_str = String::from_utf8_lossy(&output.stderr);
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stderr_str.contains("<section 'missing' not found>"));
    assert_eq!(
        "NowhereNo destination\n\n1: Nowhere\n?> 1: Nowhere\n?> ",
        output_str
    );

    Ok(())
}

#[test]
fn unknown_destination_auto_play_test() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("squiffyplayer")?;

    cmd.args(["-a", "tests/data/broken_link.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("section 'missing' not found"));

    Ok(())
}

#[test]
fn quit_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/hello.json"], b"help\nquit\n")?;
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(output_str.contains("Commands:"));
    assert!(!output_str.contains("~ fin ~"));

    Ok(())
}

#[test]
fn option_out_of_range_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/hello.json"], b"5\nx\n2\n1\n")?;
    let stderr_str = String::from_utf8_lossy(&output.stderr);
    let output_str = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stderr_str.contains("<option out of range>"));
    assert!(stderr_str.contains("<unrecognized option or command>"));
    assert!(output_str.contains("\nWarm sand.\n\n\n1: Go north\n?> "));

    Ok(())
}

#[test]
fn input_closed_test() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_with_input(&["tests/data/hello.json"], b"")?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn auto_play_test() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("squiffyplayer")?;

    cmd.args(["-a", "tests/data/hello.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cold wind."))
        .stdout(predicate::str::contains("Warm sand."))
        .stdout(predicate::str::ends_with("~ fin ~\n\n"));

    Ok(())
}

#[test]
fn default_story_test() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("squiffyplayer")?;

    cmd.current_dir("tests/data");
    cmd.write_stdin("quit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Hello\n\nHello\n"));

    Ok(())
}

#[test]
fn story_not_found_test() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("squiffyplayer")?;

    cmd.arg("nonexistent.json");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unable to find story file at path"))
        .stderr(predicate::str::contains("nonexistent.json"));

    Ok(())
}

#[test]
fn invalid_story_test() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("squiffyplayer")?;

    cmd.arg("Cargo.toml");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not load story"));

    Ok(())
}
