//! End-to-end tests for the delve CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WORLD: &str = r#"{
  "meta": { "title": "Tiny Cave", "start": "cave", "ending_flag": "free" },
  "flags": ["lit", "free"],
  "items": {
    "torch": {
      "name": "Torch",
      "description": "A pine torch.",
      "aliases": ["torch"],
      "portable": true
    },
    "boulder": {
      "name": "Boulder",
      "description": "A boulder blocking the light.",
      "aliases": ["boulder", "rock"]
    }
  },
  "locations": {
    "cave": {
      "name": "Cave",
      "description": "A low cave.",
      "items": ["torch", "boulder"],
      "exits": {
        "out": {
          "to": "beach",
          "criteria": { "requires_flags": ["lit"] },
          "blocked_description": "It's too dark to find the way out."
        }
      }
    },
    "beach": { "name": "Beach", "description": "Waves and gulls." }
  },
  "interactions": [
    {
      "id": "light",
      "verb": "use",
      "item": "torch",
      "message": "The torch sputters alight.",
      "effect": { "set_flags": ["lit"] }
    },
    {
      "id": "push",
      "verb": "use",
      "item": "boulder",
      "message": "The boulder rolls aside. You are free.",
      "criteria": { "requires_flags": ["lit"] },
      "effect": { "set_flags": ["free"] }
    }
  ]
}"#;

fn world_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn delve() -> Command {
    Command::cargo_bin("delve").unwrap()
}

#[test]
fn check_valid_world() {
    let (_dir, path) = world_file(WORLD);
    delve()
        .args(["check", "--world"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("2 items, 2 locations, 2 interactions"));
}

#[test]
fn check_reports_every_problem() {
    let broken = WORLD
        .replace("\"to\": \"beach\"", "\"to\": \"nowhere\"")
        .replace("\"item\": \"boulder\"", "\"item\": \"pebble\"");
    let (_dir, path) = world_file(&broken);
    delve()
        .args(["check", "--world"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"))
        .stderr(predicate::str::contains("pebble"))
        .stderr(predicate::str::contains("2 problem(s)"));
}

#[test]
fn check_missing_file() {
    delve()
        .args(["check", "--world", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

#[test]
fn check_malformed_json() {
    let (_dir, path) = world_file("{ not json");
    delve()
        .args(["check", "--world"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn play_session_until_quit() {
    let (_dir, path) = world_file(WORLD);
    delve()
        .args(["play", "--world"])
        .arg(&path)
        .write_stdin("out\ntake torch\nuse torch\nout\nin\nfly\nquit\nlook\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tiny Cave"))
        .stdout(predicate::str::contains("A low cave."))
        .stdout(predicate::str::contains("It's too dark to find the way out."))
        .stdout(predicate::str::contains("You take the torch."))
        .stdout(predicate::str::contains("Waves and gulls."))
        .stdout(predicate::str::contains("You can't go in from here."))
        .stdout(predicate::str::contains("I don't understand \"fly\"."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_to_the_end() {
    let (_dir, path) = world_file(WORLD);
    delve()
        .args(["play", "--world"])
        .arg(&path)
        .write_stdin("use boulder\nuse torch\nuse boulder\nlook\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You can't do that yet."))
        .stdout(predicate::str::contains("The torch sputters alight."))
        .stdout(predicate::str::contains("The boulder rolls aside. You are free."))
        .stdout(predicate::str::contains("The End."));
}

#[test]
fn narration_toggle_without_narrator() {
    let (_dir, path) = world_file(WORLD);
    delve()
        .args(["play", "--world"])
        .arg(&path)
        .write_stdin("narrate off\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Narration is not available: no narrator is installed.",
        ));
}

#[test]
fn play_help_explains_narration_flag() {
    delve()
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-narration"))
        .stdout(predicate::str::contains("this binary ships without one"));
}

#[test]
fn verbose_look_lists_inventory() {
    let (_dir, path) = world_file(WORLD);
    delve()
        .args(["play", "--verbose", "--world"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory: nothing"));
}
