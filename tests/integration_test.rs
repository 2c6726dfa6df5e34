use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(deck: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slide-deck"))
        .arg("--deck")
        .arg(deck)
        .args(args)
        .env_remove("DECK_PATH")
        .env_remove("DECK_NAME")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn read_deck(path: &Path) -> serde_json::Value {
    let json = fs::read_to_string(path).expect("Failed to read deck file");
    serde_json::from_str(&json).expect("Deck file is not valid JSON")
}

#[test]
fn test_init_sample_and_list() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");

    let output = run_command(&deck_path, &["init", "--sample", "--name", "Demo"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(deck_path.exists(), "Deck file was not created");

    let deck = read_deck(&deck_path);
    assert_eq!(deck["name"], "Demo");
    assert_eq!(deck["slides"].as_array().map(|s| s.len()), Some(8));
    assert_eq!(deck["theme"]["primaryColor"], "24 95% 53%");

    let output = run_command(&deck_path, &["list"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let listing = stdout(&output);
    assert!(listing.contains("Demo (8 slides)"), "Unexpected listing: {}", listing);
    assert!(listing.contains("[title  ]"));
    assert!(listing.contains("Thank You!"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");

    assert!(run_command(&deck_path, &["init"]).status.success());
    let output = run_command(&deck_path, &["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));

    let output = run_command(&deck_path, &["init", "--force", "--sample"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
}

#[test]
fn test_editing_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init", "--sample"]).status.success());

    let output = run_command(&deck_path, &["add", "quote"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let deck = read_deck(&deck_path);
    let slides = deck["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 9);
    let added = slides
        .iter()
        .find(|s| s["type"] == "quote" && s["title"] == "New Slide")
        .expect("added slide is stored");
    assert_eq!(added["order"], 8);
    let id = added["id"].as_str().unwrap().to_string();

    let output = run_command(
        &deck_path,
        &["update", &id, "--quote", "Less is more", "--author", "Mies"],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = run_command(&deck_path, &["duplicate", &id]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let deck = read_deck(&deck_path);
    let copy = deck["slides"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["title"] == "New Slide (copy)")
        .expect("copy is stored");
    assert_eq!(copy["quote"], "Less is more");
    assert_eq!(copy["author"], "Mies");

    let output = run_command(&deck_path, &["delete", &id]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(read_deck(&deck_path)["slides"].as_array().unwrap().len(), 9);
}

#[test]
fn test_update_and_delete_unknown_slide_fail() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init", "--sample"]).status.success());

    let output = run_command(&deck_path, &["update", "ghost", "--title", "x"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Slide not found"));

    let output = run_command(&deck_path, &["delete", "ghost"]);
    assert!(!output.status.success());
}

#[test]
fn test_last_slide_cannot_be_deleted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init"]).status.success());

    let deck = read_deck(&deck_path);
    let id = deck["slides"][0]["id"].as_str().unwrap().to_string();

    let output = run_command(&deck_path, &["delete", &id]);
    assert!(!output.status.success());
    assert_eq!(read_deck(&deck_path)["slides"].as_array().unwrap().len(), 1);
}

#[test]
fn test_move_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init", "--sample"]).status.success());

    let output = run_command(&deck_path, &["move", "1", "3"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = run_command(&deck_path, &["show", "3"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("Slide Presentation Template"));

    let output = run_command(&deck_path, &["move", "1", "9"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("out of range"));
}

#[test]
fn test_show_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init", "--sample"]).status.success());

    let output = run_command(&deck_path, &["show", "3"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let text = stdout(&output);
    assert!(text.contains("Slide 3/8 [Code]"), "Unexpected output: {}", text);
    assert!(text.contains("prev: /slides/2"));
    assert!(text.contains("next: /slides/4"));

    let output = run_command(&deck_path, &["show", "8"]);
    assert!(!stdout(&output).contains("next:"));

    for position in ["0", "9", "x", "+3"] {
        let output = run_command(&deck_path, &["show", position]);
        assert!(!output.status.success(), "position {} resolved", position);
        assert!(stderr(&output).contains("Slide not found"));
    }
}

#[test]
fn test_theme_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let deck_path = temp_dir.path().join("deck.json");
    assert!(run_command(&deck_path, &["init"]).status.success());

    let output = run_command(
        &deck_path,
        &["theme", "--hex", "#0000ff", "--body-font", "Lora, serif"],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("--presentation-primary: 240 100% 50%;"));

    let deck = read_deck(&deck_path);
    assert_eq!(deck["theme"]["primaryColor"], "240 100% 50%");
    assert_eq!(deck["theme"]["bodyFont"], "Lora, serif");
    assert_eq!(deck["theme"]["headingFont"], "Inter, sans-serif");

    let output = run_command(&deck_path, &["theme", "--hex", "nothex"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid color"));

    let output = run_command(&deck_path, &["theme"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Cyan"));
}

#[test]
fn test_import_and_export_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    let markdown_path = temp_path.join("talk.md");
    let markdown_content =
        "% Imported Talk\n\n# Hello\n\nWelcome\n\n# Code\n\n```rust\nfn main() {}\n```\n";
    fs::write(&markdown_path, markdown_content).expect("Failed to write markdown file");

    let deck_path = temp_path.join("talk.json");
    let output = run_command(&deck_path, &["import", "-i", markdown_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let deck = read_deck(&deck_path);
    assert_eq!(deck["name"], "Imported Talk");
    assert_eq!(deck["slides"][1]["type"], "code");
    assert_eq!(deck["slides"][1]["language"], "rust");

    let outline_path = temp_path.join("out").join("talk.md");
    let output = run_command(&deck_path, &["export", "-o", outline_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let outline = fs::read_to_string(&outline_path).expect("Failed to read outline");
    assert!(outline.starts_with("% Imported Talk\n"));
    assert!(outline.contains("# Hello\n<!-- type: title -->\n\nWelcome\n"));
    assert!(outline.contains("```rust\nfn main() {}\n```"));
}

#[test]
fn test_missing_deck_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_command(&temp_dir.path().join("missing.json"), &["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to open deck file"));
}
