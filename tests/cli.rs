use assert_cmd::Command;
use predicates::prelude::*;

const VALID_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn yt_article() -> Command {
    let mut cmd = Command::cargo_bin("yt-article").unwrap();
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("OPENAI_MODEL");
    cmd
}

// Configuration failures must surface before any network call, so these
// runs are expected to fail fast even without connectivity.

#[test]
fn missing_api_key_fails_before_extraction() {
    yt_article()
        .arg(VALID_URL)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn missing_model_fails_before_extraction() {
    yt_article()
        .env("OPENAI_API_KEY", "sk-test")
        .arg(VALID_URL)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("OPENAI_MODEL"));
}

#[test]
fn unparseable_url_fails_in_raw_mode() {
    yt_article()
        .arg("--raw")
        .arg("definitely not a video url")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("video id"));
}

#[test]
fn help_describes_the_surface() {
    yt_article()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("URL"))
        .stdout(predicate::str::contains("--raw"))
        .stdout(predicate::str::contains("--format"));
}
