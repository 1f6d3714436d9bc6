use crate::solver::RunOutcome;

/// Build identification only.
pub fn print_report(name: &str) {
    println!("{{");
    println!("  \"name\": \"{}\",", name);
    println!("  \"git_describe\": \"{}\",", env!("GIT_DESCRIBE"));
    println!("  \"git_hash\": \"{}\"", env!("GIT_HASH"));
    println!("}}");
}

/// Build identification plus what the root measured.
pub fn run_report(name: &str, outcome: &RunOutcome) -> String {
    format!(
        r#"{{
  "name": "{}",
  "git_describe": "{}",
  "git_hash": "{}",
  "ranks": {},
  "orientation": "{}",
  "pace": "{}",
  "elapsed": {}
}}"#,
        name,
        env!("GIT_DESCRIBE"),
        env!("GIT_HASH"),
        outcome.ranks,
        outcome.orientation,
        outcome.pace,
        outcome.elapsed.as_secs_f64()
    )
}
