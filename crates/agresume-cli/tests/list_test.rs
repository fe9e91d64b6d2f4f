//! `--list` output, scoping, limits and provider configuration.

use agresume_testing::assertions::{assert_event_count, assert_newest_first, event_ids};
use agresume_testing::{TestProvider, TestWorld};
use anyhow::Result;

fn world_with_samples() -> Result<TestWorld> {
    let world = TestWorld::new().with_project("my-project").enter_dir("my-project");
    world.place_sample(TestProvider::Codex, "rollout-2025-03-01-a.jsonl")?;
    world.place_sample(TestProvider::Claude, "history.jsonl")?;
    world.place_sample(TestProvider::Gemini, "session-2025-03-01T09-30-a.json")?;
    world.place_sample_in(TestProvider::Codex, "rollout-2025-03-01-b.jsonl", "other-project")?;
    Ok(world)
}

#[test]
fn test_list_json_only_includes_current_project() -> Result<()> {
    let world = world_with_samples()?;

    let result = world.run(&["--list", "--format", "json"])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json()?;
    assert_event_count(&json, 3)?;
    assert_newest_first(&json)?;

    let ids = event_ids(&json)?;
    for provider in TestProvider::all() {
        assert!(
            ids.iter().any(|id| id.starts_with(&format!("{}-", provider.id()))),
            "missing {} event in {:?}",
            provider,
            ids
        );
    }
    Ok(())
}

#[test]
fn test_list_all_includes_other_projects() -> Result<()> {
    let world = world_with_samples()?;

    let json = world.run(&["--list", "--all", "--format", "json"])?.json()?;
    assert_event_count(&json, 4)?;
    assert_newest_first(&json)?;

    let codex_events = event_ids(&json)?
        .into_iter()
        .filter(|id| id.starts_with("codex-"))
        .count();
    assert_eq!(codex_events, 2);
    Ok(())
}

#[test]
fn test_list_event_fields() -> Result<()> {
    let world = TestWorld::new().with_project("my-project").enter_dir("my-project");
    let placed = world.place_sample(TestProvider::Codex, "rollout.jsonl")?;

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    let event = &json["latest"];
    assert_eq!(event["id"], format!("codex-{}", placed.session_id));
    assert_eq!(event["label"], "Codex");
    assert_eq!(event["source"], "rollout.jsonl");
    assert_eq!(event["confidence"], "high");
    assert_eq!(event["summary"], "Add a retry loop around the upload client");
    assert_eq!(event["resume"]["command"], "codex");
    assert_eq!(event["resume"]["args"][1], placed.session_id.as_str());
    Ok(())
}

#[test]
fn test_list_plain_prints_rows() -> Result<()> {
    let world = world_with_samples()?;

    let result = world.run(&["--list"])?;
    assert!(result.success());

    let lines: Vec<&str> = result.stdout().lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.matches(" │ ").count() >= 2));
    assert!(result.stdout().contains("Add a retry loop around the upload client"));
    assert!(result.stdout().contains("Claude Code"));
    Ok(())
}

#[test]
fn test_list_without_sessions() -> Result<()> {
    let world = TestWorld::new().with_project("empty").enter_dir("empty");

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_eq!(json, serde_json::json!({"events": [], "latest": null}));

    let plain = world.run(&["--list"])?;
    assert!(plain.success());
    assert!(plain.stdout().contains("No recent sessions found"));
    Ok(())
}

#[test]
fn test_limit_flag_caps_results() -> Result<()> {
    let world = world_with_samples()?;

    let full = world.run(&["--list", "--format", "json"])?.json()?;
    let limited = world.run(&["--list", "--limit", "1", "--format", "json"])?.json()?;

    assert_event_count(&limited, 1)?;
    assert_eq!(event_ids(&limited)?[0], event_ids(&full)?[0]);
    Ok(())
}

#[test]
fn test_config_limit_used_without_flag() -> Result<()> {
    let world = world_with_samples()?;
    world.write_config("[scan]\nlimit = 2\n")?;

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 2)?;

    let json = world.run(&["--list", "--limit", "3", "--format", "json"])?.json()?;
    assert_event_count(&json, 3)?;
    Ok(())
}

#[test]
fn test_disabled_provider_is_skipped() -> Result<()> {
    let world = world_with_samples()?;
    world.write_config("[providers.claude]\nenabled = false\n")?;

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 2)?;
    assert!(event_ids(&json)?.iter().all(|id| !id.starts_with("claude-")));
    Ok(())
}

#[test]
fn test_custom_log_root_from_config() -> Result<()> {
    let world = TestWorld::new().with_project("my-project").enter_dir("my-project");
    let placed = world.place_sample(TestProvider::Codex, "rollout.jsonl")?;

    let moved_root = world.temp_dir().join("archive").join("codex");
    std::fs::create_dir_all(&moved_root)?;
    std::fs::rename(&placed.path, moved_root.join("rollout.jsonl"))?;

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 0)?;

    world.write_config(&format!(
        "[providers.codex]\nlog_root = \"{}\"\n",
        moved_root.display()
    ))?;
    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 1)?;
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let world = TestWorld::new();
    world.write_config("[scan]\nlimit = \"lots\"\n")?;

    let result = world.run(&["--list"])?;
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().starts_with("Error:"));
    Ok(())
}

#[test]
fn test_project_root_flag_overrides_cwd() -> Result<()> {
    let mut world = TestWorld::new().with_project("my-project").enter_dir("my-project");
    world.place_sample(TestProvider::Claude, "history.jsonl")?;
    let project = world.cwd().to_path_buf();

    world.set_cwd("elsewhere");
    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 0)?;

    let root = project.to_string_lossy();
    let json = world
        .run(&["--list", "--format", "json", "--project-root", root.as_ref()])?
        .json()?;
    assert_event_count(&json, 1)?;
    Ok(())
}

#[test]
fn test_relative_project_root_scopes_every_provider() -> Result<()> {
    let mut world = TestWorld::new().with_project("app").enter_dir("app");
    world.place_sample(TestProvider::Codex, "rollout.jsonl")?;
    world.place_sample(TestProvider::Claude, "history.jsonl")?;
    world.place_sample(TestProvider::Gemini, "session-1.json")?;
    let app = world.cwd().to_path_buf();
    let root = world.temp_dir().to_path_buf();

    let json = world.run(&["--list", "--format", "json"])?.json()?;
    assert_event_count(&json, 3)?;

    let json = world
        .run_in_dir(&["--list", "--format", "json", "--project-root", "."], &app)?
        .json()?;
    assert_event_count(&json, 3)?;

    let json = world
        .run_in_dir(&["--list", "--format", "json", "--project-root", "app"], &root)?
        .json()?;
    assert_event_count(&json, 3)?;
    Ok(())
}
