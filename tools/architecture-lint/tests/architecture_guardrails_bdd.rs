//! Behaviour tests for the architecture guardrails.

use std::fs;
use std::sync::Mutex;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const CRATE_NAME: &str = "roster";

#[derive(Debug, Default)]
struct LintWorld {
    sources: Vec<LintSource>,
    result: Option<Result<(), ArchitectureLintError>>,
}

#[fixture]
fn world() -> Mutex<LintWorld> {
    Mutex::new(LintWorld::default())
}

fn add_source(world: &Mutex<LintWorld>, file: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.push(LintSource::new(file, contents));
}

#[given("an inbound module that imports the outbound layer")]
fn inbound_imports_outbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/mod.rs",
        "use roster::outbound::cache::InMemoryCacheStore; fn run() { let _ = InMemoryCacheStore::new(); }",
    );
}

#[given("an inbound module that imports reqwest directly")]
fn inbound_imports_reqwest(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/mod.rs",
        "use reqwest::Client; fn run() { let _ = Client::new(); }",
    );
}

#[given("a domain module that imports the settings module")]
fn domain_imports_settings(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/loader/mod.rs",
        "use crate::settings::RosterSettings; fn load(_: &RosterSettings) {}",
    );
}

#[given("an outbound module that imports the inbound layer")]
fn outbound_imports_inbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "outbound/cache/slot_cache.rs",
        "use crate::inbound::cli::render_list; fn write() { let _ = render_list; }",
    );
}

#[given("valid domain, inbound, and outbound modules")]
fn valid_modules(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
}

#[given("valid modules mixed with multiple boundary violations")]
fn valid_modules_with_multiple_violations(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
    add_source(
        world,
        "inbound/cli/bad_cross_boundary.rs",
        "use crate::outbound::directory::HttpDirectorySource; fn run(_: HttpDirectorySource) {}",
    );
    add_source(
        world,
        "domain/bad.rs",
        "use slot_store::SlotStore; fn read(_: SlotStore) {}",
    );
}

fn add_valid_modules(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/user.rs",
        "pub struct User { pub name: String } impl User { pub fn named(v: &str) -> Self { Self { name: v.to_owned() } } }",
    );
    add_source(
        world,
        "inbound/cli/render.rs",
        "use crate::domain::user::User; fn summary(user: &User) -> String { user.name.clone() }",
    );
    add_source(
        world,
        "outbound/cache/codec.rs",
        "use crate::domain::user::User; pub fn encode(users: &[User]) -> serde_json::Result<String> { let _ = users; Ok(String::new()) }",
    );
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &Mutex<LintWorld>) {
    let sources = {
        let world = world.lock().expect("world lock");
        world.sources.clone()
    };

    let temp_dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf8 tempdir");
    let crate_dir = root.join(CRATE_NAME);
    let src_dir = crate_dir.join("src");
    for source in &sources {
        let path = src_dir.join(&source.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }

    let result = architecture_lint::lint_crate_sources(&crate_dir, CRATE_NAME);
    let mut world = world.lock().expect("world lock");
    world.result = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

fn assert_violation_in_file_contains(
    world: &Mutex<LintWorld>,
    expected_file: &str,
    expected_substring: &str,
) {
    let expected_file = Utf8Path::new(expected_file);
    let violations = violations(world);
    assert!(
        violations.iter().any(|violation| {
            violation.file == expected_file && violation.message.contains(expected_substring)
        }),
        "expected violation in '{expected_file}' containing '{expected_substring}', got: {violations:?}"
    );
}

fn violations(world: &Mutex<LintWorld>) -> Vec<Violation> {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    extract_violations(outcome).expect("expected violations")
}

#[then("the lint fails due to outbound access from inbound")]
fn lint_fails_due_to_outbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/mod.rs", "crate::outbound");
}

#[then("the lint fails due to transport crate usage")]
fn lint_fails_due_to_transport_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/cli/mod.rs", "external crate `reqwest`");
}

#[then("the lint fails due to settings access from the domain")]
fn lint_fails_due_to_settings_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "domain/loader/mod.rs", "crate::settings");
}

#[then("the lint fails due to inbound access from outbound")]
fn lint_fails_due_to_inbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "outbound/cache/slot_cache.rs", "crate::inbound");
}

#[then("the lint fails")]
fn lint_fails(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_err(), "expected failure, got: {outcome:?}");
}

#[then("all boundary violations are reported")]
fn all_boundary_violations_are_reported(world: &Mutex<LintWorld>) {
    let violations = violations(world);
    assert_eq!(violations.len(), 2, "got: {violations:?}");
    assert_violation_in_file_contains(
        world,
        "inbound/cli/bad_cross_boundary.rs",
        "crate::outbound",
    );
    assert_violation_in_file_contains(world, "domain/bad.rs", "external crate `slot_store`");
}

fn extract_violations(outcome: &Result<(), ArchitectureLintError>) -> Option<Vec<Violation>> {
    match outcome {
        Ok(()) => None,
        Err(ArchitectureLintError::Violations(violations)) => Some(violations.clone()),
        Err(other) => panic!("expected violations error, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Inbound commands must not reach the cache adapters"
)]
fn inbound_cannot_reach_outbound(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Inbound commands must not issue HTTP requests themselves"
)]
fn inbound_cannot_issue_http(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The domain must not read configuration"
)]
fn domain_cannot_read_settings(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Outbound adapters must not reach the commands"
)]
fn outbound_cannot_reach_inbound(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "A layered crate passes"
)]
fn layered_crate_passes(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported"
)]
fn every_violation_is_reported(world: Mutex<LintWorld>) {
    let _ = world;
}
