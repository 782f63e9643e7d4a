use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use clap::Parser;
use clap_complete::Shell;
use pretty_assertions::assert_eq;
use shoplist_core::config::UnregisteredCategoryPolicy;
use shoplist_core::{CategorySet, Item, ShareError, ShareSheet, ShoppingListStore};

use crate::commands::common::{format_category_lines, format_item_lines, EMPTY_LIST_TEXT};
use crate::commands::completions::run_completions;
use crate::config::{CliConfig, ShareTarget};
use crate::error::CliError;
use crate::session::{
    parse_reminder, resolve_item_ref, split_session_line, ExportFormat, Flow, Session,
    SessionCommand, SessionLine,
};
use crate::share::FileShareSheet;

#[derive(Default)]
struct RecordingSheet {
    shared: Mutex<Vec<String>>,
}

impl ShareSheet for RecordingSheet {
    async fn share(&self, message: &str) -> Result<(), ShareError> {
        self.shared.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

struct BrokenSheet;

impl ShareSheet for BrokenSheet {
    async fn share(&self, _message: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable("dismissed by platform".to_string()))
    }
}

async fn run_lines<S: ShareSheet>(session: &mut Session<S>, lines: &[&str]) -> String {
    let mut out = Vec::new();
    for line in lines {
        session.execute(line, &mut out).await.unwrap();
    }
    String::from_utf8(out).unwrap()
}

fn quiet_session() -> Session<RecordingSheet> {
    Session::new(ShoppingListStore::new(), RecordingSheet::default(), false)
}

#[test]
fn session_line_parses_multi_word_names() {
    let parsed = SessionLine::try_parse_from(["add", "Organic", "milk"]).unwrap();
    assert_eq!(
        parsed.command,
        SessionCommand::Add {
            name: vec!["Organic".to_string(), "milk".to_string()]
        }
    );
}

#[test]
fn session_line_parses_export_format() {
    let parsed = SessionLine::try_parse_from(["export", "--format", "markdown"]).unwrap();
    assert_eq!(
        parsed.command,
        SessionCommand::Export {
            format: ExportFormat::Markdown,
            output: None
        }
    );
}

#[test]
fn parse_reminder_accepts_plain_dates() {
    let parsed = parse_reminder("2026-11-05").unwrap();
    assert_eq!(
        parsed,
        Some(Utc.with_ymd_and_hms(2026, 11, 5, 0, 0, 0).unwrap())
    );
}

#[test]
fn parse_reminder_accepts_rfc3339() {
    let parsed = parse_reminder("2026-11-05T18:30:00+02:00").unwrap();
    assert_eq!(
        parsed,
        Some(Utc.with_ymd_and_hms(2026, 11, 5, 16, 30, 0).unwrap())
    );
}

#[test]
fn parse_reminder_cancel_means_no_change() {
    assert_eq!(parse_reminder("cancel").unwrap(), None);
    assert_eq!(parse_reminder("CANCEL").unwrap(), None);
}

#[test]
fn parse_reminder_rejects_garbage() {
    let error = parse_reminder("next tuesday").unwrap_err();
    assert!(matches!(error, CliError::InvalidDate(_)));
    assert!(error.is_user_notice());
}

#[test]
fn resolve_item_ref_by_position_id_and_prefix() {
    let mut store = ShoppingListStore::new();
    store.set_draft_name("Milk");
    let milk = store.add_item().unwrap();
    store.set_draft_name("Bread");
    let bread = store.add_item().unwrap();

    assert_eq!(resolve_item_ref(&store, "1"), Some(milk));
    assert_eq!(resolve_item_ref(&store, "2"), Some(bread));
    assert_eq!(resolve_item_ref(&store, "0"), None);
    assert_eq!(resolve_item_ref(&store, "3"), None);
    assert_eq!(resolve_item_ref(&store, &bread.to_string()), Some(bread));

    let full = milk.to_string();
    let distinct_prefix = &full[..full.len() - 1];
    assert_eq!(resolve_item_ref(&store, distinct_prefix), Some(milk));
    assert_eq!(resolve_item_ref(&store, "zzz"), None);
}

#[test]
fn resolve_item_ref_treats_digits_as_positions() {
    let mut store = ShoppingListStore::new();
    store.set_draft_name("Milk");
    let milk = store.add_item().unwrap();

    assert_eq!(resolve_item_ref(&store, "01"), Some(milk));
    assert_eq!(resolve_item_ref(&store, "0190"), None);
}

#[test]
fn split_session_line_keeps_free_text_verbatim() {
    assert_eq!(
        split_session_line("name  Peanut  butter "),
        vec!["name".to_string(), "Peanut  butter".to_string()]
    );
    assert_eq!(split_session_line("add"), vec!["add".to_string()]);
    assert_eq!(
        split_session_line("export  --format   json"),
        vec!["export".to_string(), "--format".to_string(), "json".to_string()]
    );
}

#[test]
fn format_item_lines_shows_completion_and_category() {
    let reminder = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let mut milk = Item::new("Milk", "Dairy", reminder);
    milk.completed = true;
    let bread = Item::new("Bread", "General", reminder);

    assert_eq!(
        format_item_lines(&[milk, bread]),
        vec![
            " 1. [x] Milk  Category: Dairy  Reminder: 2026-10-19".to_string(),
            " 2. [ ] Bread  Category: General  Reminder: 2026-10-19".to_string(),
        ]
    );
}

#[test]
fn format_item_lines_empty_list() {
    assert_eq!(format_item_lines(&[]), vec![EMPTY_LIST_TEXT.to_string()]);
}

#[test]
fn format_category_lines_marks_selection() {
    let lines = format_category_lines(&CategorySet::default(), "Dairy");
    assert_eq!(
        lines,
        vec!["  General", "  Vegetables", "* Dairy", "  Electronics"]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn session_runs_milk_scenario() {
    let mut session = quiet_session();

    let output = run_lines(
        &mut session,
        &["new", "name Milk", "select Dairy", "add", "toggle 1"],
    )
    .await;

    let items = session.store().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Milk");
    assert_eq!(items[0].category, "Dairy");
    assert!(items[0].completed);
    assert!(output.contains(&items[0].id.to_string()));
    assert!(!session.store().is_compose_open());

    run_lines(&mut session, &["share"]).await;
    assert_eq!(
        *session_sheet_messages(&session),
        vec!["Shopping List:\nMilk (Dairy)".to_string()]
    );

    run_lines(&mut session, &["remove 1"]).await;
    assert!(session.store().is_empty());
}

fn session_sheet_messages(session: &Session<RecordingSheet>) -> Vec<String> {
    session.sheet().shared.lock().unwrap().clone()
}

#[tokio::test(flavor = "current_thread")]
async fn session_reports_validation_errors_and_continues() {
    let mut session = quiet_session();

    let output = run_lines(&mut session, &["add   ", "add-category Dairy", "add-category"]).await;

    assert!(output.contains("Error: Please enter an item name."));
    assert!(output.contains("Error: Please enter a unique category."));
    assert!(session.store().is_empty());
    assert_eq!(session.store().categories(), &CategorySet::default());
}

#[tokio::test(flavor = "current_thread")]
async fn session_add_category_uses_draft_text() {
    let mut session = quiet_session();

    let output = run_lines(&mut session, &["category Frozen Food", "add-category", "add Peas"]).await;

    assert!(output.contains("Category: Frozen Food"));
    assert!(session.store().categories().contains("Frozen Food"));
    assert_eq!(session.store().items()[0].category, "Frozen Food");
}

#[tokio::test(flavor = "current_thread")]
async fn session_ignores_unknown_item_refs() {
    let mut session = quiet_session();
    run_lines(&mut session, &["add Milk"]).await;
    let before = session.store().items().to_vec();

    let output = run_lines(&mut session, &["toggle 7", "remove nonsense"]).await;

    assert!(output.is_empty());
    assert_eq!(session.store().items(), before.as_slice());
}

#[tokio::test(flavor = "current_thread")]
async fn session_renders_after_item_changes() {
    let mut session = Session::new(ShoppingListStore::new(), RecordingSheet::default(), true);

    let output = run_lines(&mut session, &["name Kale", "select Vegetables"]).await;
    assert!(output.is_empty());

    let output = run_lines(&mut session, &["add"]).await;
    assert!(output.contains("[ ] Kale  Category: Vegetables"));

    let output = run_lines(&mut session, &["remove 1"]).await;
    assert!(output.contains(EMPTY_LIST_TEXT));
}

#[tokio::test(flavor = "current_thread")]
async fn session_share_failure_is_a_notice() {
    let mut session = Session::new(ShoppingListStore::new(), BrokenSheet, false);
    run_lines(&mut session, &["add Milk"]).await;

    let output = run_lines(&mut session, &["share"]).await;

    assert!(output.contains("Error: Failed to share the list"));
    assert_eq!(session.store().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn session_reminder_flow() {
    let mut session = quiet_session();

    let output = run_lines(
        &mut session,
        &["remind 2026-12-24", "remind cancel", "remind someday", "add Lights"],
    )
    .await;

    assert!(output.contains("Invalid reminder date 'someday'"));
    assert_eq!(
        session.store().items()[0].reminder,
        Utc.with_ymd_and_hms(2026, 12, 24, 0, 0, 0).unwrap()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn session_unknown_command_prints_usage() {
    let mut session = quiet_session();
    let output = run_lines(&mut session, &["buy eggs"]).await;
    assert!(output.to_lowercase().contains("error"));
    assert!(session.store().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn session_quit_and_comments() {
    let mut session = quiet_session();
    let mut out = Vec::new();

    assert_eq!(
        session.execute("# a comment", &mut out).await.unwrap(),
        Flow::Continue
    );
    assert_eq!(session.execute("", &mut out).await.unwrap(), Flow::Continue);
    assert_eq!(session.execute("quit", &mut out).await.unwrap(), Flow::Quit);
    assert_eq!(session.execute("exit", &mut out).await.unwrap(), Flow::Quit);
}

#[tokio::test(flavor = "current_thread")]
async fn session_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.md");
    let mut session = quiet_session();
    run_lines(&mut session, &["add Milk", "toggle 1"]).await;

    let command = format!("export --format markdown --output {}", path.display());
    let output = run_lines(&mut session, &[command.as_str()]).await;

    assert!(output.contains(&path.display().to_string()));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "# Shopping List\n\n- [x] Milk (General)\n"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn session_name_keeps_internal_spacing() {
    let mut session = quiet_session();

    run_lines(&mut session, &["name Peanut  butter", "add"]).await;
    run_lines(&mut session, &["add Ice   cream"]).await;

    let names = session
        .store()
        .items()
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Peanut  butter", "Ice   cream"]);
}

#[tokio::test(flavor = "current_thread")]
async fn session_export_failure_is_a_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("list.txt");
    let mut session = quiet_session();
    run_lines(&mut session, &["add Milk"]).await;

    let command = format!("export --output {}", path.display());
    let mut out = Vec::new();
    let flow = session.execute(&command, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert!(output.starts_with("Error: Failed to export the list to"));
    assert!(!path.exists());
    assert_eq!(session.store().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn session_export_to_directory_uses_suggested_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = quiet_session();
    run_lines(&mut session, &["add Milk"]).await;

    let command = format!("export --format json --output {}", dir.path().display());
    run_lines(&mut session, &[command.as_str()]).await;

    let written = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("shopping-list-"));
    assert!(written[0].ends_with(".json"));
}

#[tokio::test(flavor = "current_thread")]
async fn session_list_json_round_trips_items() {
    let mut session = quiet_session();
    run_lines(&mut session, &["add Milk"]).await;

    let output = run_lines(&mut session, &["list --json"]).await;
    let parsed: Vec<shoplist_core::export::ExportItem> = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].name, "Milk");
    assert!(!parsed[0].completed);
}

#[tokio::test(flavor = "current_thread")]
async fn file_share_sheet_writes_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared").join("list.txt");
    let sheet = FileShareSheet::new(&path);

    let mut store = ShoppingListStore::new();
    store.set_draft_name("Milk");
    store.select_category("Dairy").unwrap();
    store.add_item().unwrap();
    store.share_list(&sheet).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Shopping List:\nMilk (Dairy)"
    );
}

#[test]
fn config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = CliConfig::load_from_path(&dir.path().join("missing.json")).unwrap();
    assert_eq!(config, CliConfig::default());
    assert!(config.render_after_change);
}

#[test]
fn config_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let mut config = CliConfig::default();
    config.store.unregistered_category = UnregisteredCategoryPolicy::Register;
    config.share.target = ShareTarget::File;
    config.share.path = Some(dir.path().join("out.txt"));

    config.save_to_path(&path).unwrap();

    assert_eq!(CliConfig::load_from_path(&path).unwrap(), config);
}

#[test]
fn config_file_share_requires_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "share": { "target": "file" } }"#).unwrap();

    let error = CliConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(error, CliError::Config(message) if message.contains("share.path")));
}

#[test]
fn config_rejects_duplicate_seed_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "store": { "categories": ["Dairy", "Dairy"] } }"#,
    )
    .unwrap();

    assert!(matches!(
        CliConfig::load_from_path(&path),
        Err(CliError::Config(_))
    ));
}

#[test]
fn run_completions_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplist.bash");

    run_completions(Shell::Bash, Some(&path)).unwrap();

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("shoplist"));
}

#[test]
fn run_completions_into_directory_uses_shell_file_name() {
    let dir = tempfile::tempdir().unwrap();

    run_completions(Shell::Fish, Some(dir.path())).unwrap();

    let script = std::fs::read_to_string(dir.path().join("shoplist.fish")).unwrap();
    assert!(script.contains("complete -c shoplist"));
}

#[test]
fn cli_parses_global_config_flag() {
    let cli = crate::cli::Cli::try_parse_from(["shoplist", "--config", "/tmp/x.json", "session"])
        .unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/x.json"))
    );
    assert!(matches!(
        cli.command,
        Some(crate::cli::Commands::Session { script: None })
    ));
}
