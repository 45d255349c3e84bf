//! File-level behavior of the workspace mutation operations: anchor
//! strictness, substitution leniency, and toggle idempotence against real
//! files on disk.

use kickoff::core::mutate::Anchor;
use kickoff::error::KickoffError;
use kickoff::test_support::TestApp;

#[test]
fn missing_anchor_is_fatal_and_leaves_the_file_untouched() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file("config/routes.rb", "Rails.application.routes.draw do\nend\n")
        .expect("seed");

    let err = ws
        .insert_after(
            "config/routes.rb",
            Anchor::Literal("namespace :admin do\n"),
            "    mount Thing => \"/thing\"\n",
        )
        .expect_err("anchor should be missing");
    let anchor_err = err
        .downcast_ref::<KickoffError>()
        .expect("typed error");
    assert!(matches!(
        anchor_err,
        KickoffError::AnchorNotFound { pattern } if pattern.contains("namespace :admin")
    ));
    assert_eq!(
        app.read("config/routes.rb"),
        "Rails.application.routes.draw do\nend\n"
    );
}

#[test]
fn replace_first_without_a_match_is_a_silent_noop() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file("config/webpacker.yml", "development:\n  hmr: false\n")
        .expect("seed");

    ws.replace_first("config/webpacker.yml", "no_such_key", "value")
        .expect("no match must not error");
    assert_eq!(
        app.read("config/webpacker.yml"),
        "development:\n  hmr: false\n"
    );
}

#[test]
fn replace_first_touches_only_the_first_match() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file(
        "config/webpacker.yml",
        "development:\n  host: localhost\ntest:\n  host: localhost\n",
    )
    .expect("seed");

    ws.replace_first("config/webpacker.yml", "localhost", "0.0.0.0")
        .expect("replace");
    assert_eq!(
        app.read("config/webpacker.yml"),
        "development:\n  host: 0.0.0.0\ntest:\n  host: localhost\n"
    );
}

#[test]
fn insert_before_lands_at_the_match_not_at_line_start() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file(
        "package.json",
        "{\n  \"private\": true,\n  \"dependencies\": {\n  }\n}\n",
    )
    .expect("seed");

    // The anchor spans the newline before the dependencies key, so the
    // payload ends up between the two entries without mangling either line.
    ws.insert_before(
        "package.json",
        Anchor::Literal("\n  \"dependencies\": {"),
        "\n  \"scripts\": {},",
    )
    .expect("insert");
    assert_eq!(
        app.read("package.json"),
        "{\n  \"private\": true,\n  \"scripts\": {},\n  \"dependencies\": {\n  }\n}\n"
    );
}

#[test]
fn comment_and_uncomment_are_idempotent_on_disk() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file(
        "config/puma.rb",
        "threads 5, 5\n# workers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n",
    )
    .expect("seed");

    ws.uncomment_lines("config/puma.rb", Anchor::Literal("workers ENV.fetch"))
        .expect("uncomment");
    ws.uncomment_lines("config/puma.rb", Anchor::Literal("workers ENV.fetch"))
        .expect("uncomment again");
    assert_eq!(
        app.read("config/puma.rb"),
        "threads 5, 5\nworkers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n"
    );

    ws.comment_lines("config/puma.rb", Anchor::Literal("threads"))
        .expect("comment");
    ws.comment_lines("config/puma.rb", Anchor::Literal("threads"))
        .expect("comment again");
    assert_eq!(
        app.read("config/puma.rb"),
        "# threads 5, 5\nworkers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n"
    );
}

#[test]
fn end_of_block_insertions_stack_above_the_closing_end() {
    let app = TestApp::empty().expect("app");
    let ws = app.workspace();
    ws.create_file(
        "config/environments/development.rb",
        "Rails.application.configure do\n  config.cache_classes = false\nend\n",
    )
    .expect("seed");

    let end_of_block = Anchor::Pattern("(?m)^end\n");
    ws.insert_before("config/environments/development.rb", end_of_block, "  first\n")
        .expect("insert");
    ws.insert_before(
        "config/environments/development.rb",
        Anchor::Pattern("(?m)^end\n"),
        "  second\n",
    )
    .expect("insert");
    assert_eq!(
        app.read("config/environments/development.rb"),
        "Rails.application.configure do\n  config.cache_classes = false\n  first\n  second\nend\n"
    );
}
