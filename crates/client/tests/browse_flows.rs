//! Catalog browsing flows: taxonomy traversal, subject matching, fallbacks

mod support;

use noteshare_client::CatalogBrowser;
use noteshare_core::models::{FeaturedFilter, NoteFilters};
use std::sync::Arc;
use support::FakeApi;

#[tokio::test]
async fn traversal_narrows_level_by_level() {
    let api = Arc::new(FakeApi::new());
    let mut browser = CatalogBrowser::new(api.clone());
    browser.refresh_catalog().await;

    let streams = browser.select_university("IIT Delhi");
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].name, "Engineering");

    let classes = browser.select_stream("Engineering");
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "First Year");

    let subjects = browser.select_class("First Year");
    assert_eq!(subjects, ["Physics", "Chemistry"]);
}

#[tokio::test]
async fn reselecting_a_university_resets_deeper_levels() {
    let api = Arc::new(FakeApi::new());
    let mut browser = CatalogBrowser::new(api.clone());
    browser.refresh_catalog().await;

    browser.select_university("IIT Delhi");
    browser.select_stream("Engineering");
    browser.select_class("First Year");

    let streams = browser.select_university("Delhi University");
    assert!(streams.is_empty());
    assert_eq!(
        browser.selection().university.as_deref(),
        Some("Delhi University")
    );
    assert!(browser.selection().stream.is_none());
    assert!(browser.selection().class.is_none());
    assert!(browser.selection().subject.is_none());
}

#[tokio::test]
async fn unknown_catalog_nodes_degrade_to_empty() {
    let api = Arc::new(FakeApi::new());
    let mut browser = CatalogBrowser::new(api.clone());
    browser.refresh_catalog().await;

    assert!(browser.select_university("Nowhere Tech").is_empty());
    assert!(browser.select_stream("Law").is_empty());
    assert!(browser.select_class("Fifth Year").is_empty());
}

#[tokio::test]
async fn subject_matching_ignores_case_and_whitespace() {
    let api = Arc::new(FakeApi::new());
    api.seed_note("Physics", "IIT Delhi", 4);
    api.seed_note("  physics  ", "IIT Delhi", 9);
    api.seed_note("Chemistry", "IIT Delhi", 20);
    let mut browser = CatalogBrowser::new(api.clone());
    browser.refresh_catalog().await;
    browser.load_notes(&NoteFilters::default()).await;

    browser.select_university("IIT Delhi");
    let notes = browser.select_subject("PHYSICS ");

    // Both spelling variants match, ordered by download count
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].downloads, 9);
    assert_eq!(notes[1].downloads, 4);
}

#[tokio::test]
async fn subject_results_are_scoped_to_the_selected_university() {
    let api = Arc::new(FakeApi::new());
    api.seed_note("Physics", "IIT Delhi", 1);
    api.seed_note("Physics", "Delhi University", 7);
    let mut browser = CatalogBrowser::new(api.clone());
    browser.load_notes(&NoteFilters::default()).await;

    browser.select_university("IIT Delhi");
    let notes = browser.select_subject("Physics");

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].university, "IIT Delhi");
}

#[tokio::test]
async fn featured_notes_rank_by_downloads() {
    let api = Arc::new(FakeApi::new());
    api.seed_note("Physics", "IIT Delhi", 3);
    api.seed_note("Chemistry", "IIT Delhi", 11);
    api.seed_note("Maths", "Delhi University", 7);
    let browser = CatalogBrowser::new(api.clone());

    let featured = browser
        .featured_notes(FeaturedFilter::MostDownloaded, 2)
        .await;

    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0].downloads, 11);
    assert_eq!(featured[1].downloads, 7);
}

#[tokio::test]
async fn stats_are_available_per_university_and_platform_wide() {
    let api = Arc::new(FakeApi::new());
    api.seed_note("Physics", "IIT Delhi", 2);
    api.seed_note("Physics", "Delhi University", 5);
    let browser = CatalogBrowser::new(api.clone());

    let uni = browser.university_stats("IIT Delhi").await.unwrap();
    assert_eq!(uni.total_notes, 1);

    let platform = browser.platform_stats().await.unwrap();
    assert_eq!(platform.total_notes, 2);
    assert_eq!(platform.total_downloads, 7);
}
