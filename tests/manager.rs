mod common;

use anyhow::Result;
use common::MockDirectory;
use std::sync::Arc;
use votedesk::{GroupRegistry, VoteItem, VoteManager};

const ADDRESS: &str = "16010222169256538112L";

fn registry() -> GroupRegistry {
    GroupRegistry::builder()
        .group("gdt", ["x", "y"])
        .group("elite", ["y", "z"])
        .build()
}

fn manager_with_ballot(ballot: Vec<&str>) -> (VoteManager, Arc<MockDirectory>) {
    let dir = Arc::new(
        MockDirectory::new(["a", "b", "c", "d", "e", "x", "y", "z"])
            .with_ballot(ADDRESS, ballot),
    );
    (VoteManager::new(registry(), dir.clone()), dir)
}

#[tokio::test]
async fn test_load_mutate_and_batch() -> Result<()> {
    let (mut mgr, _dir) = manager_with_ballot(vec!["a", "b", "c"]);

    assert!(mgr.load_ballot_for_address(ADDRESS).await?);
    assert_eq!(mgr.selection().baseline(), &["a", "b", "c"]);
    assert!(mgr.batches().is_empty());

    mgr.toggle_delegate("a"); // drop a
    mgr.toggle_delegate("d");
    mgr.toggle_delegate("e");

    let diff = mgr.diff();
    assert_eq!(diff.to_unvote, vec!["a"]);
    assert_eq!(diff.to_vote, vec!["d", "e"]);

    let batches = mgr.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0].items,
        vec![
            VoteItem::unvote("a"),
            VoteItem::vote("d"),
            VoteItem::vote("e")
        ]
    );
    assert_eq!(batches[0].summary(), "-1, +2");
    Ok(())
}

#[tokio::test]
async fn test_unknown_address_leaves_session_untouched() -> Result<()> {
    let (mut mgr, _dir) = manager_with_ballot(vec!["a"]);
    mgr.toggle_delegate("b");

    assert!(!mgr.load_ballot_for_address("unknown").await?);
    assert!(mgr.selection().baseline().is_empty());
    assert_eq!(mgr.selection().current(), &["b"]);
    Ok(())
}

#[tokio::test]
async fn test_restore_and_clear() -> Result<()> {
    let (mut mgr, _dir) = manager_with_ballot(vec!["a", "b"]);
    mgr.load_ballot_for_address(ADDRESS).await?;

    mgr.clear_all();
    assert!(mgr.selection().is_empty());
    assert_eq!(mgr.batches().len(), 1);
    assert_eq!(mgr.batches()[0].summary(), "-2");

    mgr.restore();
    assert_eq!(mgr.selection().current(), &["a", "b"]);
    assert!(mgr.batches().is_empty());
    Ok(())
}

#[test]
fn test_import_normalizes_and_export_round_trips() {
    let dir = Arc::new(MockDirectory::new(["a"]));
    let mut mgr = VoteManager::new(registry(), dir);

    mgr.import_votes(" b , a,b ,, c ");
    assert_eq!(mgr.selection().current(), &["b", "a", "c"]);
    assert_eq!(mgr.export_votes(), "b,a,c");

    let exported = mgr.export_votes();
    mgr.import_votes(&exported);
    assert_eq!(mgr.selection().current(), &["b", "a", "c"]);
}

#[test]
fn test_select_optimized_activates_exactly_that_group() {
    let dir = Arc::new(MockDirectory::new(["a"]));
    let mut mgr = VoteManager::new(registry(), dir);

    mgr.select_optimized("gdt");
    assert_eq!(mgr.selection().current(), &["x", "y"]);
    assert!(mgr.active_presets().contains("gdt"));
    assert!(!mgr.active_presets().contains("elite"));
}

#[test]
fn test_preset_toggle_protection_through_manager() {
    let dir = Arc::new(MockDirectory::new(["a"]));
    let mut mgr = VoteManager::new(registry(), dir);

    mgr.toggle_preset("gdt");
    mgr.toggle_preset("elite");
    assert_eq!(mgr.selection().current(), &["x", "y", "z"]);

    // y is still required by elite, so deactivating gdt keeps it
    mgr.toggle_preset("gdt");
    assert_eq!(mgr.selection().current(), &["y", "z"]);
    assert!(mgr.active_presets().contains("elite"));
    assert!(!mgr.active_presets().contains("gdt"));
}

#[tokio::test]
async fn test_select_and_deselect_page() -> Result<()> {
    let (mut mgr, dir) = manager_with_ballot(vec![]);

    mgr.select_page(1).await?;
    assert_eq!(mgr.selection().len(), 8);
    assert!(mgr.is_selected("a") && mgr.is_selected("z"));

    mgr.deselect_page(1).await?;
    assert!(mgr.selection().is_empty());
    // both calls hit the same cached page
    assert_eq!(dir.fetch_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_show_group_returns_directory_entries() -> Result<()> {
    let (mgr, _dir) = manager_with_ballot(vec![]);

    let found = mgr.show_group("elite").await?;
    let names: Vec<&str> = found.iter().map(|dg| dg.username.as_str()).collect();
    assert_eq!(names, vec!["y", "z"]);

    let none = mgr.show_group("no-such-group").await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_by_prefix_passthrough() -> Result<()> {
    let dir = Arc::new(MockDirectory::new(["alpha", "alps", "beta"]));
    let mgr = VoteManager::new(registry(), dir);

    let found = mgr.search_by_prefix("al").await?;
    assert_eq!(found.len(), 2);
    Ok(())
}

#[test]
fn test_vote_limit_check() {
    let dir = Arc::new(MockDirectory::new(["a"]));
    let mut mgr = VoteManager::new(registry(), dir);
    assert!(mgr.is_within_vote_limit());

    let many: Vec<String> = (0..102).map(|i| format!("delegate_{}", i)).collect();
    mgr.import_votes(&many.join(","));
    assert!(!mgr.is_within_vote_limit());
    // the engine still produces batches past the limit; enforcement is
    // the host's call
    assert!(!mgr.batches().is_empty());
}
