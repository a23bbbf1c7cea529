use acctree_index::{build_index, AccountSummaries, Relation};
use anyhow::Result;

#[test]
fn empty_page_builds_an_empty_index() -> Result<()> {
    let index = build_index(&AccountSummaries::from_json_str("{}")?);
    assert!(index.is_empty());
    assert!(index.reverse_index().is_empty());
    assert_eq!(index.stats().accounts, 0);
    Ok(())
}

#[test]
fn account_without_properties_is_still_indexed() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [ { "id": "1", "name": "Bare" }, { "id": "2", "webProperties": [] } ] }"#,
    )?;
    let index = build_index(&page);

    let resolver = index.resolver();
    assert_eq!(resolver.account("1").map(|a| a.name.as_str()), Some("Bare"));
    assert!(resolver.account("2").is_some_and(|a| a.properties().is_empty()));
    assert!(index.reverse_index().is_empty());
    Ok(())
}

#[test]
fn duplicate_account_ids_keep_the_last_record() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [
            { "id": "1", "name": "First", "webProperties": [
                { "id": "UA-1-1", "profiles": [ { "id": "10", "name": "old view" } ] }
            ] },
            { "id": "2", "name": "Other" },
            { "id": "1", "name": "Second", "webProperties": [
                { "id": "UA-1-2", "profiles": [ { "id": "20", "name": "new view" } ] }
            ] }
        ] }"#,
    )?;
    let index = build_index(&page);
    let resolver = index.resolver();

    assert_eq!(resolver.account("1").map(|a| a.name.as_str()), Some("Second"));
    assert_eq!(resolver.profile("20").map(|p| p.name.as_str()), Some("new view"));

    // Reverse entries from the replaced record still exist but lead nowhere.
    assert!(index
        .reverse_index()
        .contains(Relation::AccountOfProperty, "UA-1-1"));
    assert!(resolver.property("UA-1-1").is_none());
    assert!(resolver.profile("10").is_none());
    assert!(resolver.lineage("10").is_none());

    // The replacement keeps the first-seen position.
    let order: Vec<&str> = index.accounts().map(|a| a.id.as_str()).collect();
    assert_eq!(order, vec!["1", "2"]);
    assert_eq!(index.stats().duplicate_accounts, 1);
    assert_eq!(index.stats().accounts, 2);
    Ok(())
}

#[test]
fn every_kept_entity_has_one_entry_per_relation() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [
            { "id": "1", "webProperties": [
                { "id": "UA-1-1", "profiles": [ { "id": "11" }, { "id": "12" } ] },
                { "id": "UA-1-2" }
            ] },
            { "id": "2", "webProperties": [
                { "id": "UA-2-1", "profiles": [ { "id": "21" } ] }
            ] }
        ] }"#,
    )?;
    let index = build_index(&page);
    let reverse = index.reverse_index();

    assert_eq!(reverse.len_of(Relation::AccountOfProperty), 2);
    assert_eq!(reverse.len_of(Relation::AccountOfProfile), 3);
    assert_eq!(reverse.len_of(Relation::PropertyOfProfile), 3);

    assert_eq!(reverse.ancestor(Relation::AccountOfProfile, "21"), Some("2"));
    assert_eq!(reverse.ancestor(Relation::PropertyOfProfile, "12"), Some("UA-1-1"));
    assert_eq!(index.stats().skipped_properties, 1);
    Ok(())
}

#[test]
fn building_twice_gives_equal_indices() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [ { "id": "1", "webProperties": [
            { "id": "UA-1-1", "profiles": [ { "id": "11", "name": "v" } ] }
        ] } ] }"#,
    )?;
    assert_eq!(build_index(&page), build_index(&page));
    Ok(())
}

#[test]
fn tree_preserves_input_order_at_every_level() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [
            { "id": "b", "webProperties": [
                { "id": "UA-b-2", "profiles": [ { "id": "z" }, { "id": "y" } ] },
                { "id": "UA-b-1", "profiles": [ { "id": "x" } ] }
            ] },
            { "id": "a" }
        ] }"#,
    )?;
    let index = build_index(&page);

    let accounts: Vec<&str> = index.accounts().map(|a| a.id.as_str()).collect();
    assert_eq!(accounts, vec!["b", "a"]);

    let account = index.tree().account("b").expect("account b");
    let properties: Vec<&str> = account.properties().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(properties, vec!["UA-b-2", "UA-b-1"]);

    let profiles: Vec<&str> = account
        .property("UA-b-2")
        .expect("property UA-b-2")
        .profiles()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(profiles, vec!["z", "y"]);
    Ok(())
}

#[test]
fn entities_without_ids_are_dropped_individually() -> Result<()> {
    let page = AccountSummaries::from_json_str(
        r#"{ "items": [
            { "name": "No Id", "webProperties": [
                { "id": "UA-0-1", "profiles": [ { "id": "1" } ] }
            ] },
            { "id": "2", "name": "Kept", "webProperties": [
                { "name": "nameless property", "profiles": [ { "id": "20" } ] },
                { "id": "UA-2-1", "profiles": [ { "name": "no id" }, { "id": "21", "name": "v" } ] },
                { "id": "UA-2-2", "profiles": [ { "name": "no id either" } ] }
            ] }
        ] }"#,
    )?;
    let index = build_index(&page);
    let resolver = index.resolver();

    assert_eq!(resolver.account("2").map(|a| a.name.as_str()), Some("Kept"));
    assert_eq!(
        resolver.property_by_profile_id("21").map(|p| p.id.as_str()),
        Some("UA-2-1")
    );
    assert_eq!(resolver.property("UA-2-1").map(|p| p.profiles().len()), Some(1));

    // Children of the id-less account and property never reach the index.
    assert!(resolver.property("UA-0-1").is_none());
    assert!(resolver.profile("1").is_none());
    assert!(resolver.profile("20").is_none());

    // Every profile of UA-2-2 lacked an id, so it has none and is skipped.
    assert!(resolver.property("UA-2-2").is_none());

    let stats = index.stats();
    assert_eq!(stats.accounts, 1);
    assert_eq!(stats.missing_ids, 4);
    assert_eq!(stats.skipped_properties, 1);
    Ok(())
}
