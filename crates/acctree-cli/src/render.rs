//! Text and JSON rendering of resolver results.

use std::fmt::Write as _;

use acctree_index::{Account, HierarchyIndex, Lineage, Profile, Property, Resolver};
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyReport<'a> {
    account_id: &'a str,
    account_name: &'a str,
    property: &'a Property,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileReport<'a> {
    account_id: &'a str,
    property_id: &'a str,
    profile: &'a Profile,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport<'a> {
    source: &'a acctree_index::SourceInfo,
    stats: acctree_index::IndexStats,
    reverse_entries: usize,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn stats(index: &HierarchyIndex, format: OutputFormat) -> Result<String> {
    let stats = index.stats();
    match format {
        OutputFormat::Json => to_json(&StatsReport {
            source: index.source(),
            stats,
            reverse_entries: index.reverse_index().len(),
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(username) = &index.source().username {
                writeln!(out, "username:            {username}")?;
            }
            writeln!(out, "accounts:            {}", stats.accounts)?;
            writeln!(out, "properties:          {}", stats.properties)?;
            writeln!(out, "profiles:            {}", stats.profiles)?;
            writeln!(out, "skipped properties:  {}", stats.skipped_properties)?;
            writeln!(out, "duplicate accounts:  {}", stats.duplicate_accounts)?;
            writeln!(out, "missing ids:         {}", stats.missing_ids)?;
            writeln!(out, "reverse entries:     {}", index.reverse_index().len())?;
            Ok(out)
        }
    }
}

pub fn tree(index: &HierarchyIndex, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&index.accounts().collect::<Vec<_>>()),
        OutputFormat::Text => {
            let mut out = String::new();
            for account in index.accounts() {
                write_account_line(&mut out, account)?;
                for property in account.properties() {
                    out.push_str("  ");
                    write_property_line(&mut out, property)?;
                    for profile in property.profiles() {
                        out.push_str("    ");
                        write_profile_line(&mut out, profile)?;
                    }
                }
            }
            Ok(out)
        }
    }
}

pub fn account(account: &Account, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(account),
        OutputFormat::Text => {
            let mut out = String::new();
            write_account_line(&mut out, account)?;
            for property in account.properties() {
                out.push_str("  ");
                write_property_line(&mut out, property)?;
            }
            Ok(out)
        }
    }
}

pub fn property(
    resolver: &Resolver<'_>,
    property: &Property,
    format: OutputFormat,
) -> Result<String> {
    let owner = resolver.account_by_property_id(&property.id);
    let (account_id, account_name) = owner
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .unwrap_or_default();

    match format {
        OutputFormat::Json => to_json(&PropertyReport {
            account_id,
            account_name,
            property,
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "account: {account_id}  {account_name}")?;
            write_property_line(&mut out, property)?;
            for profile in property.profiles() {
                out.push_str("  ");
                write_profile_line(&mut out, profile)?;
            }
            Ok(out)
        }
    }
}

pub fn profile(resolver: &Resolver<'_>, profile: &Profile, format: OutputFormat) -> Result<String> {
    let account_id = resolver
        .account_by_profile_id(&profile.id)
        .map(|a| a.id.as_str())
        .unwrap_or_default();
    let property_id = resolver
        .property_by_profile_id(&profile.id)
        .map(|p| p.id.as_str())
        .unwrap_or_default();

    match format {
        OutputFormat::Json => to_json(&ProfileReport {
            account_id,
            property_id,
            profile,
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "account:  {account_id}")?;
            writeln!(out, "property: {property_id}")?;
            write_profile_line(&mut out, profile)?;
            Ok(out)
        }
    }
}

pub fn lineage(lineage: &Lineage<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(lineage),
        OutputFormat::Text => Ok(format!(
            "{} ({}) → {} ({}) → {} ({})\n",
            lineage.account.id,
            lineage.account.name,
            lineage.property.id,
            lineage.property.name,
            lineage.profile.id,
            lineage.profile.name,
        )),
    }
}

fn write_account_line(out: &mut String, account: &Account) -> std::fmt::Result {
    writeln!(out, "{}  {}  ({})", account.id, account.name, account.kind)
}

fn write_property_line(out: &mut String, property: &Property) -> std::fmt::Result {
    write!(out, "{}  {}  [{}]", property.id, property.name, property.level)?;
    if let Some(url) = &property.website_url {
        write!(out, "  {url}")?;
    }
    writeln!(out)
}

fn write_profile_line(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "{}  {}  ({})", profile.id, profile.name, profile.profile_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acctree_index::AccountSummaries;

    fn acme() -> HierarchyIndex {
        let page = AccountSummaries::from_json_str(
            r#"{ "username": "ops@acme.example", "items": [ {
                "id": "1234", "name": "Acme", "kind": "analytics#accountSummary",
                "webProperties": [ {
                    "id": "UA-1234-1", "name": "acme.example", "level": "STANDARD",
                    "websiteUrl": "https://acme.example",
                    "profiles": [ { "id": "5678", "name": "Main View", "type": "WEB" } ]
                } ]
            } ] }"#,
        )
        .unwrap();
        HierarchyIndex::build(&page)
    }

    #[test]
    fn tree_text_indents_by_level() {
        let index = acme();
        let text = tree(&index, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1234  Acme  (analytics#accountSummary)",
                "  UA-1234-1  acme.example  [STANDARD]  https://acme.example",
                "    5678  Main View  (WEB)",
            ]
        );
    }

    #[test]
    fn account_text_indents_its_properties() {
        let index = acme();
        let found = index.resolver().account("1234").unwrap();
        let text = account(found, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "1234  Acme  (analytics#accountSummary)\n  UA-1234-1  acme.example  [STANDARD]  https://acme.example\n"
        );
    }

    #[test]
    fn property_json_names_its_account() {
        let index = acme();
        let resolver = index.resolver();
        let found = resolver.property("UA-1234-1").unwrap();

        let json = property(&resolver, found, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["accountId"], "1234");
        assert_eq!(value["accountName"], "Acme");
        assert_eq!(value["property"]["profiles"][0]["type"], "WEB");
    }

    #[test]
    fn lineage_text_walks_down_the_path() {
        let index = acme();
        let resolver = index.resolver();
        let text = lineage(&resolver.lineage("5678").unwrap(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "1234 (Acme) → UA-1234-1 (acme.example) → 5678 (Main View)\n"
        );
    }

    #[test]
    fn stats_json_includes_source_metadata() {
        let index = acme();
        let json = stats(&index, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"]["username"], "ops@acme.example");
        assert_eq!(value["stats"]["profiles"], 1);
        assert_eq!(value["reverseEntries"], 3);
    }
}
