//! Ingestion of demographic name lists and roster credits.
//!
//! # Name lists
//!
//! One file per year, named `yob<YEAR>.txt`, one `Name,Sex,Count` record per
//! line:
//!
//! ```text
//! Mary,F,7065
//! Anna,F,2604
//! John,M,9655
//! ```
//!
//! # Roster credits
//!
//! One credit per entry, `character | portrayer (tag)`, entries separated
//! by `", "`:
//!
//! ```text
//! Carol Aird | Cate Blanchett (F), Therese Belivet | Rooney Mara (F)
//! ```
//!
//! A tag other than `M`/`F` (usually `?`) means the gender is unknown.

use crate::error::{Error, Result};
use castgender_core::{CastEntry, Gender, NameScoreTable, NameScoreTableBuilder, Roster};
use std::fs;
use std::path::Path;

/// Extract the year from a name-list file name such as `yob1955.txt`.
#[must_use]
pub fn year_from_file_name(file_name: &str) -> Option<i32> {
    file_name
        .strip_prefix("yob")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

/// Parse one year's name list into `builder`.
///
/// Blank lines are skipped. Returns the number of records read.
pub fn add_year_file(
    builder: &mut NameScoreTableBuilder,
    year: i32,
    content: &str,
) -> Result<usize> {
    let mut records = 0;
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, gender, count) = parse_record(line).ok_or_else(|| {
            Error::parse(format!("year {} line {}: '{}'", year, idx + 1, line))
        })?;
        builder.add_count(year, name, gender, count);
        records += 1;
    }
    Ok(records)
}

fn parse_record(line: &str) -> Option<(&str, Gender, u64)> {
    let mut fields = line.split(',');
    let name = fields.next()?.trim();
    let gender = Gender::from_tag(fields.next()?)?;
    let count = fields.next()?.trim().parse().ok()?;
    if name.is_empty() || fields.next().is_some() {
        return None;
    }
    Some((name, gender, count))
}

/// Load every `yob<YEAR>.txt` file in `dir` into a table.
///
/// Files whose names do not follow the pattern are ignored.
pub fn load_table_dir(dir: impl AsRef<Path>) -> Result<NameScoreTable> {
    let dir = dir.as_ref();
    let mut builder = NameScoreTable::builder();
    let mut years = 0;
    let mut records = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !file_name.starts_with("yob") {
            continue;
        }
        let Some(year) = year_from_file_name(file_name) else {
            log::warn!("Skipping '{}': no year in file name", file_name);
            continue;
        };
        let content = fs::read_to_string(entry.path())?;
        records += add_year_file(&mut builder, year, &content)?;
        years += 1;
    }

    log::info!(
        "Loaded {} name records across {} years from {}",
        records,
        years,
        dir.display()
    );
    Ok(builder.build())
}

/// Parse one credit: `character | portrayer (tag)`.
pub fn parse_credit(text: &str) -> Result<CastEntry> {
    let (character, credit) = text
        .split_once(" | ")
        .ok_or_else(|| Error::parse(format!("credit without ' | ': '{}'", text)))?;
    let (portrayer, gender) = match credit.rsplit_once('(') {
        Some((portrayer, tag)) => {
            let gender = Gender::from_tag(tag.trim_end_matches(')'));
            (portrayer.trim(), gender)
        }
        None => (credit.trim(), None),
    };
    Ok(CastEntry::new(character.trim(), portrayer, gender))
}

/// Parse a comma-separated list of credits, keeping billing order.
pub fn parse_roster(line: &str) -> Result<Roster> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Roster::default());
    }
    line.split(", ").map(parse_credit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use castgender_core::CastId;

    #[test]
    fn file_name_years() {
        assert_eq!(year_from_file_name("yob1955.txt"), Some(1955));
        assert_eq!(year_from_file_name("yob.txt"), None);
        assert_eq!(year_from_file_name("yob1955.csv"), None);
        assert_eq!(year_from_file_name("names1955.txt"), None);
    }

    #[test]
    fn year_file_accumulates_counts() {
        let mut builder = NameScoreTable::builder();
        let content = "Leslie,F,30\n\nLeslie,M,10\nMary,F,5\n";
        let n = add_year_file(&mut builder, 1990, content).unwrap();
        assert_eq!(n, 3);
        let table = builder.build();
        assert_eq!(table.score(1990, "leslie"), Some(0.75));
        assert_eq!(table.score(1990, "mary"), Some(1.0));
    }

    #[test]
    fn malformed_record_reports_line() {
        let mut builder = NameScoreTable::builder();
        let err = add_year_file(&mut builder, 1990, "Mary,F,5\nBroken,X,1\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
        assert!(add_year_file(&mut builder, 1990, "Mary,F,lots").is_err());
        assert!(add_year_file(&mut builder, 1990, "Mary,F,1,extra").is_err());
    }

    #[test]
    fn credits() {
        let entry = parse_credit("Carol Aird | Cate Blanchett (F)").unwrap();
        assert_eq!(entry.character, "Carol Aird");
        assert_eq!(entry.portrayer, "Cate Blanchett");
        assert_eq!(entry.gender, Some(Gender::Female));

        let entry = parse_credit("Waiter | Someone (?)").unwrap();
        assert_eq!(entry.gender, None);

        let entry = parse_credit("Waiter | Someone").unwrap();
        assert_eq!(entry.portrayer, "Someone");
        assert_eq!(entry.gender, None);

        assert!(parse_credit("no separator").is_err());
    }

    #[test]
    fn roster_line() {
        let line = "Carol Aird | Cate Blanchett (F), Harge Aird | Kyle Chandler (M)";
        let roster = parse_roster(line).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(CastId(1)).unwrap().gender, Some(Gender::Male));
        assert!(parse_roster("  ").unwrap().is_empty());
    }
}
