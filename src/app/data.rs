use std::borrow::Cow;
use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One row of `box_office_data`. Never mutated after fetch.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub movie: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub area: String,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub day1: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub week1: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub final_gross: f64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub last_updated: String,
}

// Ids arrive as integers or uuids depending on the table; keep both as text.
fn text_or_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn amount_or_zero<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        // numeric columns come back as strings from some views
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Movie,
    Region,
    Area,
    Day1,
    Week1,
    FinalGross,
    LastUpdated,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Movie,
        Self::Region,
        Self::Area,
        Self::Day1,
        Self::Week1,
        Self::FinalGross,
        Self::LastUpdated,
    ];

    /// Columns shown in the records table.
    pub const TABLE: [Self; 7] = [
        Self::Movie,
        Self::Region,
        Self::Area,
        Self::Day1,
        Self::Week1,
        Self::FinalGross,
        Self::LastUpdated,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Movie => "movie",
            Self::Region => "region",
            Self::Area => "area",
            Self::Day1 => "day1",
            Self::Week1 => "week1",
            Self::FinalGross => "final_gross",
            Self::LastUpdated => "last_updated",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Movie => "Movie",
            Self::Region => "Region",
            Self::Area => "Area",
            Self::Day1 => "Day 1",
            Self::Week1 => "Week 1",
            Self::FinalGross => "Final Gross",
            Self::LastUpdated => "Last Updated",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Day1 | Self::Week1 | Self::FinalGross)
    }
}

impl Record {
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Day1 => Some(self.day1),
            Field::Week1 => Some(self.week1),
            Field::FinalGross => Some(self.final_gross),
            _ => None,
        }
    }

    /// Plain string form of a field, as used by the free-text search.
    pub fn text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Id => Cow::Borrowed(&self.id),
            Field::Movie => Cow::Borrowed(&self.movie),
            Field::Region => Cow::Borrowed(&self.region),
            Field::Area => Cow::Borrowed(&self.area),
            Field::LastUpdated => Cow::Borrowed(&self.last_updated),
            Field::Day1 => Cow::Owned(self.day1.to_string()),
            Field::Week1 => Cow::Owned(self.week1.to_string()),
            Field::FinalGross => Cow::Owned(self.final_gross.to_string()),
        }
    }

    pub fn base_title(&self) -> &str {
        base_title(&self.movie)
    }

    /// Order two records by one field, ascending.
    pub fn compare(&self, other: &Self, field: Field) -> Ordering {
        match (self.number(field), other.number(field)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => collate(&self.text(field), &other.text(field)),
        }
    }
}

/// Case-folded comparison with the raw text as tie-break, so "alpha" sorts
/// next to "Alpha" instead of after every capitalised title.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

static TRAILING_QUALIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\s*\([^()]*\))+\s*$").expect("valid qualifier pattern")
});

/// Title with every trailing `(...)` qualifier removed: "Movie (Telugu)" -> "Movie".
/// A title made only of a qualifier is kept as-is (trimmed).
pub fn base_title(title: &str) -> &str {
    let trimmed = title.trim();
    match TRAILING_QUALIFIERS.find(trimmed) {
        Some(m) if m.start() > 0 => trimmed[..m.start()].trim_end(),
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_language_qualifier() {
        assert_eq!(base_title("Movie (Telugu)"), "Movie");
        assert_eq!(base_title("Movie  (Telugu)  "), "Movie");
        assert_eq!(base_title("Movie"), "Movie");
    }

    #[test]
    fn base_title_is_idempotent() {
        for t in [
            "Movie (Telugu)",
            "Movie (3D) (Hindi)",
            "(500) Days of Summer",
            "(Dubbed)",
            "  spaced out  ",
            "",
        ] {
            let once = base_title(t);
            assert_eq!(base_title(once), once, "title {t:?}");
        }
    }

    #[test]
    fn leading_parenthetical_is_part_of_the_title() {
        assert_eq!(base_title("(500) Days of Summer"), "(500) Days of Summer");
        assert_eq!(base_title("(500) Days of Summer (English)"), "(500) Days of Summer");
        assert_eq!(base_title("(Dubbed)"), "(Dubbed)");
    }

    #[test]
    fn decodes_rows_with_nulls_and_mixed_types() {
        let raw = r#"[
            {"id": 7, "movie": "X (Hindi)", "region": "Delhi", "area": "NCR",
             "day1": 100, "week1": null, "final_gross": "2500.5", "last_updated": "2024-05-01T10:00:00Z"},
            {"id": "a1b2", "movie": "Y"}
        ]"#;
        let rows: Vec<Record> = serde_json::from_str(raw).expect("decode");
        assert_eq!(rows[0].id, "7");
        assert_eq!(rows[0].day1, 100.0);
        assert_eq!(rows[0].week1, 0.0);
        assert_eq!(rows[0].final_gross, 2500.5);
        assert_eq!(rows[1].id, "a1b2");
        assert_eq!(rows[1].region, "");
        assert_eq!(rows[1].final_gross, 0.0);
    }

    #[test]
    fn compare_uses_numbers_for_amounts_and_collation_for_text() {
        let a = Record { movie: "beta".into(), day1: 9.0, ..Record::default() };
        let b = Record { movie: "Alpha".into(), day1: 10.0, ..Record::default() };
        assert_eq!(a.compare(&b, Field::Day1), Ordering::Less);
        assert_eq!(a.compare(&b, Field::Movie), Ordering::Greater);
        assert_eq!(collate("alpha", "Alpha"), Ordering::Greater);
        assert_eq!(collate("Alpha", "alpha"), Ordering::Less);
    }

    #[test]
    fn amounts_render_without_trailing_zeroes() {
        let r = Record { day1: 100.0, week1: 1.5, ..Record::default() };
        assert_eq!(r.text(Field::Day1), "100");
        assert_eq!(r.text(Field::Week1), "1.5");
    }
}
