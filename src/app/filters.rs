use std::collections::BTreeSet;

use itertools::Itertools;

use super::data::{base_title, Field, Record};

/// Distinct option lists offered by the three multi-selects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub movies: Vec<String>,
    pub regions: Vec<String>,
    pub areas: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Movie,
    Region,
    Area,
}

impl Dimension {
    pub const ALL: [Self; 3] = [Self::Movie, Self::Region, Self::Area];

    pub const fn plural(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Region => "Regions",
            Self::Area => "Areas",
        }
    }
}

impl FilterOptions {
    pub fn for_dimension(&self, dim: Dimension) -> &[String] {
        match dim {
            Dimension::Movie => &self.movies,
            Dimension::Region => &self.regions,
            Dimension::Area => &self.areas,
        }
    }
}

/// Current multi-select state. An empty set means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub movies: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub areas: BTreeSet<String>,
}

impl Selection {
    pub fn values(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Movie => &self.movies,
            Dimension::Region => &self.regions,
            Dimension::Area => &self.areas,
        }
    }

    fn values_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Movie => &mut self.movies,
            Dimension::Region => &mut self.regions,
            Dimension::Area => &mut self.areas,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.regions.is_empty() && self.areas.is_empty()
    }

    pub fn toggled(&self, dim: Dimension, value: &str) -> Self {
        let mut next = self.clone();
        let set = next.values_mut(dim);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        next
    }

    pub fn cleared(&self, dim: Dimension) -> Self {
        let mut next = self.clone();
        next.values_mut(dim).clear();
        next
    }

    /// Base titles of the selected movies, deduplicated, in sorted order.
    pub fn title_prefixes(&self) -> Vec<String> {
        self.movies
            .iter()
            .map(|m| base_title(m))
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .sorted()
            .dedup()
            .collect()
    }
}

/// Reduce a raw column to its sorted distinct non-empty values.
pub fn distinct_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .sorted()
        .dedup()
        .collect()
}

/// Coarse row match: the search text anywhere in the space-joined row.
pub fn matches_search(record: &Record, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    let haystack = Field::ALL
        .iter()
        .map(|f| record.text(*f))
        .join(" ")
        .to_lowercase();
    haystack.contains(needle_lower)
}

/// Indices of the records kept by `search`, in input order.
pub fn filtered_indices(records: &[Record], search: &str) -> Vec<usize> {
    let needle = search.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_search(r, &needle))
        .map(|(i, _)| i)
        .collect()
}
