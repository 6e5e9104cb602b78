// src/app/view.rs: everything derived from the fetched records
use std::collections::HashMap;

use super::data::Record;
use super::filters::filtered_indices;
use super::types::{SortDir, SortSpec, TOP_N};

/// Revenue sums for one title key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TitleTotals {
    pub title: String,
    pub day1: f64,
    pub week1: f64,
    pub final_gross: f64,
    pub records: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub day1: f64,
    pub week1: f64,
    pub final_gross: f64,
    pub count: usize,
    pub latest_update: Option<String>,
}

/// Derived view of one record set under one search/sort. Cheap to throw away.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardView {
    /// Indices into the record slice: search-filtered, then sorted.
    pub rows: Vec<usize>,
    pub summary: Summary,
    pub by_title: Vec<TitleTotals>,
    pub by_base_title: Vec<TitleTotals>,
}

impl DashboardView {
    pub fn build(records: &[Record], search: &str, sort: SortSpec) -> Self {
        let kept = filtered_indices(records, search);

        let mut rows = kept.clone();
        sort_indices(records, &mut rows, sort);

        let summary = summarize(records, &kept);

        let kept_records = || kept.iter().map(|&i| &records[i]);
        let by_title = group_totals(kept_records(), |r| r.movie.trim());
        let by_base_title = group_totals(kept_records(), Record::base_title);

        Self {
            rows,
            summary,
            by_title,
            by_base_title,
        }
    }

    /// Bars of the chart: the biggest base titles.
    pub fn chart_top(&self) -> &[TitleTotals] {
        top_n(&self.by_base_title, TOP_N)
    }

    /// Rows of the "Gross Split" ranking: the biggest full titles.
    pub fn gross_split_top(&self) -> &[TitleTotals] {
        top_n(&self.by_title, TOP_N)
    }
}

/// Stable sort of `idx` by one record field.
pub fn sort_indices(records: &[Record], idx: &mut [usize], sort: SortSpec) {
    idx.sort_by(|&a, &b| {
        let ord = records[a].compare(&records[b], sort.key);
        match sort.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

/// Metric sums and count cover every fetched record; the search box does not
/// narrow them. The latest update honours the search.
pub fn summarize(records: &[Record], kept: &[usize]) -> Summary {
    let mut s = Summary {
        count: records.len(),
        ..Summary::default()
    };
    for r in records {
        s.day1 += r.day1;
        s.week1 += r.week1;
        s.final_gross += r.final_gross;
    }
    s.latest_update = kept
        .iter()
        .map(|&i| records[i].last_updated.as_str())
        .filter(|t| !t.is_empty())
        .max()
        .map(str::to_string);
    s
}

/// Sum revenue per key in first-seen order, then order by final gross, largest first.
pub fn group_totals<'a, I, K>(records: I, key: K) -> Vec<TitleTotals>
where
    I: IntoIterator<Item = &'a Record>,
    K: Fn(&'a Record) -> &'a str,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<TitleTotals> = Vec::new();
    for r in records {
        let k = key(r);
        let slot = *slots.entry(k).or_insert_with(|| {
            out.push(TitleTotals {
                title: k.to_string(),
                ..TitleTotals::default()
            });
            out.len() - 1
        });
        let t = &mut out[slot];
        t.day1 += r.day1;
        t.week1 += r.week1;
        t.final_gross += r.final_gross;
        t.records += 1;
    }
    out.sort_by(|a, b| b.final_gross.total_cmp(&a.final_gross));
    out
}

pub fn top_n(groups: &[TitleTotals], n: usize) -> &[TitleTotals] {
    &groups[..groups.len().min(n)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Field;
    use crate::app::types::Pager;

    fn rec(movie: &str, region: &str, day1: f64, final_gross: f64) -> Record {
        Record {
            movie: movie.into(),
            region: region.into(),
            day1,
            week1: day1 * 3.0,
            final_gross,
            ..Record::default()
        }
    }

    fn by_title<'a>(groups: &'a [TitleTotals], title: &str) -> &'a TitleTotals {
        groups
            .iter()
            .find(|g| g.title == title)
            .unwrap_or_else(|| panic!("no group {title}"))
    }

    #[test]
    fn editions_merge_under_base_title() {
        let rows = vec![rec("X (Hindi)", "Delhi", 100.0, 0.0), rec("X (Tamil)", "Chennai", 50.0, 0.0)];
        let view = DashboardView::build(&rows, "", SortSpec::default());

        assert_eq!(view.by_base_title.len(), 1);
        assert_eq!(view.by_base_title[0].title, "X");
        assert_eq!(view.by_base_title[0].day1, 150.0);
        assert_eq!(view.by_base_title[0].records, 2);
        assert_eq!(view.by_title.len(), 2);
    }

    #[test]
    fn group_totals_ignore_record_order() {
        let rows: Vec<Record> = (0..40)
            .map(|i| rec(&format!("T{} (v{})", i % 7, i % 3), "R", i as f64, (i * 13 % 17) as f64))
            .collect();
        let mut reversed = rows.clone();
        reversed.reverse();
        let mut rotated = rows.clone();
        rotated.rotate_left(11);

        let base = DashboardView::build(&rows, "", SortSpec::default());
        for perm in [&reversed, &rotated] {
            let other = DashboardView::build(perm, "", SortSpec::default());
            assert_eq!(other.by_base_title.len(), base.by_base_title.len());
            for g in &base.by_base_title {
                let o = by_title(&other.by_base_title, &g.title);
                assert_eq!((o.day1, o.week1, o.final_gross), (g.day1, g.week1, g.final_gross));
            }
            for g in &base.by_title {
                let o = by_title(&other.by_title, &g.title);
                assert_eq!(o.final_gross, g.final_gross);
            }
        }
    }

    #[test]
    fn groups_are_ordered_by_final_gross_then_first_seen() {
        let rows = vec![
            rec("A", "R", 1.0, 10.0),
            rec("B", "R", 1.0, 30.0),
            rec("C", "R", 1.0, 10.0),
            rec("A", "R", 1.0, 5.0),
        ];
        let groups = group_totals(&rows, |r| r.movie.as_str());
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn top_twenty_matches_full_sort_for_any_size() {
        for n in [0usize, 1, 19, 20, 21, 57] {
            let rows: Vec<Record> = (0..n)
                .map(|i| rec(&format!("M{i}"), "R", 0.0, ((i * 7919) % 101) as f64))
                .collect();
            let view = DashboardView::build(&rows, "", SortSpec::default());

            let mut expected: Vec<f64> = rows.iter().map(|r| r.final_gross).collect();
            expected.sort_by(|a, b| b.total_cmp(a));
            expected.truncate(20);

            let got: Vec<f64> = view.chart_top().iter().map(|g| g.final_gross).collect();
            assert_eq!(got, expected, "size {n}");
            assert_eq!(view.gross_split_top().len(), n.min(20));
        }
    }

    #[test]
    fn top_twenty_ignores_table_paging() {
        let rows: Vec<Record> = (0..45).map(|i| rec(&format!("M{i}"), "R", 0.0, i as f64)).collect();
        let view = DashboardView::build(&rows, "", SortSpec::default());
        let first = view.chart_top().to_vec();

        let paged = Pager { page: 3, page_size: 20 };
        assert_eq!(paged.slice(&view.by_base_title).len(), 5);
        assert_eq!(view.chart_top(), first.as_slice());
        assert_eq!(view.chart_top()[0].final_gross, 44.0);
    }

    #[test]
    fn summary_ignores_search_but_latest_update_honours_it() {
        let mut a = rec("X (Hindi)", "Delhi", 100.0, 1000.0);
        a.last_updated = "2024-03-01T00:00:00Z".into();
        let mut b = rec("Y", "Mumbai", 40.0, 400.0);
        b.last_updated = "2024-05-01T00:00:00Z".into();
        let rows = vec![a, b];

        let view = DashboardView::build(&rows, "delhi", SortSpec::default());
        assert_eq!(view.rows, vec![0]);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.day1, 140.0);
        assert_eq!(view.summary.week1, 420.0);
        assert_eq!(view.summary.final_gross, 1400.0);
        assert_eq!(view.summary.latest_update.as_deref(), Some("2024-03-01T00:00:00Z"));
        // groups follow the search
        assert_eq!(view.by_title.len(), 1);
        assert_eq!(view.by_base_title[0].title, "X");
    }

    #[test]
    fn rows_sort_by_selected_column() {
        let rows = vec![
            rec("beta", "R", 5.0, 1.0),
            rec("Alpha", "R", 7.0, 3.0),
            rec("gamma", "R", 6.0, 2.0),
        ];
        let asc_title = SortSpec { key: Field::Movie, dir: SortDir::Asc };
        assert_eq!(DashboardView::build(&rows, "", asc_title).rows, vec![1, 0, 2]);

        let desc_day1 = SortSpec { key: Field::Day1, dir: SortDir::Desc };
        assert_eq!(DashboardView::build(&rows, "", desc_day1).rows, vec![1, 2, 0]);
    }

    #[test]
    fn equal_keys_keep_fetch_order() {
        let rows = vec![rec("A", "R", 1.0, 9.0), rec("B", "R", 1.0, 9.0), rec("C", "R", 1.0, 9.0)];
        let spec = SortSpec { key: Field::FinalGross, dir: SortDir::Desc };
        assert_eq!(DashboardView::build(&rows, "", spec).rows, vec![0, 1, 2]);
    }

    #[test]
    fn empty_record_set_builds_an_empty_view() {
        let view = DashboardView::build(&[], "anything", SortSpec::default());
        assert!(view.rows.is_empty());
        assert_eq!(view.summary, Summary::default());
        assert!(view.chart_top().is_empty());
    }
}
