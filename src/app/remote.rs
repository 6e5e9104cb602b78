// src/app/remote.rs: PostgREST access to the `box_office_data` table
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::debug;

use super::data::{Field, Record};
use super::filters::Selection;

pub const TABLE: &str = "box_office_data";
pub const MAX_ROWS: usize = 75_000;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Where records come from. The UI only ever talks to this trait.
pub trait RecordSource: Send + Sync {
    /// Every value of one column across the whole table (nulls skipped).
    fn fetch_column(&self, field: Field) -> Result<Vec<String>, String>;

    fn fetch_records(&self, query: &RecordQuery) -> Result<Vec<Record>, String>;
}

/// Server-side constraints for one record fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub title_prefixes: Vec<String>,
    pub regions: Vec<String>,
    pub areas: Vec<String>,
    pub limit: usize,
}

impl RecordQuery {
    pub fn from_selection(sel: &Selection) -> Self {
        Self {
            title_prefixes: sel.title_prefixes(),
            regions: sel.regions.iter().cloned().collect(),
            areas: sel.areas.iter().cloned().collect(),
            limit: MAX_ROWS,
        }
    }

    /// Filter parameters in PostgREST syntax (without paging).
    pub fn filter_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        if !self.title_prefixes.is_empty() {
            let ors = self
                .title_prefixes
                .iter()
                .map(|t| {
                    format!(
                        "{}.ilike.{}",
                        Field::Movie.column(),
                        quote_value(&format!("{}*", escape_like(t)))
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("or".to_string(), format!("({ors})")));
        }
        if !self.regions.is_empty() {
            params.push((Field::Region.column().to_string(), in_list(&self.regions)));
        }
        if !self.areas.is_empty() {
            params.push((Field::Area.column().to_string(), in_list(&self.areas)));
        }
        params.push(("order".to_string(), format!("{}.asc", Field::Id.column())));
        params
    }
}

/// Escape LIKE metacharacters so a title matches as a literal prefix.
/// PostgREST reads `*` as `%` and has no escape for it, so a `*` inside a
/// title still matches any run of characters.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Double-quote a value for PostgREST lists; commas and parentheses are reserved there.
pub fn quote_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

fn in_list(values: &[String]) -> String {
    let inner = values.iter().map(|v| quote_value(v)).collect::<Vec<_>>().join(",");
    format!("in.({inner})")
}

/// `{base}/rest/v1/{table}?k=v&...` with every key and value percent-encoded.
pub fn table_url(base_url: &str, table: &str, params: &[(String, String)]) -> String {
    let mut url = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
    for (i, (k, v)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(k));
        url.push('=');
        url.push_str(&urlencoding::encode(v));
    }
    url
}

/// Read pages of `page_rows` until a short page arrives or `cap` rows are held.
/// `fetch_page(offset, limit)` returns one page.
pub fn collect_pages<T, F>(
    page_rows: usize,
    cap: Option<usize>,
    mut fetch_page: F,
) -> Result<Vec<T>, String>
where
    F: FnMut(usize, usize) -> Result<Vec<T>, String>,
{
    let page_rows = page_rows.max(1);
    let mut out: Vec<T> = Vec::new();
    loop {
        let want = match cap {
            Some(c) => page_rows.min(c.saturating_sub(out.len())),
            None => page_rows,
        };
        if want == 0 {
            break;
        }
        let mut page = fetch_page(out.len(), want)?;
        let got = page.len();
        page.truncate(want);
        out.append(&mut page);
        if got < want {
            break;
        }
    }
    Ok(out)
}

pub struct SupabaseSource {
    client: Client,
    base_url: String,
    page_rows: usize,
}

impl SupabaseSource {
    pub fn new(base_url: &str, anon_key: &str, page_rows: usize) -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(anon_key).map_err(|e| format!("access key: {e}"))?;
        headers.insert("apikey", key);
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|e| format!("access key: {e}"))?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent("boxoffice/0.1")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(|e| format!("http client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim().to_string(),
            page_rows,
        })
    }

    fn get_json(&self, what: &str, params: &[(String, String)]) -> Result<String, String> {
        let url = table_url(&self.base_url, TABLE, params);
        debug!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("{what}: request failed: {e}"))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| format!("{what}: reading body: {e}"))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            return Err(format!("{what}: HTTP {status}: {snippet}"));
        }
        Ok(body)
    }
}

fn with_page(params: &[(String, String)], offset: usize, limit: usize) -> Vec<(String, String)> {
    let mut p = params.to_vec();
    p.push(("limit".to_string(), limit.to_string()));
    p.push(("offset".to_string(), offset.to_string()));
    p
}

/// One column of every row, in id order so offset paging is stable.
pub fn column_params(field: Field) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), field.column().to_string()),
        ("order".to_string(), format!("{}.asc", Field::Id.column())),
    ]
}

impl RecordSource for SupabaseSource {
    fn fetch_column(&self, field: Field) -> Result<Vec<String>, String> {
        let what = format!("{} column", field.column());
        let params = column_params(field);
        let rows = collect_pages(self.page_rows, None, |offset, limit| {
            let body = self.get_json(&what, &with_page(&params, offset, limit))?;
            serde_json::from_str::<Vec<serde_json::Map<String, serde_json::Value>>>(&body)
                .map_err(|e| format!("{what}: decoding: {e}"))
        })?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| match row.remove(field.column()) {
                Some(serde_json::Value::String(s)) => Some(s),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .collect())
    }

    fn fetch_records(&self, query: &RecordQuery) -> Result<Vec<Record>, String> {
        let params = query.filter_params();
        collect_pages(self.page_rows, Some(query.limit), |offset, limit| {
            let body = self.get_json("records query", &with_page(&params, offset, limit))?;
            serde_json::from_str::<Vec<Record>>(&body)
                .map_err(|e| format!("records query: decoding: {e}"))
        })
    }
}
