// src/app/fetch.rs: background queries and their hand-off to the UI thread
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::data::{Field, Record};
use super::filters::{distinct_sorted, FilterOptions, Selection};
use super::remote::{RecordQuery, RecordSource};
use super::types::FetchMsg;

/// What the UI should apply after a poll.
#[derive(Debug, PartialEq)]
pub enum FetchUpdate {
    Options(FilterOptions),
    Records(Vec<Record>),
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Owns the worker plumbing. Each record request gets a generation number and
/// only the newest generation's result is handed back.
pub struct Fetcher {
    source: Option<Arc<dyn RecordSource>>,
    notify: Notify,
    tx: Sender<FetchMsg>,
    rx: Receiver<FetchMsg>,
    generation: u64,
    in_flight: usize,
}

impl Fetcher {
    pub fn new(
        source: Option<Arc<dyn RecordSource>>,
        notify: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<FetchMsg>();
        Self {
            source,
            notify: Arc::new(notify),
            tx,
            rx,
            generation: 0,
            in_flight: 0,
        }
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the three column queries side by side; post once all have settled.
    pub fn load_options(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let started = Instant::now();
            let column = |field: Field| -> Vec<String> {
                match source.fetch_column(field) {
                    Ok(values) => distinct_sorted(values),
                    Err(err) => {
                        warn!("Filter options for {} unavailable: {err}", field.column());
                        Vec::new()
                    }
                }
            };
            let options = std::thread::scope(|s| {
                let movies = s.spawn(|| column(Field::Movie));
                let regions = s.spawn(|| column(Field::Region));
                let areas = s.spawn(|| column(Field::Area));
                FilterOptions {
                    movies: movies.join().unwrap_or_default(),
                    regions: regions.join().unwrap_or_default(),
                    areas: areas.join().unwrap_or_default(),
                }
            });
            info!(
                "Filter options loaded in {:?}: {} movies, {} regions, {} areas",
                started.elapsed(),
                options.movies.len(),
                options.regions.len(),
                options.areas.len()
            );
            let _ = tx.send(FetchMsg::Options(options));
            notify();
        });
    }

    /// Issue a record fetch for `selection`. Returns its generation.
    pub fn request_records(&mut self, selection: &Selection) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let Some(source) = self.source.clone() else {
            return generation;
        };
        let query = RecordQuery::from_selection(selection);
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let started = Instant::now();
            let result = source.fetch_records(&query);
            match &result {
                Ok(rows) => info!(
                    "Records #{generation}: {} rows in {:?}",
                    rows.len(),
                    started.elapsed()
                ),
                Err(err) => warn!("Records #{generation} failed: {err}"),
            }
            let _ = tx.send(FetchMsg::Records { generation, result });
            notify();
        });
        generation
    }

    /// Drain finished work without blocking. Failed or superseded record fetches
    /// produce nothing, so the caller keeps what it already shows.
    pub fn poll(&mut self) -> Vec<FetchUpdate> {
        let mut out = Vec::new();
        loop {
            let msg = match self.rx.try_recv() {
                Ok(m) => m,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            self.in_flight = self.in_flight.saturating_sub(1);

            match msg {
                FetchMsg::Options(options) => out.push(FetchUpdate::Options(options)),
                FetchMsg::Records { generation, result } => {
                    if generation != self.generation {
                        debug!(
                            "Dropping records #{generation}; #{} is current",
                            self.generation
                        );
                        continue;
                    }
                    match result {
                        Ok(rows) => out.push(FetchUpdate::Records(rows)),
                        Err(_) => debug!("Keeping previous records after failed fetch #{generation}"),
                    }
                }
            }
        }
        out
    }
}
