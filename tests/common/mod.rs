#![allow(dead_code)]

use async_trait::async_trait;
use mcp_climate_server::{FetchError, ModelSeries, SeriesFetcher, SeriesQuery, YearSeries};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// In-memory series source with per-year failures
#[derive(Default)]
pub struct FakeFetcher {
    pub years: BTreeMap<i32, YearSeries>,
    pub unknown_location: BTreeSet<i32>,
    pub network_failures: BTreeSet<i32>,
    pub resolve_failure: Option<FetchError>,
    pub resolves: Mutex<usize>,
    pub calls: Mutex<Vec<(String, i32)>>,
}

impl FakeFetcher {
    pub fn with_year(mut self, year: i32, series: YearSeries) -> Self {
        self.years.insert(year, series);
        self
    }

    pub fn failing_network(mut self, year: i32) -> Self {
        self.network_failures.insert(year);
        self
    }

    pub fn failing_resolve(mut self, error: FetchError) -> Self {
        self.resolve_failure = Some(error);
        self
    }

    pub fn unknown_location(mut self, year: i32) -> Self {
        self.unknown_location.insert(year);
        self
    }
}

#[async_trait]
impl SeriesFetcher for FakeFetcher {
    async fn resolve(&self, query: &SeriesQuery) -> Result<SeriesQuery, FetchError> {
        *self.resolves.lock().unwrap() += 1;
        match &self.resolve_failure {
            Some(error) => Err(error.clone()),
            None => Ok(query.clone().with_coordinates(48.85, 2.35)),
        }
    }

    async fn fetch_year(&self, query: &SeriesQuery, year: i32) -> Result<YearSeries, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.location_name.clone(), year));

        if self.unknown_location.contains(&year) {
            return Err(FetchError::LocationNotFound(query.location_name.clone()));
        }
        if self.network_failures.contains(&year) {
            return Err(FetchError::Network("connection reset".to_string()));
        }

        let series = self.years.get(&year).cloned().unwrap_or_default();
        Ok(series
            .into_iter()
            .filter(|(model, _)| query.models.contains(model))
            .collect())
    }
}

/// A full year of readings: `value(day)` for every day
pub fn year_of(value: impl Fn(usize) -> Option<f64>) -> Vec<Option<f64>> {
    (0..365).map(value).collect()
}

/// Builds a model's series where summer (days 180..180+hot_run) exceeds 30°C
/// and the first `frost` days are below zero.
pub fn model_with(hot_run: usize, frost: usize, storms: usize) -> ModelSeries {
    let mut series = ModelSeries::new();
    series.insert(
        "temperature_2m_max".to_string(),
        year_of(|d| Some(if (180..180 + hot_run).contains(&d) { 33.0 } else { 22.0 })),
    );
    series.insert(
        "temperature_2m_min".to_string(),
        year_of(|d| Some(if d < frost { -3.0 } else { 8.0 })),
    );
    series.insert(
        "temperature_2m_mean".to_string(),
        year_of(|d| Some(if (90..300).contains(&d) { 15.0 } else { 2.0 })),
    );
    series.insert(
        "precipitation_sum".to_string(),
        year_of(|d| Some(if d % 30 == 0 && d / 30 < storms { 55.0 } else { 0.0 })),
    );
    series.insert("rain_sum".to_string(), year_of(|_| Some(0.0)));
    series
}

/// Canned JSON response for requests whose target contains every needle
pub struct Route {
    needles: Vec<String>,
    status: u16,
    body: String,
}

pub fn route(needles: &str, status: u16, body: impl Into<String>) -> Route {
    Route {
        needles: needles.split_whitespace().map(String::from).collect(),
        status,
        body: body.into(),
    }
}

/// Minimal HTTP/1.1 server answering from a fixed route table. Unmatched
/// requests get a 404. Every request target is recorded.
pub struct CannedServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = routes.clone();
                let recorded = recorded.clone();
                thread::spawn(move || respond(stream, &routes, &recorded));
            }
        });

        Self { base, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.requests()
            .iter()
            .filter(|target| target.contains(needle))
            .count()
    }
}

fn respond(mut stream: TcpStream, routes: &[Route], recorded: &Mutex<Vec<String>>) {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    recorded.lock().unwrap().push(target.clone());

    let (status, body) = routes
        .iter()
        .find(|r| r.needles.iter().all(|n| target.contains(n.as_str())))
        .map(|r| (r.status, r.body.as_str()))
        .unwrap_or((404, "{}"));
    let response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
