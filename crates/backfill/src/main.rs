use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tastemap_shared::dataset::{Dataset, DatasetError};
use tastemap_shared::local_search::{LocalSearchResponse, SearchParams, LOCAL_SEARCH_PATH};
use tastemap_shared::models::{Area, Category};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_YAHOO_API_BASE_URL: &str = "https://map.yahooapis.jp";
const SEARCH_RESULTS: u32 = 5;
const SEARCH_RADIUS_KM: u32 = 2;

/// Fill in missing local-search ids by searching for each store's name.
#[derive(Debug, Parser)]
#[command(name = "tastemap-backfill")]
struct Cli {
    /// Dataset file to update in place.
    #[arg(long, default_value = "assets/stores.json")]
    dataset: PathBuf,
    /// Only stores in this category (spicy, oily, sweet).
    #[arg(long)]
    category: Option<Category>,
    #[arg(long, default_value = "shibuya", value_parser = parse_area)]
    area: Area,
    /// Pause between search requests.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Search and report without writing the file.
    #[arg(long)]
    dry_run: bool,
    #[arg(long, env = "YAHOO_CLIENT_ID", hide_env_values = true)]
    client_id: String,
    #[arg(long, env = "YAHOO_API_BASE_URL", default_value = DEFAULT_YAHOO_API_BASE_URL)]
    api_base_url: String,
}

#[derive(Debug, Error)]
enum BackfillError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
}

fn parse_area(value: &str) -> Result<Area, String> {
    match value.to_ascii_lowercase().as_str() {
        "shibuya" => Ok(Area::Shibuya),
        other => Err(format!("unknown area: {other}")),
    }
}

/// Indexes of stores that still need a local-search id.
fn pending_stores(dataset: &Dataset, area: Area, category: Option<Category>) -> Vec<usize> {
    dataset
        .stores
        .iter()
        .enumerate()
        .filter(|(_, s)| s.area == area && category.is_none_or(|c| s.category == c))
        .filter(|(_, s)| s.local_search_id().is_none())
        .map(|(i, _)| i)
        .collect()
}

fn search_params(name: &str, area: Area) -> SearchParams {
    let mut params = SearchParams::new(name, Some(area.center()));
    params.results = SEARCH_RESULTS;
    params.dist_km = SEARCH_RADIUS_KM;
    params
}

fn first_hit_id(response: &LocalSearchResponse) -> Option<String> {
    response
        .feature
        .first()
        .map(|f| f.id.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    total: usize,
    with_id: usize,
}

impl Summary {
    fn of(dataset: &Dataset, area: Area, category: Option<Category>) -> Self {
        let stores: Vec<_> = dataset.stores_in(area, category).collect();
        Summary {
            total: stores.len(),
            with_id: stores.iter().filter(|s| s.local_search_id().is_some()).count(),
        }
    }

    fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_id as f64 * 100.0 / self.total as f64
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total: {}, with id: {}, coverage: {:.1}%",
            self.total,
            self.with_id,
            self.percentage()
        )
    }
}

struct Searcher {
    client: reqwest::blocking::Client,
    url: String,
    client_id: String,
}

impl Searcher {
    fn new(base_url: &str, client_id: String) -> Self {
        Searcher {
            client: reqwest::blocking::Client::new(),
            url: format!("{}{LOCAL_SEARCH_PATH}", base_url.trim_end_matches('/')),
            client_id,
        }
    }

    fn first_id(&self, params: &SearchParams) -> Result<Option<String>, BackfillError> {
        let response: LocalSearchResponse = self
            .client
            .get(&self.url)
            .query(&params.to_query(&self.client_id))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(first_hit_id(&response))
    }
}

fn load(path: &Path) -> Result<Dataset, BackfillError> {
    let json = std::fs::read_to_string(path).map_err(|source| BackfillError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Dataset::from_json(&json)?)
}

fn save(path: &Path, dataset: &Dataset) -> Result<(), BackfillError> {
    let json = dataset.to_json_pretty()?;
    std::fs::write(path, json + "\n").map_err(|source| BackfillError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli) -> Result<Summary, BackfillError> {
    let mut dataset = load(&cli.dataset)?;
    let pending = pending_stores(&dataset, cli.area, cli.category);
    tracing::info!(count = pending.len(), dataset = %cli.dataset.display(), "Stores missing a local-search id");

    let searcher = Searcher::new(&cli.api_base_url, cli.client_id.clone());
    for (n, &index) in pending.iter().enumerate() {
        if n > 0 {
            thread::sleep(Duration::from_millis(cli.delay_ms));
        }
        let store = &mut dataset.stores[index];
        match searcher.first_id(&search_params(&store.name, cli.area)) {
            Ok(Some(id)) => {
                tracing::info!(store_id = %store.id, name = %store.name, found = %id, "Matched");
                store.yahoo_store_id = Some(id);
            }
            Ok(None) => tracing::warn!(store_id = %store.id, name = %store.name, "No search hits"),
            Err(e) => tracing::warn!(store_id = %store.id, name = %store.name, error = %e, "Search failed"),
        }
    }

    if cli.dry_run {
        tracing::info!("Dry run, dataset left unchanged");
    } else {
        save(&cli.dataset, &dataset)?;
        tracing::info!(dataset = %cli.dataset.display(), "Wrote dataset");
    }
    Ok(Summary::of(&dataset, cli.area, cli.category))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::from_filename(".env.local");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let summary = run(&cli)?;
    println!("{summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "version": 2,
        "stores": [
            {"id":"s1","name":"辛麺屋","category":"spicy","address":""},
            {"id":"s2","name":"唐揚げ","category":"oily","address":"","yahooStoreId":"known"},
            {"id":"s3","name":"担々麺","category":"spicy","address":"","yahooStoreId":"  "},
            {"id":"s4","name":"パフェ","category":"sweet","address":""}
        ],
        "pins": []
    }"#;

    #[test]
    fn test_pending_skips_stores_with_ids() {
        let dataset = Dataset::from_json(DATASET).unwrap();
        assert_eq!(pending_stores(&dataset, Area::Shibuya, None), vec![0, 2, 3]);
        assert_eq!(
            pending_stores(&dataset, Area::Shibuya, Some(Category::Spicy)),
            vec![0, 2]
        );
    }

    #[test]
    fn test_search_params_near_area_center() {
        let params = search_params("辛麺屋", Area::Shibuya);
        assert_eq!(params.results, 5);
        assert_eq!(params.dist_km, 2);
        assert_eq!(params.near, Some(Area::Shibuya.center()));
        let query = params.to_query("app");
        assert!(query.contains(&("dist", "2".to_string())));
        assert!(query.contains(&("results", "5".to_string())));
    }

    #[test]
    fn test_first_hit_id() {
        let response: LocalSearchResponse =
            serde_json::from_str(r#"{"Feature":[{"Id":"a1","Name":"x"},{"Id":"b2"}]}"#).unwrap();
        assert_eq!(first_hit_id(&response).as_deref(), Some("a1"));

        let empty: LocalSearchResponse = serde_json::from_str(r#"{"ResultInfo":{"Count":0}}"#).unwrap();
        assert_eq!(first_hit_id(&empty), None);
    }

    #[test]
    fn test_summary() {
        let dataset = Dataset::from_json(DATASET).unwrap();
        let summary = Summary::of(&dataset, Area::Shibuya, None);
        assert_eq!(summary, Summary { total: 4, with_id: 1 });
        assert_eq!(summary.to_string(), "total: 4, with id: 1, coverage: 25.0%");
        assert_eq!(Summary { total: 0, with_id: 0 }.percentage(), 0.0);
    }

    #[test]
    fn test_save_writes_v2() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        std::fs::write(
            &path,
            r#"[{"id":"r1","name":"辛麺屋","category":"spicy","x":10,"y":20}]"#,
        )
        .unwrap();

        let mut dataset = load(&path).unwrap();
        dataset.stores[0].yahoo_store_id = Some("g1".into());
        save(&path, &dataset).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.version, 2);
        assert_eq!(reloaded.pins.len(), 1);
        assert_eq!(reloaded.stores[0].local_search_id(), Some("g1"));
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('{'));
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area("Shibuya"), Ok(Area::Shibuya));
        assert!(parse_area("shinjuku").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "tastemap-backfill",
            "--dataset",
            "x.json",
            "--category",
            "spicy",
            "--dry-run",
            "--client-id",
            "app",
        ])
        .unwrap();
        assert_eq!(cli.dataset, PathBuf::from("x.json"));
        assert_eq!(cli.category, Some(Category::Spicy));
        assert_eq!(cli.delay_ms, 1000);
        assert!(cli.dry_run);
    }
}
