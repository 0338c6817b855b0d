use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use serde_json::{Value, json};

use harvard_artifacts::app::{App, ProgressEvent, ProgressSink};
use harvard_artifacts::config::ResolvedConfig;
use harvard_artifacts::domain::Classification;
use harvard_artifacts::error::HarvardError;
use harvard_artifacts::harvard::HarvardClient;

struct Silent;

impl ProgressSink for Silent {
    fn event(&self, _event: ProgressEvent) {}
}

/// Serves a fixed page script; anything past the script is an empty page.
struct PagedClient {
    pages: Vec<Vec<Value>>,
    calls: Arc<Mutex<u32>>,
}

impl PagedClient {
    fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl HarvardClient for PagedClient {
    fn fetch_classifications(&self, _size: u32) -> Result<Vec<Value>, HarvardError> {
        Ok(vec![
            json!({"name": "Paintings", "objectcount": 5000}),
            json!({"name": "Sketchbooks", "objectcount": 40}),
            json!({"name": "Coins", "objectcount": 2500}),
        ])
    }

    fn fetch_objects_page(
        &self,
        _classification: &Classification,
        _size: u32,
        page: u32,
    ) -> Result<Vec<Value>, HarvardError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}

/// Never runs out of records; the page cap must stop the loop.
struct EndlessClient {
    page_size: usize,
}

impl HarvardClient for EndlessClient {
    fn fetch_classifications(&self, _size: u32) -> Result<Vec<Value>, HarvardError> {
        Ok(Vec::new())
    }

    fn fetch_objects_page(
        &self,
        _classification: &Classification,
        _size: u32,
        page: u32,
    ) -> Result<Vec<Value>, HarvardError> {
        Ok((0..self.page_size)
            .map(|index| {
                let id = page as usize * 1000 + index;
                json!({"id": id, "objectid": id})
            })
            .collect())
    }
}

fn test_config(db_path: Utf8PathBuf, max_pages: u32) -> ResolvedConfig {
    ResolvedConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://localhost".to_string(),
        db_path,
        page_size: 100,
        max_pages,
        catalog_size: 100,
        min_object_count: 2500,
        page_pause_ms: 0,
    }
}

fn full_page(page: u32, size: usize) -> Vec<Value> {
    (0..size)
        .map(|index| {
            let id = page as usize * 100 + index;
            json!({"id": id, "objectid": id, "title": format!("Object {id}")})
        })
        .collect()
}

#[test]
fn fetcher_concatenates_pages_until_empty() {
    let client = PagedClient::new(vec![full_page(1, 4), full_page(2, 4), full_page(3, 4)]);
    let calls = Arc::clone(&client.calls);
    let app = App::new(client, test_config(Utf8PathBuf::from("unused.db"), 25));

    let collections = app
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap();

    assert_eq!(collections.metadata.len(), 12);
    assert_eq!(collections.media.len(), 12);
    // 3 scripted pages plus the terminating empty page.
    assert_eq!(*calls.lock().unwrap(), 4);
}

#[test]
fn fetcher_stops_at_page_cap() {
    let app = App::new(
        EndlessClient { page_size: 4 },
        test_config(Utf8PathBuf::from("unused.db"), 5),
    );

    let collections = app
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap();

    assert_eq!(collections.metadata.len(), 20);
}

#[test]
fn collections_stay_parallel_with_sparse_records() {
    let pages = vec![vec![
        json!({"id": 1, "objectid": 1, "colors": [{"hue": "Red", "percent": 0.7}]}),
        json!({"id": 2, "objectid": 2}),
        json!({"title": "no ids at all"}),
    ]];
    let app = App::new(
        PagedClient::new(pages),
        test_config(Utf8PathBuf::from("unused.db"), 25),
    );

    let collections = app
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap();

    assert_eq!(collections.metadata.len(), 3);
    assert_eq!(collections.media.len(), 3);
    assert_eq!(collections.colors.len(), 1);
    assert_eq!(collections.metadata[2].id, None);
}

#[test]
fn classifications_filtered_by_threshold_in_upstream_order() {
    let app = App::new(
        PagedClient::new(Vec::new()),
        test_config(Utf8PathBuf::from("unused.db"), 25),
    );

    let entries = app.classifications(&Silent).unwrap();
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["Paintings", "Coins"]);
}

#[test]
fn end_to_end_paintings_snapshot() {
    let temp = tempfile::tempdir().unwrap();
    let db_path = Utf8PathBuf::from_path_buf(temp.path().join("harvard.db")).unwrap();

    let pages = vec![vec![
        json!({
            "id": 100, "objectid": 100, "title": "Harbor Scene",
            "classification": "Paintings",
            "colors": [
                {"color": "#404040", "hue": "Grey", "percent": 0.6, "css3": "#2f4f4f"},
                {"color": "#a08060", "hue": "Brown", "percent": 0.3, "css3": "#d2b48c"}
            ]
        }),
        json!({"id": 101, "objectid": 101, "title": "Portrait", "classification": "Paintings"}),
    ]];
    let app = App::new(PagedClient::new(pages), test_config(db_path, 25));

    let collections = app
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap();
    assert_eq!(collections.metadata.len(), 2);
    assert_eq!(collections.media.len(), 2);
    assert_eq!(collections.colors.len(), 2);

    let inserted = app.insert(&collections, &Silent).unwrap();
    assert_eq!(inserted.metadata_rows, 2);
    assert_eq!(inserted.color_rows, 2);

    let result = app
        .run_query("total-color-entries", None, &Silent)
        .unwrap();
    assert_eq!(result.result.rows[0][0], Value::from(2));

    let by_artifact = app
        .run_query("colors-for-artifact", Some(100), &Silent)
        .unwrap();
    assert_eq!(by_artifact.result.rows.len(), 2);
}

#[test]
fn insert_replaces_prior_snapshot() {
    let temp = tempfile::tempdir().unwrap();
    let db_path = Utf8PathBuf::from_path_buf(temp.path().join("harvard.db")).unwrap();

    let first = App::new(
        PagedClient::new(vec![full_page(1, 3)]),
        test_config(db_path.clone(), 25),
    );
    let collections = first.collect(&"Coins".parse().unwrap(), &Silent).unwrap();
    first.insert(&collections, &Silent).unwrap();

    let second = App::new(
        PagedClient::new(vec![full_page(1, 1)]),
        test_config(db_path, 25),
    );
    let collections = second
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap();
    second.insert(&collections, &Silent).unwrap();

    // One row per surviving metadata record; the first snapshot's three
    // records are gone.
    let result = second
        .run_query("titles-by-accession-year", None, &Silent)
        .unwrap();
    assert_eq!(result.result.rows.len(), 1);
}

#[test]
fn unknown_query_is_an_error() {
    let app = App::new(
        PagedClient::new(Vec::new()),
        test_config(Utf8PathBuf::from("unused.db"), 25),
    );
    let err = app.run_query("no-such-query", None, &Silent).unwrap_err();
    assert_matches!(err, HarvardError::UnknownQuery(_));
}

#[test]
fn parameterized_query_requires_artifact_id() {
    let app = App::new(
        PagedClient::new(Vec::new()),
        test_config(Utf8PathBuf::from("unused.db"), 25),
    );
    let err = app
        .run_query("colors-for-artifact", None, &Silent)
        .unwrap_err();
    assert_matches!(err, HarvardError::MissingArtifactId(_));
}

#[test]
fn fetch_failure_surfaces_before_any_write() {
    struct FailingClient;

    impl HarvardClient for FailingClient {
        fn fetch_classifications(&self, _size: u32) -> Result<Vec<Value>, HarvardError> {
            Err(HarvardError::CatalogHttp("connection refused".to_string()))
        }

        fn fetch_objects_page(
            &self,
            _classification: &Classification,
            _size: u32,
            _page: u32,
        ) -> Result<Vec<Value>, HarvardError> {
            Err(HarvardError::ObjectHttp("connection refused".to_string()))
        }
    }

    let temp = tempfile::tempdir().unwrap();
    let db_path = Utf8PathBuf::from_path_buf(temp.path().join("harvard.db")).unwrap();
    let app = App::new(FailingClient, test_config(db_path.clone(), 25));

    let err = app
        .collect(&"Paintings".parse().unwrap(), &Silent)
        .unwrap_err();
    assert_matches!(err, HarvardError::ObjectHttp(_));
    // Persistence never ran, so no database file was created.
    assert!(!db_path.as_std_path().exists());
}
