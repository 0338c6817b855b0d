use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ResolvedConfig;
use crate::db::{Database, InsertResult, QueryResult};
use crate::domain::{ArtifactCollections, Classification, ClassificationEntry};
use crate::error::HarvardError;
use crate::harvard::HarvardClient;
use crate::normalize::normalize_records;
use crate::queries;

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedQueryResult {
    pub slug: String,
    pub title: String,
    #[serde(flatten)]
    pub result: QueryResult,
}

/// Pipeline orchestrator: catalog -> paginated fetch -> normalize -> persist.
/// Each stage hands an explicit result object to the next; nothing is kept in
/// ambient session state.
pub struct App<C: HarvardClient> {
    client: C,
    config: ResolvedConfig,
}

impl<C: HarvardClient> App<C> {
    pub fn new(client: C, config: ResolvedConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Load the classification catalog and keep entries at or above the
    /// popularity threshold, in upstream order.
    pub fn classifications(
        &self,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ClassificationEntry>, HarvardError> {
        sink.event(ProgressEvent {
            message: "phase=Catalog; loading classifications".to_string(),
            elapsed: None,
        });
        let records = self.client.fetch_classifications(self.config.catalog_size)?;

        let mut entries = Vec::new();
        for record in &records {
            let entry = classification_entry(record)?;
            if entry.object_count >= self.config.min_object_count {
                entries.push(entry);
            }
        }
        info!(
            total = records.len(),
            kept = entries.len(),
            threshold = self.config.min_object_count,
            "classification catalog loaded"
        );
        Ok(entries)
    }

    /// Fetch every page for one classification and normalize the records into
    /// the three collections. Pure with respect to storage: no writes happen
    /// here, so a failed run never leaves a partial snapshot behind.
    pub fn collect(
        &self,
        classification: &Classification,
        sink: &dyn ProgressSink,
    ) -> Result<ArtifactCollections, HarvardError> {
        let records = self.fetch_all_pages(classification, sink)?;

        sink.event(ProgressEvent {
            message: format!("phase=Normalize; {} records", records.len()),
            elapsed: None,
        });
        let (metadata, media, colors) = normalize_records(&records);
        info!(
            classification = classification.as_str(),
            records = records.len(),
            colors = colors.len(),
            "collection normalized"
        );

        Ok(ArtifactCollections {
            classification: classification.clone(),
            collected_at: chrono::Utc::now().to_rfc3339(),
            metadata,
            media,
            colors,
        })
    }

    /// Persist a collected run, replacing the prior snapshot wholesale.
    pub fn insert(
        &self,
        collections: &ArtifactCollections,
        sink: &dyn ProgressSink,
    ) -> Result<InsertResult, HarvardError> {
        sink.event(ProgressEvent {
            message: format!("phase=Persist; writing to {}", self.config.db_path),
            elapsed: None,
        });
        let mut db = Database::open(&self.config.db_path)?;
        let result = db.replace_collections(collections)?;
        info!(
            metadata = result.metadata_rows,
            media = result.media_rows,
            colors = result.color_rows,
            db = %self.config.db_path,
            "snapshot replaced"
        );
        Ok(result)
    }

    /// Execute one catalog query against the persisted snapshot.
    pub fn run_query(
        &self,
        slug: &str,
        artifact_id: Option<i64>,
        sink: &dyn ProgressSink,
    ) -> Result<NamedQueryResult, HarvardError> {
        let spec = queries::find(slug).ok_or_else(|| HarvardError::UnknownQuery(slug.to_string()))?;
        if spec.needs_artifact_id && artifact_id.is_none() {
            return Err(HarvardError::MissingArtifactId(slug.to_string()));
        }

        sink.event(ProgressEvent {
            message: format!("phase=Query; {slug}"),
            elapsed: None,
        });
        let db = Database::open(&self.config.db_path)?;
        let bound = spec.needs_artifact_id.then_some(artifact_id).flatten();
        let result = db.run_query(spec.sql, bound)?;

        Ok(NamedQueryResult {
            slug: spec.slug.to_string(),
            title: spec.title.to_string(),
            result,
        })
    }

    fn fetch_all_pages(
        &self,
        classification: &Classification,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<Value>, HarvardError> {
        let mut all_records = Vec::new();
        for page in 1..=self.config.max_pages {
            sink.event(ProgressEvent {
                message: format!("phase=Fetch; page {page}"),
                elapsed: None,
            });
            let start = std::time::Instant::now();
            let page_records =
                self.client
                    .fetch_objects_page(classification, self.config.page_size, page)?;
            debug!(
                page,
                records = page_records.len(),
                latency_ms = start.elapsed().as_millis() as u64,
                "object page fetched"
            );
            if page_records.is_empty() {
                break;
            }
            all_records.extend(page_records);

            // Cooperative rate limiting between page requests.
            if page < self.config.max_pages && self.config.page_pause_ms > 0 {
                thread::sleep(Duration::from_millis(self.config.page_pause_ms));
            }
        }
        Ok(all_records)
    }
}

fn classification_entry(record: &Value) -> Result<ClassificationEntry, HarvardError> {
    let name = record
        .get("name")
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            HarvardError::MalformedResponse("classification record has no name".to_string())
        })?;
    let object_count = record
        .get("objectcount")
        .and_then(|value| value.as_i64())
        .ok_or_else(|| {
            HarvardError::MalformedResponse(format!(
                "classification {name} has no objectcount"
            ))
        })?;
    Ok(ClassificationEntry {
        name: name.to_string(),
        object_count,
    })
}
