use serde_json::Value;

use crate::domain::{ColorRow, MediaRow, MetadataRow};

/// Project one raw object record into its three relation rows. Extraction is
/// total: a missing or mistyped field becomes `None`, never an error, and a
/// record without a `colors` list contributes zero color rows.
pub fn normalize_record(record: &Value) -> (MetadataRow, MediaRow, Vec<ColorRow>) {
    let object_id = int_field(record, "objectid");

    let metadata = MetadataRow {
        id: int_field(record, "id"),
        title: text_field(record, "title"),
        culture: text_field(record, "culture"),
        period: text_field(record, "period"),
        century: text_field(record, "century"),
        medium: text_field(record, "medium"),
        dimensions: text_field(record, "dimensions"),
        description: text_field(record, "description"),
        department: text_field(record, "department"),
        classification: text_field(record, "classification"),
        accessionyear: int_field(record, "accessionyear"),
        accessionmethod: text_field(record, "accessionmethod"),
    };

    let media = MediaRow {
        objectid: object_id,
        imagecount: int_field(record, "imagecount"),
        mediacount: int_field(record, "mediacount"),
        colorcount: int_field(record, "colorcount"),
        rank: int_field(record, "rank"),
        datebegin: int_field(record, "datebegin"),
        dateend: int_field(record, "dateend"),
    };

    let colors = record
        .get("colors")
        .and_then(|value| value.as_array())
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ColorRow {
                    objectid: object_id,
                    color: text_field(entry, "color"),
                    spectrum: text_field(entry, "spectrum"),
                    hue: text_field(entry, "hue"),
                    percent: entry.get("percent").and_then(|value| value.as_f64()),
                    css3: text_field(entry, "css3"),
                })
                .collect()
        })
        .unwrap_or_default();

    (metadata, media, colors)
}

/// Fan a fetched record sequence out into three parallel collections,
/// preserving record order (color rows keep per-record list order first,
/// record order second).
pub fn normalize_records(
    records: &[Value],
) -> (Vec<MetadataRow>, Vec<MediaRow>, Vec<ColorRow>) {
    let mut metadata = Vec::with_capacity(records.len());
    let mut media = Vec::with_capacity(records.len());
    let mut colors = Vec::new();
    for record in records {
        let (metadata_row, media_row, color_rows) = normalize_record(record);
        metadata.push(metadata_row);
        media.push(media_row);
        colors.extend(color_rows);
    }
    (metadata, media, colors)
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|value| value.as_str())
        .map(|value| value.to_string())
}

fn int_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(|value| value.as_i64())
}
