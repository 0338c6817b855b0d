//! Static catalog of named read-only queries over the three relations.
//! Each entry maps a stable slug to a human title and a SQL template; exactly
//! one template (`colors-for-artifact`) takes an artifact id parameter.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuerySpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
    pub needs_artifact_id: bool,
}

pub fn find(slug: &str) -> Option<&'static QuerySpec> {
    CATALOG.iter().find(|spec| spec.slug == slug)
}

pub fn catalog() -> &'static [QuerySpec] {
    CATALOG
}

const CATALOG: &[QuerySpec] = &[
    // artifact_metadata
    QuerySpec {
        slug: "byzantine-11th-century",
        title: "Artifacts from the 11th century belonging to Byzantine culture",
        sql: "SELECT * FROM artifact_metadata WHERE century = '11th century' AND culture = 'Byzantine'",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "unique-cultures",
        title: "Unique cultures represented in the artifacts",
        sql: "SELECT DISTINCT culture FROM artifact_metadata",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "archaic-period",
        title: "Artifacts from the Archaic Period",
        sql: "SELECT * FROM artifact_metadata WHERE period = 'Archaic Period'",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "titles-by-accession-year",
        title: "Artifact titles ordered by accession year, newest first",
        sql: "SELECT title, accessionyear FROM artifact_metadata ORDER BY accessionyear DESC",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "artifacts-per-department",
        title: "Artifact count per department",
        sql: "SELECT department, COUNT(*) AS total FROM artifact_metadata GROUP BY department",
        needs_artifact_id: false,
    },
    // artifact_media
    QuerySpec {
        slug: "multiple-images",
        title: "Artifacts with more than one image",
        sql: "SELECT * FROM artifact_media WHERE imagecount > 1",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "average-rank",
        title: "Average rank of all artifacts",
        sql: "SELECT AVG(rank) AS average_rank FROM artifact_media",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "colorcount-above-mediacount",
        title: "Artifacts with a higher colorcount than mediacount",
        sql: "SELECT * FROM artifact_media WHERE colorcount > mediacount",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "created-1500-1600",
        title: "Artifacts created between 1500 and 1600",
        sql: "SELECT * FROM artifact_media WHERE datebegin >= 1500 AND dateend <= 1600",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "no-media",
        title: "Number of artifacts with no media files",
        sql: "SELECT COUNT(*) AS no_media_count FROM artifact_media WHERE mediacount = 0",
        needs_artifact_id: false,
    },
    // artifact_colors
    QuerySpec {
        slug: "distinct-hues",
        title: "Distinct hues used in the dataset",
        sql: "SELECT DISTINCT hue FROM artifact_colors",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "top-5-colors",
        title: "Top 5 most used colors by frequency",
        sql: "SELECT color, COUNT(*) AS frequency FROM artifact_colors GROUP BY color ORDER BY frequency DESC LIMIT 5",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "average-coverage-per-hue",
        title: "Average coverage percentage for each hue",
        sql: "SELECT hue, AVG(percent) AS avg_coverage FROM artifact_colors GROUP BY hue",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "colors-for-artifact",
        title: "Colors used for a given artifact id",
        sql: "SELECT * FROM artifact_colors WHERE objectid = ?1",
        needs_artifact_id: true,
    },
    QuerySpec {
        slug: "total-color-entries",
        title: "Total number of color entries in the dataset",
        sql: "SELECT COUNT(*) AS total_colors FROM artifact_colors",
        needs_artifact_id: false,
    },
    // joins
    QuerySpec {
        slug: "byzantine-titles-and-hues",
        title: "Artifact titles and hues for Byzantine artifacts",
        sql: "SELECT m.title, c.hue FROM artifact_metadata m JOIN artifact_colors c ON m.id = c.objectid WHERE m.culture = 'Byzantine'",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "titles-with-hues",
        title: "Each artifact title with its associated hues",
        sql: "SELECT m.title, c.hue FROM artifact_metadata m JOIN artifact_colors c ON m.id = c.objectid",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "titles-cultures-ranks",
        title: "Titles, cultures and media ranks where the period is not null",
        sql: "SELECT m.title, m.culture, me.rank FROM artifact_metadata m JOIN artifact_media me ON m.id = me.objectid WHERE m.period IS NOT NULL",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "top-10-grey",
        title: "Top ranked artifact titles that include the hue Grey",
        sql: "SELECT m.title, me.rank, c.hue FROM artifact_metadata m JOIN artifact_media me ON m.id = me.objectid JOIN artifact_colors c ON m.id = c.objectid WHERE c.hue = 'Grey' ORDER BY me.rank DESC LIMIT 10",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "per-classification-media",
        title: "Artifact count and average media count per classification",
        sql: "SELECT m.classification, COUNT(*) AS total, AVG(me.mediacount) AS avg_media FROM artifact_metadata m JOIN artifact_media me ON m.id = me.objectid GROUP BY m.classification",
        needs_artifact_id: false,
    },
    // insight queries
    QuerySpec {
        slug: "common-mediums",
        title: "Most common mediums used across artifacts",
        sql: "SELECT medium, COUNT(*) AS count FROM artifact_metadata GROUP BY medium ORDER BY count DESC LIMIT 10",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "missing-descriptions",
        title: "Artifacts with missing descriptions",
        sql: "SELECT id, title, culture, classification FROM artifact_metadata WHERE description IS NULL OR description = ''",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "avg-accession-year",
        title: "Average accession year by classification",
        sql: "SELECT classification, AVG(accessionyear) AS avg_year FROM artifact_metadata GROUP BY classification ORDER BY avg_year DESC",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "longest-time-span",
        title: "Artifacts with the longest span between creation dates",
        sql: "SELECT objectid, datebegin, dateend, (dateend - datebegin) AS duration FROM artifact_media ORDER BY duration DESC LIMIT 10",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "top-5-departments",
        title: "Top 5 departments by artifact count",
        sql: "SELECT department, COUNT(*) AS total FROM artifact_metadata GROUP BY department ORDER BY total DESC LIMIT 5",
        needs_artifact_id: false,
    },
    QuerySpec {
        slug: "most-frequent-hue",
        title: "Most frequently used hue across all artifacts",
        sql: "SELECT hue, COUNT(*) AS frequency FROM artifact_colors GROUP BY hue ORDER BY frequency DESC LIMIT 1",
        needs_artifact_id: false,
    },
];
