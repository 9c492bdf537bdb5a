//! CSV dataset loader for the starpath graph.
//!
//! Reads the three-file tabular layout into an immutable
//! [`EntityStore`]:
//! - `people.csv`: `id,name,birth`
//! - `movies.csv`: `id,title,year`
//! - `stars.csv`: `person_id,movie_id`
//!
//! Loading is best-effort at the row-reference level: a star row
//! pointing at an unknown person or movie is skipped and counted, not
//! fatal. Missing files and malformed rows are errors.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use starpath_graph::{EntityStore, StoreBuilder};

pub const PEOPLE_FILE: &str = "people.csv";
pub const MOVIES_FILE: &str = "movies.csv";
pub const STARS_FILE: &str = "stars.csv";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ============================================================================
// Row records
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonRow {
    id: String,
    name: String,
    #[serde(default)]
    birth: String,
}

#[derive(Debug, Deserialize)]
struct MovieRow {
    id: String,
    title: String,
    #[serde(default)]
    year: String,
}

#[derive(Debug, Deserialize)]
struct StarRow {
    person_id: String,
    movie_id: String,
}

// ============================================================================
// Loader
// ============================================================================

/// Load a dataset directory into a frozen [`EntityStore`].
pub fn load_dataset(dir: &Path) -> Result<EntityStore, IngestError> {
    let mut builder = StoreBuilder::new();

    for row in read_rows::<PersonRow>(&dir.join(PEOPLE_FILE))? {
        let row = row?;
        let birth = (!row.birth.is_empty()).then_some(row.birth);
        builder.add_person(&row.id, &row.name, birth);
    }

    for row in read_rows::<MovieRow>(&dir.join(MOVIES_FILE))? {
        let row = row?;
        builder.add_movie(&row.id, &row.title, &row.year);
    }

    for row in read_rows::<StarRow>(&dir.join(STARS_FILE))? {
        let row = row?;
        builder.add_credit(&row.person_id, &row.movie_id);
    }

    if builder.skipped_credits() > 0 {
        warn!(
            skipped = builder.skipped_credits(),
            "star rows referenced unknown people or movies"
        );
    }

    let store = builder.build();
    info!(
        people = store.person_count(),
        movies = store.movie_count(),
        "dataset loaded"
    );
    Ok(store)
}

/// Open one CSV file and hand back its deserialized rows, each row
/// error already tagged with the file path.
fn read_rows<T>(
    path: &Path,
) -> Result<impl Iterator<Item = Result<T, IngestError>>, IngestError>
where
    T: for<'de> Deserialize<'de> + 'static,
{
    if !path.exists() {
        return Err(IngestError::MissingFile(path.to_path_buf()));
    }
    let reader = csv::Reader::from_path(path).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let path = path.to_path_buf();
    Ok(reader
        .into_deserialize()
        .map(move |row| {
            row.map_err(|source| IngestError::Csv {
                path: path.clone(),
                source,
            })
        }))
}
