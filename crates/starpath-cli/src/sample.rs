//! The `sample` command: dataset counts plus a random name sample,
//! printed as a mnemonic before the user picks two names to connect.

use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::IteratorRandom;

use starpath_ingest_csv::load_dataset;

pub fn cmd_sample(dir: &Path, count: usize) -> Result<()> {
    let store = load_dataset(dir).context("failed to load dataset")?;
    println!(
        "Loaded {} people and {} movies.",
        store.person_count(),
        store.movie_count()
    );

    let mut rng = rand::thread_rng();
    let mut sampled = store.people().choose_multiple(&mut rng, count);
    sampled.sort_by(|a, b| a.name.cmp(&b.name));
    for person in sampled {
        println!("{}", person.name);
    }
    Ok(())
}
