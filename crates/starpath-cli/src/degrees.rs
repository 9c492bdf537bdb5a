//! The `degrees` command: resolve two names, search, report the path.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use serde_json::json;

use starpath_graph::{EntityStore, PersonId, SearchEngine, Step};
use starpath_ingest_csv::load_dataset;

use crate::prompt;

pub fn cmd_degrees(
    dir: &Path,
    source: Option<&str>,
    target: Option<&str>,
    json: bool,
) -> Result<()> {
    println!("{}", "Loading data...".dimmed());
    let store = load_dataset(dir).context("failed to load dataset")?;
    println!(
        "Loaded {} people and {} movies.",
        store.person_count(),
        store.movie_count()
    );

    let source = resolve_person(&store, source)?;
    let target = resolve_person(&store, target)?;

    let engine = SearchEngine::new(&store);
    let path = engine.shortest_path_with_progress(source, target, |progress| {
        println!(
            "{}",
            format!(
                "Explored {} states ({} pending in the frontier)",
                progress.explored, progress.frontier
            )
            .dimmed()
        );
    })?;

    match path {
        None => println!("{}", "Not connected.".yellow()),
        Some(path) if json => print_json(&store, source, &path)?,
        Some(path) => print_report(&store, source, &path),
    }
    Ok(())
}

/// Resolve a name to a single person, prompting for the name when not
/// given on the command line and for the intended id when ambiguous.
fn resolve_person(store: &EntityStore, provided: Option<&str>) -> Result<PersonId> {
    let name = match provided {
        Some(name) => name.to_string(),
        None => prompt("Name: ")?,
    };

    match store.resolve_name(&name) {
        [] => bail!("Person not found: {name}"),
        [only] => Ok(*only),
        candidates => disambiguate(store, &name, candidates),
    }
}

fn disambiguate(store: &EntityStore, name: &str, candidates: &[PersonId]) -> Result<PersonId> {
    println!("Which '{name}'?");
    for &id in candidates {
        let person = store
            .person(id)
            .ok_or_else(|| anyhow!("name index points at a missing person"))?;
        println!(
            "  id: {}  name: {}  birth: {}",
            person.external_id.bold(),
            person.name,
            person.birth.as_deref().unwrap_or("unknown")
        );
    }

    let answer = prompt("Intended person id: ")?;
    let id = store
        .person_by_external(&answer)
        .filter(|id| candidates.contains(id))
        .ok_or_else(|| anyhow!("'{answer}' is not one of the listed candidates"))?;
    Ok(id)
}

fn print_report(store: &EntityStore, source: PersonId, path: &[Step]) {
    println!(
        "{}",
        format!("{} degrees of separation.", path.len())
            .green()
            .bold()
    );

    let mut previous = source;
    for (i, step) in path.iter().enumerate() {
        println!(
            "{}: {} and {} starred in {}",
            i + 1,
            person_name(store, previous),
            person_name(store, step.person),
            store
                .movie(step.movie)
                .map(|movie| movie.title.as_str())
                .unwrap_or("?")
        );
        previous = step.person;
    }
}

fn print_json(store: &EntityStore, source: PersonId, path: &[Step]) -> Result<()> {
    let steps: Vec<_> = path
        .iter()
        .map(|step| {
            let movie = store.movie(step.movie);
            let person = store.person(step.person);
            json!({
                "movie": movie.map(|m| json!({
                    "id": m.external_id,
                    "title": m.title,
                    "year": m.year,
                })),
                "person": person.map(|p| json!({
                    "id": p.external_id,
                    "name": p.name,
                })),
            })
        })
        .collect();

    let report = json!({
        "source": person_name(store, source),
        "degrees": path.len(),
        "steps": steps,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn person_name(store: &EntityStore, id: PersonId) -> &str {
    store
        .person(id)
        .map(|person| person.name.as_str())
        .unwrap_or("?")
}
