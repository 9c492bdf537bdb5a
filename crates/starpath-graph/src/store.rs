//! Immutable entity store for the people/movies bipartite graph.
//!
//! Built once by a loader through [`StoreBuilder`], then frozen. The
//! frozen [`EntityStore`] has no interior mutability, so a shared
//! reference is safe to hand to any number of concurrent searches.

use ahash::AHashMap;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ============================================================================
// Dense ids
// ============================================================================

/// Dense person id (4 bytes), assigned by the builder in insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct PersonId(u32);

impl PersonId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Dense movie id (4 bytes), assigned by the builder in insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct MovieId(u32);

impl MovieId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

// ============================================================================
// Records
// ============================================================================

/// A person in the graph. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    /// Id as it appears in the source dataset.
    pub external_id: String,
    /// Display name; not unique across the dataset.
    pub name: String,
    pub birth: Option<String>,
    /// Dense ids of the movies this person appeared in.
    pub movies: RoaringBitmap,
}

/// A movie in the graph. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Id as it appears in the source dataset.
    pub external_id: String,
    pub title: String,
    pub year: String,
    /// Dense ids of the people credited in this movie.
    pub cast: RoaringBitmap,
}

// ============================================================================
// Entity store
// ============================================================================

/// Read-only store of people, movies, and the name index.
///
/// Invariant: the bipartite adjacency is symmetric: `m` is in
/// `person(p).movies` iff `p` is in `movie(m).cast`. [`StoreBuilder`]
/// maintains both directions on every credit.
#[derive(Debug, Default)]
pub struct EntityStore {
    people: Vec<Person>,
    movies: Vec<Movie>,
    people_by_external: AHashMap<String, PersonId>,
    movies_by_external: AHashMap<String, MovieId>,
    /// Lowercased name -> person ids carrying that name.
    name_index: AHashMap<String, Vec<PersonId>>,
}

impl EntityStore {
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.raw() as usize)
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id.raw() as usize)
    }

    /// Look up a person by their dataset id.
    pub fn person_by_external(&self, external_id: &str) -> Option<PersonId> {
        self.people_by_external.get(external_id).copied()
    }

    /// Look up a movie by its dataset id.
    pub fn movie_by_external(&self, external_id: &str) -> Option<MovieId> {
        self.movies_by_external.get(external_id).copied()
    }

    /// Case-insensitive exact-match name resolution.
    ///
    /// Returns every person carrying the name; empty when unknown. No
    /// partial or fuzzy matching.
    pub fn resolve_name(&self, name: &str) -> &[PersonId] {
        self.name_index
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Iterate all people in dense-id order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates records and credits, then freezes into an [`EntityStore`].
///
/// Credits referencing unknown ids are skipped and counted rather than
/// failing the build; malformed rows are a boundary concern, not a
/// store concern.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    store: EntityStore,
    skipped_credits: u64,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person record. If the external id was already added, the
    /// new record fields win and the name index is rewritten.
    pub fn add_person(
        &mut self,
        external_id: &str,
        name: &str,
        birth: Option<String>,
    ) -> PersonId {
        if let Some(id) = self.store.people_by_external.get(external_id).copied() {
            warn!(external_id, "duplicate person row; last one wins");
            let old_name = self.store.people[id.raw() as usize].name.clone();
            self.unindex_name(&old_name, id);
            let person = &mut self.store.people[id.raw() as usize];
            person.name = name.to_string();
            person.birth = birth;
            self.index_name(name, id);
            return id;
        }

        let id = PersonId::new(self.store.people.len() as u32);
        self.store.people.push(Person {
            id,
            external_id: external_id.to_string(),
            name: name.to_string(),
            birth,
            movies: RoaringBitmap::new(),
        });
        self.store
            .people_by_external
            .insert(external_id.to_string(), id);
        self.index_name(name, id);
        id
    }

    /// Add a movie record. Duplicate external ids: last row wins.
    pub fn add_movie(&mut self, external_id: &str, title: &str, year: &str) -> MovieId {
        if let Some(id) = self.store.movies_by_external.get(external_id).copied() {
            warn!(external_id, "duplicate movie row; last one wins");
            let movie = &mut self.store.movies[id.raw() as usize];
            movie.title = title.to_string();
            movie.year = year.to_string();
            return id;
        }

        let id = MovieId::new(self.store.movies.len() as u32);
        self.store.movies.push(Movie {
            id,
            external_id: external_id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            cast: RoaringBitmap::new(),
        });
        self.store
            .movies_by_external
            .insert(external_id.to_string(), id);
        id
    }

    /// Wire one credit edge, both directions. Returns `false` (and
    /// counts the skip) when either end is unknown.
    pub fn add_credit(&mut self, person_external: &str, movie_external: &str) -> bool {
        let (Some(person_id), Some(movie_id)) = (
            self.store.person_by_external(person_external),
            self.store.movie_by_external(movie_external),
        ) else {
            self.skipped_credits += 1;
            return false;
        };

        self.store.people[person_id.raw() as usize]
            .movies
            .insert(movie_id.raw());
        self.store.movies[movie_id.raw() as usize]
            .cast
            .insert(person_id.raw());
        true
    }

    /// Credits dropped so far because an endpoint was unknown.
    pub fn skipped_credits(&self) -> u64 {
        self.skipped_credits
    }

    /// Freeze into the immutable store.
    pub fn build(self) -> EntityStore {
        self.store
    }

    fn index_name(&mut self, name: &str, id: PersonId) {
        self.store
            .name_index
            .entry(name.to_lowercase())
            .or_default()
            .push(id);
    }

    fn unindex_name(&mut self, name: &str, id: PersonId) {
        if let Some(ids) = self.store.name_index.get_mut(&name.to_lowercase()) {
            ids.retain(|&existing| existing != id);
            if ids.is_empty() {
                self.store.name_index.remove(&name.to_lowercase());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> EntityStore {
        let mut builder = StoreBuilder::new();
        builder.add_person("102", "Kevin Bacon", Some("1958".into()));
        builder.add_person("158", "Tom Hanks", Some("1956".into()));
        builder.add_movie("112384", "Apollo 13", "1995");
        builder.add_credit("102", "112384");
        builder.add_credit("158", "112384");
        builder.build()
    }

    #[test]
    fn adjacency_is_symmetric() {
        let store = small_store();
        let bacon = store.person_by_external("102").unwrap();
        let apollo = store.movie_by_external("112384").unwrap();

        assert!(store.person(bacon).unwrap().movies.contains(apollo.raw()));
        assert!(store.movie(apollo).unwrap().cast.contains(bacon.raw()));
    }

    #[test]
    fn name_resolution_is_case_insensitive() {
        let store = small_store();
        let ids = store.resolve_name("tom HANKS");
        assert_eq!(ids.len(), 1);
        assert_eq!(store.person(ids[0]).unwrap().name, "Tom Hanks");

        assert!(store.resolve_name("Tom Han").is_empty());
    }

    #[test]
    fn shared_names_resolve_to_all_carriers() {
        let mut builder = StoreBuilder::new();
        builder.add_person("1", "Chris Evans", None);
        builder.add_person("2", "Chris Evans", Some("1981".into()));
        let store = builder.build();

        assert_eq!(store.resolve_name("chris evans").len(), 2);
    }

    #[test]
    fn dangling_credit_is_skipped_and_counted() {
        let mut builder = StoreBuilder::new();
        builder.add_person("1", "A", None);
        builder.add_movie("10", "M", "2001");

        assert!(!builder.add_credit("1", "999"));
        assert!(!builder.add_credit("999", "10"));
        assert!(builder.add_credit("1", "10"));
        assert_eq!(builder.skipped_credits(), 2);
    }

    #[test]
    fn duplicate_person_row_last_wins() {
        let mut builder = StoreBuilder::new();
        builder.add_person("1", "Old Name", None);
        builder.add_person("1", "New Name", Some("1970".into()));
        let store = builder.build();

        assert_eq!(store.person_count(), 1);
        assert!(store.resolve_name("old name").is_empty());
        let id = store.resolve_name("new name")[0];
        assert_eq!(store.person(id).unwrap().birth.as_deref(), Some("1970"));
    }
}
