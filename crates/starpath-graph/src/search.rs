//! Breadth-first shortest-path search over the implicit bipartite graph.
//!
//! The engine drives a [`Frontier`] against an [`EntityStore`]: each
//! iteration dequeues one node, tests it against the goal, marks it
//! explored, and expands its neighbors by joining the person's movies
//! to each movie's cast. The first time the goal is dequeued from a
//! FIFO frontier it is at minimum depth, so the reconstructed path is
//! a true unweighted shortest path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ahash::AHashSet;
use tracing::debug;

use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierOrder};
use crate::node::{NodeArena, State};
use crate::store::{EntityStore, MovieId, PersonId};

/// How often the progress callback fires, in dequeued nodes.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

// ============================================================================
// Results and instrumentation
// ============================================================================

/// One edge of a reconstructed path: the shared movie and the person
/// reached through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Step {
    pub movie: MovieId,
    pub person: PersonId,
}

/// A reconstructed path, one [`Step`] per edge. Empty means source and
/// target were the same person (zero degrees).
pub type Path = Vec<Step>;

/// Snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// States dequeued and expanded so far.
    pub explored: u64,
    /// States currently pending in the frontier.
    pub frontier: u64,
}

/// Cooperative cancellation flag, checked at the top of every
/// expansion iteration. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Search engine over a frozen [`EntityStore`].
///
/// The store reference is shared and read-only; every invocation owns
/// its frontier, arena, and explored set, so one engine (or many) can
/// run searches from separate threads without locking.
#[derive(Debug)]
pub struct SearchEngine<'s> {
    store: &'s EntityStore,
    order: FrontierOrder,
    progress_interval: u64,
    cancel: Option<CancelToken>,
}

impl<'s> SearchEngine<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self {
            store,
            order: FrontierOrder::Fifo,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            cancel: None,
        }
    }

    /// Override the frontier order. LIFO loses the shortest-path
    /// guarantee and exists for contrast and testing.
    pub fn with_order(mut self, order: FrontierOrder) -> Self {
        self.order = order;
        self
    }

    /// Progress callback cadence in dequeued nodes; 0 disables it.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Shortest list of (movie, person) steps connecting `source` to
    /// `target`, or `Ok(None)` when they are in disconnected
    /// components.
    ///
    /// When several movies connect the same pair, the lowest movie id
    /// is reported (adjacency bitmaps iterate ascending). The choice
    /// is deterministic, but callers must not require any *specific*
    /// shared movie.
    pub fn shortest_path(
        &self,
        source: PersonId,
        target: PersonId,
    ) -> Result<Option<Path>, SearchError> {
        self.run(source, target, &mut |_| {})
    }

    /// Same as [`SearchEngine::shortest_path`], invoking `on_progress`
    /// every `progress_interval` dequeued nodes.
    pub fn shortest_path_with_progress<F>(
        &self,
        source: PersonId,
        target: PersonId,
        mut on_progress: F,
    ) -> Result<Option<Path>, SearchError>
    where
        F: FnMut(SearchProgress),
    {
        self.run(source, target, &mut on_progress)
    }

    fn run(
        &self,
        source: PersonId,
        target: PersonId,
        on_progress: &mut dyn FnMut(SearchProgress),
    ) -> Result<Option<Path>, SearchError> {
        if self.store.person(source).is_none() {
            return Err(SearchError::UnknownPerson(source));
        }
        if self.store.person(target).is_none() {
            return Err(SearchError::UnknownPerson(target));
        }
        if source == target {
            return Ok(Some(Path::new()));
        }

        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new(self.order);
        let mut explored: AHashSet<PersonId> = AHashSet::new();
        let mut dequeued: u64 = 0;

        let root = arena.push(
            State {
                movie: None,
                person: source,
            },
            None,
        );
        frontier.add(root, source);

        while !frontier.is_empty() {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(SearchError::Cancelled);
                }
            }

            let index = frontier.remove_next()?;
            let Some(node) = arena.get(index).copied() else {
                continue;
            };

            if node.state.person == target {
                return Ok(Some(reconstruct(&arena, index)));
            }

            explored.insert(node.state.person);
            dequeued += 1;
            if self.progress_interval > 0 && dequeued % self.progress_interval == 0 {
                on_progress(SearchProgress {
                    explored: explored.len() as u64,
                    frontier: frontier.len() as u64,
                });
            }

            self.expand(&mut arena, &mut frontier, &explored, index, node.state.person);
        }

        Ok(None)
    }

    /// Enqueue every co-star of `person` not already explored or
    /// pending. Dangling references in a cast list are skipped; the
    /// loader treats malformed rows as best-effort and the engine
    /// honors that at traversal time.
    fn expand(
        &self,
        arena: &mut NodeArena,
        frontier: &mut Frontier,
        explored: &AHashSet<PersonId>,
        parent: usize,
        person: PersonId,
    ) {
        let Some(record) = self.store.person(person) else {
            return;
        };

        for movie_raw in record.movies.iter() {
            let movie_id = MovieId::new(movie_raw);
            let Some(movie) = self.store.movie(movie_id) else {
                debug!(movie = movie_raw, "skipping dangling movie reference");
                continue;
            };

            for cast_raw in movie.cast.iter() {
                let costar = PersonId::new(cast_raw);
                if costar == person {
                    continue;
                }
                if explored.contains(&costar) || frontier.contains_state(costar) {
                    continue;
                }
                if self.store.person(costar).is_none() {
                    debug!(person = cast_raw, "skipping dangling cast reference");
                    continue;
                }

                let child = arena.push(
                    State {
                        movie: Some(movie_id),
                        person: costar,
                    },
                    Some(parent),
                );
                frontier.add(child, costar);
            }
        }
    }
}

/// BFS shortest path with default options (FIFO, no progress, no
/// cancellation).
pub fn shortest_path(
    store: &EntityStore,
    source: PersonId,
    target: PersonId,
) -> Result<Option<Path>, SearchError> {
    SearchEngine::new(store).shortest_path(source, target)
}

/// Walk parent indices from the goal back to the root, then reverse.
/// The root's placeholder state carries no movie and is dropped, so
/// the result has exactly one step per edge.
fn reconstruct(arena: &NodeArena, goal: usize) -> Path {
    let mut steps = Path::new();
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        let Some(node) = arena.get(index) else {
            break;
        };
        if let Some(movie) = node.state.movie {
            steps.push(Step {
                movie,
                person: node.state.person,
            });
        }
        cursor = node.parent;
    }
    steps.reverse();
    steps
}
