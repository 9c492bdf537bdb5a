//! Starpath graph engine
//!
//! Frontier-based breadth-first shortest-path search over the bipartite
//! graph of people and the movies that link them ("degrees of
//! separation").
//!
//! Key design points:
//! 1. **Dense ids**: external dataset ids are interned to dense `u32`
//!    ids at load time; all hot-path structures work on the dense form
//! 2. **Bitmap adjacency**: a person's movies and a movie's cast are
//!    `RoaringBitmap`s, never an explicit edge list; neighbor edges
//!    are derived on demand by joining the two
//! 3. **Indexed frontier membership**: `contains_state` is an O(1)
//!    hash lookup on the person-id component, not a linear scan
//! 4. **Arena-backed search tree**: nodes refer to their parent by
//!    arena index, so sibling nodes share ancestor chains without
//!    reference counting and cycles are impossible by construction
//!
//! The store is immutable after build and may be shared by any number
//! of concurrent searches; each search owns its frontier and explored
//! set.

pub mod error;
pub mod frontier;
pub mod node;
pub mod search;
pub mod store;

pub use error::SearchError;
pub use frontier::{EmptyFrontierError, Frontier, FrontierOrder};
pub use node::{NodeArena, SearchNode, State};
pub use search::{shortest_path, CancelToken, Path, SearchEngine, SearchProgress, Step};
pub use store::{EntityStore, Movie, MovieId, Person, PersonId, StoreBuilder};
