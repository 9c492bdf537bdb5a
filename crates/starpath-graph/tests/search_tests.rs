//! Scenario tests for the BFS engine.

use starpath_graph::{
    shortest_path, CancelToken, EntityStore, FrontierOrder, SearchEngine, SearchError,
    StoreBuilder,
};

/// Builds: A -[m1]- B -[m2]- C, with D and E sharing m3 in a separate
/// component, and F a credit-less dead end.
fn chain_store() -> EntityStore {
    let mut builder = StoreBuilder::new();
    for (id, name) in [
        ("1", "A"),
        ("2", "B"),
        ("3", "C"),
        ("4", "D"),
        ("5", "E"),
        ("6", "F"),
    ] {
        builder.add_person(id, name, None);
    }
    builder.add_movie("m1", "First", "2001");
    builder.add_movie("m2", "Second", "2002");
    builder.add_movie("m3", "Elsewhere", "2003");
    for (person, movie) in [
        ("1", "m1"),
        ("2", "m1"),
        ("2", "m2"),
        ("3", "m2"),
        ("4", "m3"),
        ("5", "m3"),
    ] {
        builder.add_credit(person, movie);
    }
    builder.build()
}

fn ext(store: &EntityStore, id: &str) -> starpath_graph::PersonId {
    store.person_by_external(id).unwrap()
}

// ============================================================================
// Scenarios A-D
// ============================================================================

#[test]
fn two_hop_chain_reports_both_edges() {
    let store = chain_store();
    let path = shortest_path(&store, ext(&store, "1"), ext(&store, "3"))
        .unwrap()
        .expect("A and C are connected through B");

    assert_eq!(path.len(), 2);
    assert_eq!(path[0].movie, store.movie_by_external("m1").unwrap());
    assert_eq!(path[0].person, ext(&store, "2"));
    assert_eq!(path[1].movie, store.movie_by_external("m2").unwrap());
    assert_eq!(path[1].person, ext(&store, "3"));
}

#[test]
fn source_equals_target_is_zero_degrees() {
    let store = chain_store();
    let a = ext(&store, "1");
    assert_eq!(shortest_path(&store, a, a).unwrap(), Some(vec![]));
}

#[test]
fn disconnected_components_are_not_found() {
    let store = chain_store();
    let result = shortest_path(&store, ext(&store, "1"), ext(&store, "4")).unwrap();
    assert_eq!(result, None);
}

#[test]
fn four_cycle_shortest_is_two_regardless_of_order() {
    // A -[m1]- B -[m2]- C -[m3]- D -[m4]- A
    let mut builder = StoreBuilder::new();
    for (id, name) in [("1", "A"), ("2", "B"), ("3", "C"), ("4", "D")] {
        builder.add_person(id, name, None);
    }
    for (movie, left, right) in [
        ("m1", "1", "2"),
        ("m2", "2", "3"),
        ("m3", "3", "4"),
        ("m4", "4", "1"),
    ] {
        builder.add_movie(movie, movie, "2000");
        builder.add_credit(left, movie);
        builder.add_credit(right, movie);
    }
    let store = builder.build();

    let path = shortest_path(&store, ext(&store, "1"), ext(&store, "3"))
        .unwrap()
        .expect("cycle is connected");
    assert_eq!(path.len(), 2);
}

// ============================================================================
// Edge cases and failure semantics
// ============================================================================

#[test]
fn unknown_person_fails_before_traversal() {
    let store = chain_store();
    let bogus = starpath_graph::PersonId::new(999);

    let err = shortest_path(&store, bogus, ext(&store, "1")).unwrap_err();
    assert_eq!(err, SearchError::UnknownPerson(bogus));

    let err = shortest_path(&store, ext(&store, "1"), bogus).unwrap_err();
    assert_eq!(err, SearchError::UnknownPerson(bogus));
}

#[test]
fn person_without_credits_is_a_dead_end() {
    let store = chain_store();
    let result = shortest_path(&store, ext(&store, "6"), ext(&store, "1")).unwrap();
    assert_eq!(result, None);
}

#[test]
fn self_loop_credit_is_never_traversed() {
    // One movie whose cast is only A: expanding A must not enqueue A.
    let mut builder = StoreBuilder::new();
    builder.add_person("1", "A", None);
    builder.add_person("2", "B", None);
    builder.add_movie("m1", "Solo", "1999");
    builder.add_credit("1", "m1");
    let store = builder.build();

    let result = shortest_path(&store, ext(&store, "1"), ext(&store, "2")).unwrap();
    assert_eq!(result, None);
}

#[test]
fn multiple_shared_movies_report_the_lowest_id() {
    let mut builder = StoreBuilder::new();
    builder.add_person("1", "A", None);
    builder.add_person("2", "B", None);
    builder.add_movie("m1", "Earlier", "1990");
    builder.add_movie("m2", "Later", "1995");
    for movie in ["m1", "m2"] {
        builder.add_credit("1", movie);
        builder.add_credit("2", movie);
    }
    let store = builder.build();

    let path = shortest_path(&store, ext(&store, "1"), ext(&store, "2"))
        .unwrap()
        .unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].movie, store.movie_by_external("m1").unwrap());
}

// ============================================================================
// Instrumentation
// ============================================================================

#[test]
fn progress_reports_full_component_when_not_found() {
    let store = chain_store();
    let engine = SearchEngine::new(&store).with_progress_interval(1);

    let mut last_explored = 0;
    let result = engine
        .shortest_path_with_progress(ext(&store, "1"), ext(&store, "4"), |progress| {
            last_explored = progress.explored;
        })
        .unwrap();

    assert_eq!(result, None);
    // Component of A is {A, B, C}: every member was dequeued.
    assert_eq!(last_explored, 3);
}

#[test]
fn cancellation_aborts_between_iterations() {
    let store = chain_store();
    let token = CancelToken::new();
    token.cancel();

    let engine = SearchEngine::new(&store).with_cancel_token(token);
    let err = engine
        .shortest_path(ext(&store, "1"), ext(&store, "3"))
        .unwrap_err();
    assert_eq!(err, SearchError::Cancelled);
}

#[test]
fn cancelled_token_does_not_affect_identical_pair() {
    // source == target short-circuits before the loop.
    let store = chain_store();
    let token = CancelToken::new();
    token.cancel();

    let engine = SearchEngine::new(&store).with_cancel_token(token);
    let a = ext(&store, "1");
    assert_eq!(engine.shortest_path(a, a).unwrap(), Some(vec![]));
}

// ============================================================================
// FIFO vs LIFO
// ============================================================================

#[test]
fn lifo_finds_a_path_but_not_necessarily_the_shortest() {
    // Diamond with a long tail: A-B-C plus A-D-E-C. LIFO may take the
    // long way; FIFO never does.
    let mut builder = StoreBuilder::new();
    for (id, name) in [("1", "A"), ("2", "B"), ("3", "C"), ("4", "D"), ("5", "E")] {
        builder.add_person(id, name, None);
    }
    for (movie, left, right) in [
        ("m1", "1", "2"),
        ("m2", "2", "3"),
        ("m3", "1", "4"),
        ("m4", "4", "5"),
        ("m5", "5", "3"),
    ] {
        builder.add_movie(movie, movie, "2000");
        builder.add_credit(left, movie);
        builder.add_credit(right, movie);
    }
    let store = builder.build();
    let (a, c) = (ext(&store, "1"), ext(&store, "3"));

    let fifo = SearchEngine::new(&store)
        .shortest_path(a, c)
        .unwrap()
        .unwrap();
    let lifo = SearchEngine::new(&store)
        .with_order(FrontierOrder::Lifo)
        .shortest_path(a, c)
        .unwrap()
        .unwrap();

    assert_eq!(fifo.len(), 2);
    assert!(fifo.len() <= lifo.len());
}
