//! Exercises the reference graph, redefinition-triggered recompilation, vocabulary
//! shadowing/privacy, the vocabulary resolver's caching, and provenance propagation through
//! the card store — the properties that make this dialect more than a plain Forth.

use borth::create_runtime;
use borth::runtime::data_structures::vocabulary::VocabularyRef;
use borth::runtime::resolver::VocabularyFactory;
use std::rc::Rc;

#[tokio::test]
async fn redefining_a_word_rebinds_every_dependent_without_redefining_them() {
    let runtime = create_runtime();
    runtime
        .run("<test>", "in: t ; : foo 1 ; : bar foo ; bar")
        .await
        .unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), 1);

    runtime.run("<test>", ": foo 2 ; bar").await.unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), 2);
}

#[tokio::test]
async fn redefinition_propagates_transitively_through_a_chain() {
    let runtime = create_runtime();
    runtime
        .run("<test>", "in: t ; : a 1 ; : b a ; : c b ; c")
        .await
        .unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), 1);

    runtime.run("<test>", ": a 99 ; c").await.unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), 99);
}

#[tokio::test]
async fn old_binding_loses_its_dependents_and_the_new_one_gains_them() {
    let runtime = create_runtime();
    runtime
        .run("<test>", "in: t ; : foo 1 ; : bar foo ;")
        .await
        .unwrap();

    let old_foo = runtime.find("foo").unwrap();
    assert!(!old_foo.borrow().referenced_by.is_empty());

    runtime.run("<test>", ": foo 2 ;").await.unwrap();

    assert!(old_foo.borrow().referenced_by.is_empty());

    let new_foo = runtime.find("foo").unwrap();
    assert_ne!(old_foo, new_foo);

    let bar = runtime.find("bar").unwrap();
    assert!(bar.borrow().references.contains(&new_foo));
    assert!(!bar.borrow().references.contains(&old_foo));
}

#[tokio::test]
async fn repeated_redefinition_of_the_same_chain_does_not_blow_up() {
    // Recompile only ever touches the single dependent being rewired, never recursing into
    // that dependent's own dependents, so redefining the root of a chain repeatedly is safe
    // regardless of how long the chain is.
    let runtime = create_runtime();
    runtime
        .run("<test>", "in: t ; : a 1 ; : b a ; : c b ; : d c ;")
        .await
        .unwrap();

    for n in 0..5 {
        runtime.run("<test>", &format!(": a {} ;", n)).await.unwrap();
        runtime.run("<test>", "d").await.unwrap();
        assert_eq!(runtime.pop_as_int().unwrap(), n);
    }
}

#[tokio::test]
async fn shadowing_prefers_the_most_recently_defined_binding() {
    let runtime = create_runtime();
    runtime.run("<test>", "in: v1 ; : greet ' hello ;").await.unwrap();
    runtime.run("<test>", "in: v2 ; : greet ' hi ;").await.unwrap();

    runtime.run("<test>", "greet").await.unwrap();
    assert_eq!(runtime.pop_as_string().unwrap(), "hi");
}

#[tokio::test]
async fn private_words_are_invisible_outside_their_own_vocabulary() {
    let runtime = create_runtime();
    runtime.run("<test>", "in: utils ; :_ internal 42 ;").await.unwrap();

    let utils = runtime.find_vocabulary("utils").unwrap();
    assert!(utils.lookup("internal", false).is_none());
    assert!(utils.lookup("internal", true).is_some());

    // Running the private word from a different current vocabulary fails to resolve it —
    // `find` only grants private visibility to the owning vocabulary.
    runtime.run("<test>", "in: other ;").await.unwrap();
    let result = runtime.run("<test>", "internal").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn using_establishes_dependency_and_dependent_edges_once() {
    let runtime = create_runtime();
    runtime.run("<test>", "in: lib ; : helper 7 ;").await.unwrap();
    runtime.run("<test>", "in: app ; using: lib ;").await.unwrap();

    let app = runtime.find_vocabulary("app").unwrap();
    let lib = runtime.find_vocabulary("lib").unwrap();

    assert_eq!(app.dependencies().len(), 1);
    assert_eq!(app.dependencies()[0], lib);
    assert_eq!(lib.dependents().len(), 1);
    assert_eq!(lib.dependents()[0], app);

    // Re-importing is a no-op, not a duplicate entry.
    runtime.run("<test>", "using: lib ;").await.unwrap();
    assert_eq!(app.dependencies().len(), 1);
}

#[tokio::test]
async fn resolver_caches_a_materialized_vocabulary() {
    let runtime = create_runtime();
    let calls = Rc::new(std::cell::RefCell::new(0));
    let calls_clone = calls.clone();

    let factory: VocabularyFactory = Rc::new(move |_runtime| {
        let calls = calls_clone.clone();
        Box::pin(async move {
            *calls.borrow_mut() += 1;
            Ok(VocabularyRef::new("lazy"))
        })
    });
    runtime.resolver().register("lazy", factory);

    let first = runtime.resolver().resolve(&runtime, "lazy").await.unwrap();
    let second = runtime.resolver().resolve(&runtime, "lazy").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(*calls.borrow(), 1);
}

#[tokio::test]
async fn recompilation_preserves_provenance_across_a_rebind() {
    use borth::storage::Store;
    use borth::Runtime;
    use std::sync::Arc;

    let store = Store::open_in_memory().unwrap();
    let base_card = store.create_card(None, "in: shared ; : base 1 ;").unwrap();
    let user_card = store.create_card(None, "in: shared ; : user base ;").unwrap();

    let runtime = Runtime::with_store(Arc::new(store));
    let store = runtime.store().unwrap();
    runtime.run_card(base_card).await.unwrap();
    runtime.run_card(user_card).await.unwrap();

    let user = runtime.find("user").unwrap();
    let provenance = user.borrow().provenance.clone().unwrap();
    assert_eq!(provenance.card_id, user_card);
    assert_eq!(provenance.version, 0);

    store.edit_card(base_card, "in: shared ; : base 2 ;").unwrap();
    runtime.run_card(base_card).await.unwrap();

    // `user` itself was never redefined, so its provenance is untouched even though its
    // behavior changed.
    let provenance_after = user.borrow().provenance.clone().unwrap();
    assert_eq!(provenance_after.card_id, user_card);
    assert_eq!(provenance_after.version, 0);

    runtime.run("<test>", "in: shared ; user").await.unwrap();
    assert_eq!(runtime.pop_as_int().unwrap(), 2);
}

#[tokio::test]
async fn in_core_is_rejected_and_define_without_current_fails() {
    let runtime = create_runtime();
    assert!(runtime.run("<test>", "in: core ;").await.is_err());

    let runtime = create_runtime();
    assert!(runtime.run("<test>", "variable x").await.is_err());
}
