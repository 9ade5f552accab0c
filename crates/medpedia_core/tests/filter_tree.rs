use medpedia_core::{apply_filter, TopicId, TopicNode, TopicStore};
use std::collections::BTreeSet;

fn find<'a>(forest: &'a [TopicNode], name: &str) -> Option<&'a TopicNode> {
    forest.iter().find_map(|node| {
        if node.name() == name {
            Some(node)
        } else {
            find(&node.children, name)
        }
    })
}

fn id_of(forest: &[TopicNode], name: &str) -> TopicId {
    find(forest, name).unwrap().id()
}

fn ids_of(forest: &[TopicNode], names: &[&str]) -> BTreeSet<TopicId> {
    names.iter().map(|name| id_of(forest, name)).collect()
}

#[test]
fn leaf_match_reveals_its_ancestor_chain() {
    let store = TopicStore::open_in_memory().unwrap();
    let forest = store.materialize_tree().unwrap();

    let outcome = apply_filter(&forest, "MITO");

    assert_eq!(
        outcome.visible_ids(),
        ids_of(&forest, &["Cellular Biology", "Organelles", "Mitochondria"])
    );
    assert_eq!(
        outcome.expanded_ids(),
        ids_of(&forest, &["Cellular Biology", "Organelles"])
    );
    assert_eq!(outcome.matched_ids(), ids_of(&forest, &["Mitochondria"]));
}

#[test]
fn query_matching_several_branches_keeps_each_chain() {
    let store = TopicStore::open_in_memory().unwrap();
    let forest = store.materialize_tree().unwrap();

    let outcome = apply_filter(&forest, "exam");
    let visible = outcome.visible_ids();

    for name in [
        "Clinical Skills",
        "Physical Examination",
        "Cardiovascular Exam",
        "Respiratory Exam",
        "Neurologic Exam",
    ] {
        assert!(visible.contains(&id_of(&forest, name)), "{name} hidden");
    }
    assert!(!visible.contains(&id_of(&forest, "Terminology")));
    assert!(!visible.contains(&id_of(&forest, "History Taking")));
}

#[test]
fn clearing_query_restores_default_view() {
    let store = TopicStore::open_in_memory().unwrap();
    let forest = store.materialize_tree().unwrap();
    let total: usize = forest.iter().map(TopicNode::subtree_len).sum();

    let narrowed = apply_filter(&forest, "phase");
    assert!(narrowed.visible_ids().len() < total);

    let reset = apply_filter(&forest, "");
    assert_eq!(reset.visible_ids().len(), total);
    assert_eq!(
        reset.expanded_ids(),
        forest.iter().map(TopicNode::id).collect::<BTreeSet<_>>()
    );
}
