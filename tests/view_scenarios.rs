//! End-to-end behavior of the view controller over repository listings.

use gridview::{
    Collection, ColumnSet, Presentation, Record, SortDirection, ViewController, ViewStatus,
};
use serde_json::json;

fn collection(stars: &[i64]) -> Collection {
    stars
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Record::from_value(json!({
                "id": 100 + i,
                "name": format!("project-{}", i),
                "owner": { "login": format!("owner-{}", i) },
                "stargazers_count": s,
                "forks_count": 0,
                "language": "JavaScript",
            }))
            .unwrap()
        })
        .collect::<Vec<_>>()
        .into()
}

fn ids(controller: &ViewController) -> Vec<u64> {
    controller
        .view()
        .visible_rows()
        .iter()
        .map(|r| r.get("id").unwrap().as_u64().unwrap())
        .collect()
}

fn stars(controller: &ViewController) -> Vec<i64> {
    controller
        .view()
        .visible_rows()
        .iter()
        .map(|r| r.get("stargazers_count").unwrap().as_i64().unwrap())
        .collect()
}

#[test]
fn descending_stars_keeps_ties_in_source_order() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[10, 5, 5, 20, 1, 5, 8]));
    controller.set_page_size(10).unwrap();

    controller.set_sort("stars").unwrap();
    assert_eq!(controller.state().sort_direction, SortDirection::Ascending);
    assert_eq!(stars(&controller), vec![1, 5, 5, 5, 8, 10, 20]);
    assert_eq!(ids(&controller), vec![104, 101, 102, 105, 106, 100, 103]);

    controller.set_sort("stars").unwrap();
    assert_eq!(controller.state().sort_direction, SortDirection::Descending);
    assert_eq!(stars(&controller), vec![20, 10, 8, 5, 5, 5, 1]);
    // The three 5-star records keep their original positions 1, 2, 5
    assert_eq!(ids(&controller), vec![103, 100, 106, 101, 102, 105, 104]);
}

#[test]
fn sorting_by_another_column_in_between_does_not_swap_ties() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[3, 7, 3, 7, 3]));

    controller.set_sort("stars").unwrap();
    let first = ids(&controller);

    // forks are all equal; sorting by them is a no-op on order
    controller.set_sort("forks").unwrap();
    assert_eq!(ids(&controller), vec![100, 101, 102, 103, 104]);

    controller.set_sort("stars").unwrap();
    assert_eq!(ids(&controller), first);
    assert_eq!(first, vec![100, 102, 104, 101, 103]);
}

#[test]
fn set_page_rejects_out_of_range() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[1; 12]));

    assert_eq!(controller.view().total_count(), 12);
    assert!(!controller.set_page(10));
    assert_eq!(controller.state().page_index, 0);
    assert!(controller.set_page(2));
    assert_eq!(controller.view().visible_rows().len(), 2);
}

#[test]
fn larger_page_size_clamps_page_index() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[1; 12]));

    assert!(controller.set_page(2));
    controller.set_page_size(20).unwrap();
    assert_eq!(controller.state().page_index, 0);
    assert_eq!(controller.view().visible_rows().len(), 12);
}

#[test]
fn visible_length_matches_page_arithmetic() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[1; 23]));

    for size in [5, 10, 20] {
        controller.set_page_size(size).unwrap();
        let pages = controller.view().page_count();
        for page in 0..pages {
            assert!(controller.set_page(page));
            let total = controller.view().total_count();
            let expected = size.min(total.saturating_sub(page * size));
            assert_eq!(controller.view().visible_rows().len(), expected);
        }
    }
}

#[test]
fn empty_and_loading_are_distinct() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.begin_fetch();
    assert_eq!(controller.presentation(), Presentation::Loading);

    controller.load_collection(collection(&[1, 2]));
    controller.set_query("no such project");
    assert_eq!(controller.presentation(), Presentation::NoResults);
    assert_eq!(controller.status(), ViewStatus::Ready);
}

#[test]
fn query_matches_nested_owner_login() {
    let mut controller = ViewController::new(ColumnSet::repositories());
    controller.load_collection(collection(&[1, 2, 3]));
    controller.set_query("OWNER-2");
    assert_eq!(ids(&controller), vec![102]);
}
