/// Repository Listing Example
///
/// This example demonstrates:
/// - Loading a search response through a source provider
/// - Filtering across all fields, including the nested owner login
/// - Toggling the sort direction on a column
/// - Paging and changing the page size
/// - Observing recomputes through a subscription

use gridview::{refresh, ColumnSet, StaticSource, ViewController, ViewSnapshot};
use std::cell::RefCell;
use std::rc::Rc;

const SEARCH_RESPONSE: &str = r#"{
    "total_count": 8,
    "incomplete_results": false,
    "items": [
        {"id": 10270250, "name": "react", "description": "The library for web and native user interfaces.", "owner": {"login": "facebook"}, "stargazers_count": 229000, "forks_count": 47000, "language": "JavaScript"},
        {"id": 11730342, "name": "vue", "description": "This is the repo for Vue 2.", "owner": {"login": "vuejs"}, "stargazers_count": 208000, "forks_count": 33600, "language": "TypeScript"},
        {"id": 943149, "name": "d3", "description": "Bring data to life with SVG, Canvas and HTML.", "owner": {"login": "d3"}, "stargazers_count": 109000, "forks_count": 22800, "language": "JavaScript"},
        {"id": 23088740, "name": "axios", "description": "Promise based HTTP client for the browser and node.js", "owner": {"login": "axios"}, "stargazers_count": 105000, "forks_count": 10900, "language": "JavaScript"},
        {"id": 576201, "name": "three.js", "description": "JavaScript 3D Library.", "owner": {"login": "mrdoob"}, "stargazers_count": 101000, "forks_count": 35300, "language": "JavaScript"},
        {"id": 237159, "name": "express", "description": "Fast, unopinionated, minimalist web framework for node.", "owner": {"login": "expressjs"}, "stargazers_count": 64600, "forks_count": 15800, "language": "JavaScript"},
        {"id": 2126244, "name": "bootstrap", "description": "The most popular HTML, CSS, and JavaScript framework.", "owner": {"login": "twbs"}, "stargazers_count": 170000, "forks_count": 78800, "language": "JavaScript"},
        {"id": 5483330, "name": "node-sass", "description": null, "owner": {"login": "sass"}, "stargazers_count": 8500, "forks_count": 1300, "language": null}
    ]
}"#;

fn print_page(controller: &ViewController) {
    let columns = controller.columns();
    for row in controller.view().visible_rows() {
        let cells = columns.row_texts(row);
        println!("   {:<12} {:<12} {:>8} {:>8}", cells[0], cells[2], cells[3], cells[4]);
    }
    println!(
        "   -- page {} of {}, {} matching\n",
        controller.view().page_index() + 1,
        controller.view().page_count(),
        controller.view().total_count()
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== GridView Repository Listing Example ===\n");

    let controller = Rc::new(RefCell::new(ViewController::new(ColumnSet::repositories())));
    controller.borrow_mut().subscribe(|c| {
        println!("   [recomputed: {} rows visible]", c.view().visible_rows().len());
    });

    // 1. Fetch
    println!("1. Fetching repositories...");
    let source = StaticSource::from_json(SEARCH_RESPONSE).expect("valid payload");
    let outcome = refresh(&Rc::downgrade(&controller), &source).await;
    println!("   Fetch outcome: {:?}", outcome);
    print_page(&controller.borrow());

    let mut c = controller.borrow_mut();

    // 2. Sort by stars, then flip to descending
    println!("2. Sorting by stars (click twice for descending)...");
    c.set_sort("stars").unwrap();
    c.set_sort("stars").unwrap();
    print_page(&c);

    // 3. Next page
    println!("3. Going to page 2...");
    c.set_page(1);
    print_page(&c);

    // 4. Filter
    println!("4. Filtering for 'node'...");
    c.set_query("node");
    print_page(&c);

    // 5. Page size
    println!("5. Showing 20 rows per page without a filter...");
    c.set_query("");
    c.set_page_size(20).unwrap();
    print_page(&c);

    // 6. Snapshot for a renderer
    println!("6. Snapshot as JSON:");
    let snapshot = ViewSnapshot::capture(&c);
    println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
}
