/// GridView CLI
///
/// Loads a saved repository search response, applies a query, sort clicks
/// and page selection, then prints the resulting page as a text table.

use clap::Parser;
use gridview::{
    refresh, ColumnSet, FetchOutcome, FileSource, Presentation, ViewConfig, ViewController,
};
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Debug, Parser)]
#[command(name = "gridview", about = "Filter, sort and page a repository listing")]
struct Args {
    /// Search response JSON (`{"items": [...]}`) or a bare array of records
    path: std::path::PathBuf,

    /// Free-text filter applied across all fields
    #[arg(short, long, default_value = "")]
    query: String,

    /// Column to sort by; repeat to toggle the direction
    #[arg(short, long)]
    sort: Vec<String>,

    /// Zero-based page index
    #[arg(short, long, default_value_t = 0)]
    page: usize,

    /// Rows per page (must be one of the configured options)
    #[arg(long)]
    page_size: Option<usize>,
}

const MAX_CELL_WIDTH: usize = 40;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), String> {
    let config = ViewConfig::from_env()?;
    let controller = Rc::new(RefCell::new(ViewController::with_config(
        ColumnSet::repositories(),
        config,
    )?));

    let source = FileSource::new(&args.path);
    if refresh(&Rc::downgrade(&controller), &source).await != FetchOutcome::Applied {
        return Err("fetch was discarded".to_string());
    }

    let mut c = controller.borrow_mut();
    if let Some(size) = args.page_size {
        c.set_page_size(size).map_err(|e| e.to_string())?;
    }
    c.set_query(args.query);
    for column in &args.sort {
        c.set_sort(column).map_err(|e| e.to_string())?;
    }
    if args.page != 0 && !c.set_page(args.page) {
        log::warn!(
            "page {} is out of range, showing page {}",
            args.page,
            c.state().page_index
        );
    }

    print_view(&c);
    match c.presentation() {
        Presentation::Failed { message, .. } => Err(message),
        _ => Ok(()),
    }
}

fn print_view(controller: &ViewController) {
    let columns = controller.columns();
    let state = controller.state();
    let view = controller.view();

    match controller.presentation() {
        Presentation::Loading => println!("Loading..."),
        Presentation::Failed { message, retryable } => {
            println!("Failed: {}", message);
            if retryable {
                println!("(run again to retry)");
            }
        }
        Presentation::NoResults => println!("No results for '{}'", state.query),
        Presentation::Rows => {
            let headers: Vec<String> = columns
                .columns()
                .iter()
                .map(|c| {
                    let marker = match (state.sort_key.as_deref() == Some(c.key), state.sort_direction) {
                        (true, gridview::SortDirection::Ascending) => " ^",
                        (true, gridview::SortDirection::Descending) => " v",
                        _ => "",
                    };
                    format!("{}{}", c.label, marker)
                })
                .collect();
            let rows: Vec<Vec<String>> = view
                .visible_rows()
                .iter()
                .map(|r| columns.row_texts(r).into_iter().map(truncate).collect())
                .collect();

            let widths: Vec<usize> = (0..headers.len())
                .map(|i| {
                    rows.iter()
                        .map(|row| row[i].chars().count())
                        .chain(std::iter::once(headers[i].chars().count()))
                        .max()
                        .unwrap_or(0)
                })
                .collect();

            print_row(&headers, &widths);
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            print_row(&rule, &widths);
            for row in &rows {
                print_row(row, &widths);
            }
        }
    }

    println!(
        "page {}/{} | {} rows per page | {} matching",
        view.page_index() + 1,
        view.page_count().max(1),
        view.page_size(),
        view.total_count()
    );
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    println!("{}", line.join(" | ").trim_end());
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('~');
    cut
}
