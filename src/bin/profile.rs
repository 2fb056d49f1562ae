use mazeloom::{app::App, config::DEFAULT_DIMENSIONS, logging, solvers::SearchKind};

fn main() {
    let _guard = logging::init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    App::default().profile(
        DEFAULT_DIMENSIONS.rows,
        DEFAULT_DIMENSIONS.cols,
        SearchKind::Bfs,
        iterations,
        Some(7),
    );
}
