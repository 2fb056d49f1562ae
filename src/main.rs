use mazeloom::{app::App, config, logging, maze::Maze};

fn main() -> std::io::Result<()> {
    let dimensions = match config::parse_dimensions(std::env::args().skip(1)) {
        Ok(dimensions) => dimensions,
        Err(error) => {
            eprintln!("{}", error);
            eprintln!("usage: mazeloom [<rows> <cols>]");
            std::process::exit(2);
        }
    };

    let _guard = logging::init();
    tracing::info!(
        "[main] starting with a {}x{} maze",
        dimensions.rows,
        dimensions.cols
    );

    let mut maze = Maze::new(dimensions.rows, dimensions.cols, None);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::default().run(&mut maze);
    App::restore_terminal(&mut stdout)?;
    result
}
