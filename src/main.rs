//! Demo binary: wires up logging and drives the engine through one scripted
//! session. The engine itself is a library (see `lib.rs`); this binary plays
//! the role an HTTP/RPC adapter or application shell would in production,
//! scaled down to a smoke-test driver since no such surface is in scope here.

use queue_engine::Manager;

fn initialize_logging() {
    let mut clog = colog::basic_builder();
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        // Respect explicit user overrides completely when RUST_LOG is set.
        clog.parse_filters(&rust_log);
    } else {
        // Default policy: full engine diagnostics, warnings/errors from dependencies.
        clog.filter(None, log::LevelFilter::Warn);
        clog.filter(Some("queue_engine"), log::LevelFilter::Debug);
    }
    clog.init();
}

fn main() {
    initialize_logging();

    let mut manager = Manager::new();

    manager.add_song(1, "Alpha", "Artist One", 10, 40);
    manager.add_song(2, "Beta", "Artist Two", 3, 5);
    manager.add_song(3, "Gamma Ray", "Artist Three", 8, 12);

    log::info!("queue after adds: {:?}", manager.queue_snapshot());
    log::info!("currently playing: {}", manager.current_song());

    manager.skip_next();
    log::info!("after skip_next, currently playing: {}", manager.current_song());

    manager.move_up(3);
    log::info!("queue after move_up(3): {:?}", manager.queue_snapshot());

    log::info!("recommendations: {:?}", manager.recommendations(3));
    log::info!("search 'ga': {:?}", manager.search_songs("ga"));

    manager.undo();
    log::info!("queue after undo: {:?}", manager.queue_snapshot());
}
