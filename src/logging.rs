//! Logger construction
//!
//! Nothing here installs a global subscriber. Callers build a [`Dispatch`]
//! and hand it to the pieces that log, which scope their work with
//! [`tracing::dispatcher::with_default`].

use tracing::{Dispatch, Level};

/// Build a stderr logger that emits events at `level` and above
pub fn build_dispatch(level: Level) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}

/// A logger that drops everything
pub fn silent() -> Dispatch {
    Dispatch::none()
}
