//! Running Man entry point
//!
//! Native builds run a headless session: the autopilot (or an idle stick)
//! drives the simulation until the first run ends or the time limit hits.
//!
//! Usage: `running-man [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use running_man::leaderboard::Request;
    use running_man::settings::Settings;
    use running_man::sim::{GameEvent, GameState, InputSnapshot, autopilot, tick};
    use running_man::format_distance;

    env_logger::init();
    log::info!("Running Man (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::error!("{}; using defaults", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let mut state = GameState::with_policy(seed, settings.pool_exhausted);
    log::info!("Game initialized with seed: {}", seed);

    let tm = settings.tm();
    let mut input = InputSnapshot::default();

    for frame in 0..settings.max_frames() {
        input = if settings.autopilot {
            autopilot::drive(&state, &input)
        } else {
            InputSnapshot::default()
        };
        tick(&mut state, &input, tm);

        for event in state.drain_events() {
            match event {
                GameEvent::ItemCollected { kind } => {
                    log::debug!("Frame {}: collected {:?}", frame, kind);
                }
                GameEvent::RunEnded { distance } => {
                    log::info!("Run ended at {} after {} frames", format_distance(distance), frame + 1);
                    // No transport here; the checksum secret lives with the web host
                    let request = Request::submit(&settings.player_name, distance, &|_: u32| String::new());
                    log::info!("Leaderboard submit (not sent): {}", request.query());
                    return;
                }
            }
        }
    }

    log::info!(
        "Time limit reached at {} (run {})",
        format_distance(state.distance),
        state.run + 1
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}
