// Example: a trackpad flick across many slots with engine tracing enabled.
//
// Run with: RUST_LOG=carousel=trace cargo run --example wheel_snap --features tracing
use carousel::{CarouselOptions, Engine, Point, Rect};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), carousel::CarouselError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carousel=debug")),
        )
        .init();

    let mut engine = Engine::new((1..=12).collect::<Vec<u32>>(), CarouselOptions::compact())?;
    engine.on_resize(Rect::new(0.0, 0.0, 900.0, 600.0));
    let pointer = Point::new(450.0, 300.0);

    let mut now_ms = 0u64;
    for delta in [40.0, 120.0, 300.0, 300.0, 300.0, 180.0, 60.0, 20.0] {
        now_ms += 8;
        engine.on_wheel(delta, pointer, now_ms);
        engine.tick(now_ms);
    }

    while !engine.is_at_rest() {
        now_ms += 16;
        engine.tick(now_ms);
    }

    let state = engine.frame_state();
    println!(
        "settled at t={now_ms}ms on #{} ({:?})",
        engine.label_of(engine.current_index()),
        state
    );
    Ok(())
}
