// Example: one wheel notch, then let the carousel snap back on its own.
use carousel::{CarouselOptions, Engine, Point, Rect, Surface};

fn main() -> Result<(), carousel::CarouselError> {
    let titles = vec!["Dunes", "Harbor", "Glacier", "Canopy", "Mesa"];
    let mut engine = Engine::new(titles, CarouselOptions::new().with_buffer_size(2))?;
    engine.on_resize(Rect::new(0.0, 0.0, 1280.0, 400.0));

    engine.on_wheel(120.0, Point::new(640.0, 200.0), 0);

    let mut now_ms = 0u64;
    while now_ms < 1_000 {
        // Simulate a 60fps "tick".
        now_ms += 16;
        let report = engine.tick(now_ms);
        if now_ms % 160 == 0 {
            println!(
                "t={now_ms}ms current={:.2} target={:.2} snapping={} range={:?}",
                engine.current_offset(),
                engine.target_offset(),
                report.snapping,
                report.range
            );
        }
    }

    let index = engine.current_index();
    println!(
        "centered: #{} {} at {:?}",
        engine.label_of(index),
        engine.item_at(index),
        engine.transform(Surface::Primary, index)
    );
    Ok(())
}
