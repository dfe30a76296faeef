// Example: a mounted carousel driven by a ticker, printing what each frame does to a headless
// render host.
//
// Run with: RUST_LOG=carousel_adapter=trace cargo run -p carousel-adapter --example mounted_loop --features tracing
use carousel::{
    CarouselOptions, Engine, InputEvent, Point, Rect, Surface, SurfaceTransform, VirtualIndex,
};
use carousel_adapter::{Controller, Mounted, RenderHost, StaleHandle, Ticker};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct PrintHost {
    next: u64,
}

impl RenderHost<&'static str> for PrintHost {
    type Handle = (u64, Surface, VirtualIndex);

    fn mount(
        &mut self,
        surface: Surface,
        index: VirtualIndex,
        label: &str,
        item: &&'static str,
    ) -> Self::Handle {
        self.next += 1;
        println!("mount   {surface:?} {index:>3} #{label} {item}");
        (self.next, surface, index)
    }

    fn apply(&mut self, _: &Self::Handle, _: SurfaceTransform) -> Result<(), StaleHandle> {
        Ok(())
    }

    fn release(&mut self, (_, surface, index): Self::Handle) {
        println!("release {surface:?} {index:>3}");
    }
}

fn main() -> Result<(), carousel::CarouselError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carousel=debug,carousel_adapter=debug")),
        )
        .init();

    let items = vec!["dunes", "harbor", "glacier", "canyon", "meadow", "atoll"];
    let engine = Engine::new(items, CarouselOptions::new().with_buffer_size(2))?;
    let ticker = Ticker::new();
    let mounted = Mounted::mount(
        &ticker,
        Controller::with_surfaces(engine, PrintHost::default(), &[Surface::Primary]),
    );

    let pointer = Point::new(320.0, 240.0);
    let mut now_ms = 0u64;
    let _ = mounted.dispatch(
        InputEvent::Resize {
            bounds: Rect::new(0.0, 0.0, 640.0, 480.0),
        },
        now_ms,
    );
    ticker.tick(now_ms);

    for _ in 0..8 {
        now_ms += 16;
        let _ = mounted.dispatch(
            InputEvent::Wheel {
                delta: 200.0,
                position: pointer,
            },
            now_ms,
        );
        ticker.tick(now_ms);
    }

    while !mounted.last_frame().is_some_and(|f| f.at_rest) {
        now_ms += 16;
        ticker.tick(now_ms);
    }
    println!("at rest after {now_ms}ms");

    let released = mounted.unmount();
    println!("unmounted, {released} handles released");
    Ok(())
}
