//! Breakpoint watcher demo
//!
//! Run with: cargo run --example breakpoint_watch
//!
//! Registers the usual small/medium/large/xlarge breakpoints against a
//! simulated screen, then sweeps the width down and back up on a second task.
//! Every time the sweep crosses a threshold the subscriber prints the newly
//! active breakpoint. Set `RUST_LOG=viewport_rs=trace` to watch the individual
//! match-state flips.

use std::time::Duration;

use viewport_rs::{SimulatedScreen, Viewport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("viewport_rs=debug".parse()?),
        )
        .init();

    let screen = SimulatedScreen::with_width(1400.0);
    let mut viewport = Viewport::new(screen.clone());

    viewport.add_breakpoint("small", "(max-width: 500px)")?;
    viewport.add_breakpoint("medium", "(max-width: 900px)")?;
    viewport.add_breakpoint("large", "(max-width: 1200px)")?;
    viewport.add_breakpoint("xlarge", "(min-width: 1200px)")?;

    println!("registry order: {:?}", viewport.breakpoint_keys());
    println!();

    viewport.register(|breakpoint| {
        println!(
            "  active breakpoint: {} {}",
            breakpoint.key(),
            breakpoint.media()
        );
        Ok(())
    })?;

    // Sweep the width on a separate task; the viewport processes the
    // resulting events on this one
    let sweep = tokio::spawn(async move {
        for width in [1100.0, 800.0, 450.0, 800.0, 1250.0] {
            println!("viewport width -> {width}px");
            screen.set_width(width);
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
    });

    viewport
        .run_until(async {
            let _ = sweep.await;
        })
        .await?;

    let stats = viewport.stats();
    println!();
    println!(
        "processed {} events, {} broadcasts",
        stats.events_processed, stats.broadcasts
    );

    Ok(())
}
