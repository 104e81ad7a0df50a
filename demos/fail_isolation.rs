//! Subscriber failure isolation demo
//!
//! Run with: cargo run --example fail_isolation
//!
//! Registers one subscriber that always fails and one that never does, then
//! shows the two broadcast modes: the default stops at the first failure and
//! surfaces the error, the isolated mode logs the failure and keeps going.

use viewport_rs::{SimulatedScreen, SubscriberError, Viewport, ViewportConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("viewport_rs=debug".parse()?),
        )
        .init();

    // Default mode: the first failure halts the broadcast
    let screen = SimulatedScreen::with_width(1000.0);
    let mut strict = Viewport::new(screen.clone());
    strict.add_breakpoint("narrow", "(max-width: 600px)")?;
    strict.register_as("flaky", |_| -> Result<(), SubscriberError> {
        Err("subscriber exploded".into())
    })?;
    strict.register_as("steady", |breakpoint| {
        println!("[strict] steady saw: {}", breakpoint.key());
        Ok(())
    })?;

    screen.set_width(480.0);
    match strict.process_pending() {
        Ok(handled) => println!("[strict] handled {handled} events"),
        Err(error) => println!("[strict] broadcast stopped: {error}"),
    }

    // Isolated mode: the failure is logged and the rest still run
    let screen = SimulatedScreen::with_width(1000.0);
    let mut isolated = Viewport::with_config(
        screen.clone(),
        ViewportConfig::default().isolate_subscribers(true),
    );
    isolated.add_breakpoint("narrow", "(max-width: 600px)")?;
    isolated.register_as("flaky", |_| -> Result<(), SubscriberError> {
        Err("subscriber exploded".into())
    })?;
    isolated.register_as("steady", |breakpoint| {
        println!("[isolated] steady saw: {}", breakpoint.key());
        Ok(())
    })?;

    screen.set_width(480.0);
    let handled = isolated.process_pending()?;
    println!("[isolated] handled {handled} events");

    Ok(())
}
