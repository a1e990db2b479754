use spotlight::prelude::*;

// usage: spotlight [config.json] [last_frame.png]
fn main() -> Result<(), String> {
    #[cfg(feature = "logs")]
    init_logs(LogConfig::default());

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };
    let output = args.next();

    let mut app = App::new(&config).or_panic("Creating the scene");
    let mut events = FrameBudget::new(config.frames);
    let mut limiter = FpsLimiter::new(LimitMode::from_fps(config.fps));

    let stats = if config.fixed_step {
        let fps = if config.fps == 0 { 60 } else { config.fps };
        let mut clock = FixedClock::from_fps(fps as f32)?;
        app.run(&mut clock, &mut events, &mut limiter)
    } else {
        app.run(&mut FrameClock::new(), &mut events, &mut limiter)
    };

    log::info!(
        "{} frames, {} regions presented, {} rotated images",
        stats.frames,
        stats.present.regions,
        stats.rotations
    );

    if let Some(path) = output {
        app.canvas().save_png(&path)?;
        log::info!("Last frame saved to '{path}'");
    }

    Ok(())
}
