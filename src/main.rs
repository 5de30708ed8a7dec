use std::path::PathBuf;

use softengine::prelude::*;

const USAGE: &str = "usage: softengine [SCENE(.ron|.obj)] [--config FILE.ron] [--screenshot OUT.png]";

#[derive(Debug, Default)]
struct Args {
    scene: Option<PathBuf>,
    config: Option<PathBuf>,
    screenshot: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().ok_or(USAGE)?.into()),
            "--screenshot" => args.screenshot = Some(iter.next().ok_or(USAGE)?.into()),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if arg.starts_with("--") || args.scene.is_some() => return Err(USAGE.to_string()),
            _ => args.scene = Some(arg.into()),
        }
    }
    Ok(args)
}

fn handle_key(engine: &mut Engine, key: Key) {
    match key {
        Key::Num1 => engine.set_render_mode(RenderMode::Points),
        Key::Num2 => engine.set_render_mode(RenderMode::Wireframe),
        Key::Num3 => engine.set_render_mode(RenderMode::Filled),
        Key::F => engine.set_shading_mode(ShadingMode::Flat),
        Key::G => engine.set_shading_mode(ShadingMode::Gouraud),
        Key::T => engine.set_texturing(!engine.texturing()),
    }
    log::info!(
        "{} mode, {} shading, texturing {}",
        engine.render_mode(),
        engine.shading_mode(),
        if engine.texturing() { "on" } else { "off" }
    );
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => RenderConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => RenderConfig::default(),
    };
    let mut meshes = match &args.scene {
        Some(path) => load_meshes(path).map_err(|e| e.to_string())?,
        None => vec![Mesh::cube()],
    };

    let camera = config.camera();
    let [r, g, b, a] = config.clear_color;
    let mut engine = Engine::from_config(&config);

    if let Some(path) = &args.screenshot {
        engine.clear(r, g, b, a);
        engine.render(&camera, &meshes);
        let mut surface = ImageSurface::new();
        match engine.present(&mut surface) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        return surface.save_png(path).map_err(|e| e.to_string());
    }

    let mut window = Window::new(&config.title, config.width, config.height)?;
    let mut frame_limiter = FrameLimiter::new(&window, config.target_fps);

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => engine.resize(w, h),
                WindowEvent::KeyPressed(key) => handle_key(&mut engine, key),
            }
        }

        for mesh in &mut meshes {
            mesh.transform_mut().rotate(config.rotation_delta);
        }

        engine.clear(r, g, b, a);
        engine.render(&camera, &meshes);
        engine.present(&mut window)?;

        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
