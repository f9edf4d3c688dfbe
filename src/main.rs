// What you SEE now:
// • Live camera, with everything close to the mask hue rotated to the replace hue.
// • Click: pick the mask hue from the raw pixel under the cursor.
// • Left/Right: rotate the replace hue. Up/Down: widen/narrow the match.
// • Space toggles bypass (raw feed). R resets to the configured colors. ESC quits.

mod camera;
mod cli;
mod draw;

use camera::CameraCapture;
use clap::Parser;
use cli::{Cli, Command, EffectArgs, LiveArgs, StillArgs};
use draw::{Drawer, draw_crosshair, draw_hud};
use hue_swap::config::Config;
use hue_swap::still::recolor_file;
use hue_swap::{Controls, Error, Parameters, PixelBuffer, Rgb, process_frame, process_frame_par};
use std::time::{Duration, Instant};

/// Resolved effect settings: CLI flags over config file values.
struct Effect {
    mask: Rgb,
    replace: Rgb,
    threshold: f32,
    parallel: bool,
}

impl Effect {
    fn resolve(args: &EffectArgs, config: &Config) -> Result<Self, Error> {
        let mask = match args.mask {
            Some(c) => c,
            None => config.effect.mask_color()?,
        };
        let replace = match args.replace {
            Some(c) => c,
            None => config.effect.replace_color()?,
        };
        Ok(Self {
            mask,
            replace,
            threshold: args.threshold.unwrap_or(config.effect.threshold),
            parallel: config.effect.parallel && !args.sequential,
        })
    }

    fn recolor(&self, frame: &mut PixelBuffer, params: &Parameters) {
        if self.parallel {
            process_frame_par(frame, params);
        } else {
            process_frame(frame, params);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Some(Command::Still(args)) => run_still(&args, &config),
        Some(Command::Live(args)) => run_live(&args, &config),
        None => run_live(&LiveArgs::default(), &config),
    }
}

/// Recolor one image file and write the result.
fn run_still(args: &StillArgs, config: &Config) -> Result<(), Error> {
    let effect = Effect::resolve(&args.effect, config)?;
    let params = Parameters::from_colors(effect.mask, effect.replace, effect.threshold);

    log::info!(
        "Recoloring {}: mask {} -> replace {}, threshold {:.2}",
        args.input.display(),
        effect.mask,
        effect.replace,
        effect.threshold
    );

    let (w, h) = recolor_file(&args.input, &args.output, &params, effect.parallel)?;
    log::info!("Wrote {} ({w}x{h})", args.output.display());
    Ok(())
}

/// The frame loop: pull a frame, recolor it with this frame's snapshot, overlay the HUD, present.
fn run_live(args: &LiveArgs, config: &Config) -> Result<(), Error> {
    let effect = Effect::resolve(&args.effect, config)?;
    let defaults = Controls::from_colors(effect.mask, effect.replace, effect.threshold);
    let mut controls = defaults;

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let (req_w, req_h) = args.resolution.unwrap_or((config.camera.width, config.camera.height));
    let mut cam = CameraCapture::new(args.camera.unwrap_or(config.camera.index), req_w, req_h)?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new("Hue Swap", w as usize, h as usize)?;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Grab a fresh live frame (what the camera sees right now). */
        let mut frame = cam.next_frame()?;

        /* 2) Inputs: only ever touch `controls` here, between frames. */
        if drawer.left_clicked() {
            // sample the raw frame, before recoloring
            if let Some((mx, my)) = drawer.mouse_pos() {
                if let Some(px) = frame.pixel(mx, my) {
                    controls.pick_mask(Rgb::from_pixel(&px));
                    log::debug!("Mask hue picked at ({mx},{my}): {:.3}", controls.mask_hue);
                }
            }
        }
        let dh = drawer.horizontal_steps();
        if dh != 0 {
            controls.rotate_replace(dh);
            log::debug!("Replace hue: {:.3}", controls.replace_hue);
        }
        let dv = drawer.vertical_steps();
        if dv != 0 {
            controls.nudge_threshold(dv);
            log::debug!("Threshold: {:.2}", controls.threshold);
        }
        if drawer.space_pressed_once() {
            controls.toggle_bypass();
            log::debug!("Bypass: {}", controls.bypass);
        }
        if drawer.r_pressed_once() {
            controls = defaults;
            log::debug!("Controls reset");
        }

        /* 3) Recolor with one consistent snapshot for the whole frame. */
        let params = controls.snapshot();
        if !controls.bypass {
            effect.recolor(&mut frame, &params);
        }

        /* 4) HUD: swatches, values, crosshair. */
        draw_hud(&mut frame, &controls, &hud_fps_text);
        if let Some((mx, my)) = drawer.mouse_pos() {
            draw_crosshair(&mut frame, mx as i32, my as i32, 12, Rgb::new(0xFF, 0xCC, 0x33));
        }

        /* 5) Present to the window (this is when the on-screen image updates). */
        drawer.present(&frame)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
