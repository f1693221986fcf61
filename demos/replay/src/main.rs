//! Headless replay: run a level pack against a scripted stream of key events
//! and print one CSV row per frame.
//!
//! Usage: `replay <levels.json> <inputs.txt> [config.json]`
//!
//! The input script holds one command per line: `press <keys>`,
//! `release <keys>` or `wait <frames>`, with keys from `U D L R`. Key edges
//! go through an [`InputState`] exactly as a windowing layer would feed them.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use sidescroll::{Engine, GameConfig, InputState, Key, KeyState, LevelCatalog, LevelSource};

const DT: f32 = 1.0 / 60.0;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Edge(KeyState, Vec<Key>),
    Wait(usize),
}

fn parse_keys(line_no: usize, keys: &str) -> Result<Vec<Key>> {
    keys.chars()
        .map(|ch| Key::from_letter(ch).ok_or_else(|| anyhow!("line {line_no}: unknown key {ch:?}")))
        .collect()
}

fn parse_script(src: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (i, line) in src.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(verb), Some(arg), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("line {line_no}: expected `press <keys>`, `release <keys>` or `wait <frames>`");
        };
        let command = match verb {
            "press" => Command::Edge(KeyState::Pressed, parse_keys(line_no, arg)?),
            "release" => Command::Edge(KeyState::Released, parse_keys(line_no, arg)?),
            "wait" => Command::Wait(
                arg.parse::<usize>()
                    .with_context(|| format!("line {line_no}: bad frame count {arg:?}"))?,
            ),
            other => bail!("line {line_no}: unknown command {other:?}"),
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Step the engine for `frames` frames, printing a CSV row per frame.
///
/// Returns false once the game is won.
fn run_frames<L: LevelSource>(engine: &mut Engine<L>, input: &mut InputState, frames: usize) -> Result<bool> {
    for _ in 0..frames {
        if input.is_key_pressed(Key::Up) {
            log::debug!("up pressed before frame {}", engine.frame_count());
        }
        let report = engine.step(input.frame(), DT)?;
        input.begin_frame();

        for event in engine.drain_events() {
            log::info!("frame {}: {event:?}", report.frame);
        }
        let actor = engine.actor();
        let state = engine.state();
        let view = engine.viewport();
        println!(
            "{},{},{},{},{},{:?},{},{},{},{},{}",
            report.frame,
            actor.position().x,
            actor.position().y,
            actor.velocity.x,
            actor.velocity.y,
            actor.mode,
            state.level,
            state.score,
            state.health,
            view.left,
            view.bottom
        );
        if report.phase.is_terminal() {
            log::info!("game won after {} frames", report.frame + 1);
            return Ok(false);
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(levels_path), Some(inputs_path)) = (args.next(), args.next()) else {
        bail!("usage: replay <levels.json> <inputs.txt> [config.json]");
    };

    let config = match args.next() {
        Some(path) => GameConfig::load_from_file(&PathBuf::from(path))?,
        None => GameConfig::default(),
    };
    let levels = LevelCatalog::load_from_file(&PathBuf::from(&levels_path))
        .with_context(|| format!("failed to load level pack {levels_path}"))?;
    let script = fs::read_to_string(&inputs_path)
        .with_context(|| format!("failed to read input script {inputs_path}"))?;
    let commands = parse_script(&script)?;

    log::info!("replaying {} commands over {} levels", commands.len(), levels.len());

    let mut engine = Engine::new(config, levels)?;
    let mut input = InputState::new();

    println!("frame,x,y,vx,vy,mode,level,score,health,view_left,view_bottom");
    for command in commands {
        match command {
            Command::Edge(state, keys) => {
                for key in keys {
                    input.handle_key(key, state);
                }
            }
            Command::Wait(frames) => {
                if !run_frames(&mut engine, &mut input, frames)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll::ActorMode;

    #[test]
    fn script_parses_edges_and_waits() {
        let commands = parse_script("# warmup\nwait 2\npress UR\n\nwait 3\nrelease u\n").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Wait(2),
                Command::Edge(KeyState::Pressed, vec![Key::Up, Key::Right]),
                Command::Wait(3),
                Command::Edge(KeyState::Released, vec![Key::Up]),
            ]
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_script("wait many").is_err());
        assert!(parse_script("press X").is_err());
        assert!(parse_script("hold U").is_err());
        assert!(parse_script("press").is_err());
        assert!(parse_script("wait 2 3").is_err());
    }

    #[test]
    fn held_jump_through_input_state_jumps_once() {
        let pack = r#"{ "levels": [{ "end_x": 5000,
            "solids": [{ "x": -200, "y": -64, "w": 3000, "h": 64 }] }] }"#;
        let mut engine = Engine::new(GameConfig::default(), LevelCatalog::from_json(pack).unwrap()).unwrap();
        let mut input = InputState::new();

        assert!(run_frames(&mut engine, &mut input, 60).unwrap());
        input.handle_key(Key::Up, KeyState::Pressed);
        assert!(run_frames(&mut engine, &mut input, 120).unwrap());
        // One jump, landed again, and the held key did not trigger another.
        assert!(engine.actor().jump_needs_reset);
        assert_eq!(engine.actor().mode, ActorMode::Grounded);
        assert_eq!(engine.actor().velocity.y, 0.0);

        input.handle_key(Key::Up, KeyState::Released);
        assert!(run_frames(&mut engine, &mut input, 1).unwrap());
        assert!(!engine.actor().jump_needs_reset);
    }
}
