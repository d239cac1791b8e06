use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use cubemath::cgmath::{InnerSpace, Vector3, vec3};
use cubeprefs::Preferences;
use cubepuzzle::notation::{format_twists, parse_twists};
use cubepuzzle::{CubeSimulation, CubeSize, DEFAULT_TWIST_SPEED, Face, GameStatus, Leaderboard};
use cubepuzzle_view::CubeView;
use cubepuzzle_view::keybinds::keybinds_for;
use eyre::{Context, Result, bail};
use itertools::Itertools;
use serde::Serialize;

/// Simulation time per frame when running headless.
const FRAME: Duration = Duration::from_micros(16_667);

/// Frame limit for running an animation to completion.
const MAX_FRAMES: u32 = 1_000_000;

/// Cubespeed command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Scramble a cube and print the result as JSON.
    Scramble {
        /// Number of twists (defaults to the preferences).
        #[arg(short, long)]
        count: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Number of layers (2 or 3).
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
        size: u8,
    },
    /// Apply twists in standard notation (such as `R U R' U'`) and print the
    /// result as JSON.
    Play {
        /// Twists to apply.
        #[arg(allow_hyphen_values = true)]
        moves: Vec<String>,
        /// Scramble with this seed before applying twists.
        #[arg(long)]
        scramble_seed: Option<u64>,
        /// Number of layers (2 or 3).
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
        size: u8,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// YAML file with user preferences to layer over the defaults.
        #[arg(short, long)]
        user: Option<PathBuf>,
    },
    /// Print keyboard bindings.
    Keys {
        /// Number of layers (2 or 3).
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
        size: u8,
    },
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Scramble { count, seed, size } => {
            let prefs = Preferences::load(None);
            let size = parse_size(size)?;
            let count = count.unwrap_or(prefs.interaction.scramble_length);

            let mut view = CubeView::new(size, &prefs);
            match seed {
                Some(seed) => view.sim.scramble_with_seed(count, seed),
                None => view.sim.scramble(count),
            }
            let frames = run_to_completion(&mut view, &prefs)?;

            write_json_output(&SimulationOutput::new(&view.sim, frames))
        }

        Subcommand::Play {
            moves,
            scramble_seed,
            size,
        } => {
            let prefs = Preferences::load(None);
            let size = parse_size(size)?;
            let twists = parse_twists(&moves.join(" "), size).wrap_err("invalid moves")?;

            let mut view = CubeView::new(size, &prefs);
            let mut frames = 0;
            if let Some(seed) = scramble_seed {
                view.sim
                    .scramble_with_seed(prefs.interaction.scramble_length, seed);
                frames += run_to_completion(&mut view, &prefs)?;
            }
            for twist in twists {
                if !view.sim.trigger_rotation(twist, DEFAULT_TWIST_SPEED) {
                    bail!("twist {twist} was rejected");
                }
                frames += run_to_completion(&mut view, &prefs)?;
            }

            write_json_output(&SimulationOutput::new(&view.sim, frames))
        }

        Subcommand::Prefs { user } => {
            let user_yaml = user
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .wrap_err_with(|| format!("error reading {}", path.display()))
                })
                .transpose()?;
            let prefs = Preferences::try_load(user_yaml.as_deref())?;
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }

        Subcommand::Keys { size } => {
            for bind in keybinds_for(parse_size(size)?) {
                println!("{bind}");
            }
            Ok(())
        }
    }
}

fn parse_size(layer_count: u8) -> Result<CubeSize> {
    Ok(CubeSize::try_from(layer_count)?)
}

/// Steps the view until no twist is animating. Returns the number of frames.
fn run_to_completion(view: &mut CubeView, prefs: &Preferences) -> Result<u32> {
    let mut frames = 0;
    while view.step_by(FRAME, prefs) {
        frames += 1;
        if frames > MAX_FRAMES {
            bail!("animation did not finish after {MAX_FRAMES} frames");
        }
    }
    log::debug!("animation finished after {frames} frames");
    Ok(frames)
}

#[derive(Serialize, Debug)]
struct SimulationOutput {
    size: String,
    scramble: String,
    move_count: u32,
    status: GameStatus,
    solved: bool,
    /// Simulated time spent animating, in seconds.
    animation_time: f32,
    /// Sticker colors on each face in reading order.
    faces: BTreeMap<String, String>,
    leaderboard: Leaderboard,
}
impl SimulationOutput {
    fn new(sim: &CubeSimulation, frames: u32) -> Self {
        Self {
            size: sim.size().to_string(),
            scramble: format_twists(sim.scramble_twists()),
            move_count: sim.move_count(),
            status: sim.status(),
            solved: sim.is_solved(),
            animation_time: FRAME.as_secs_f32() * frames as f32,
            faces: facelets(sim),
            leaderboard: sim.leaderboard().clone(),
        }
    }
}

/// Returns the sticker colors on each face, as one letter per sticker. Each
/// face is read row by row as if looking straight at it with the up face (or
/// for the up and down faces, the back and front faces) at the top.
fn facelets(sim: &CubeSimulation) -> BTreeMap<String, String> {
    let stickers = sim
        .cubies()
        .iter()
        .flat_map(|cubie| cubie.stickers().into_iter().map(|s| (cubie.position_f32(), s)))
        .collect_vec();

    Face::iter()
        .map(|face| {
            let (right, up) = face_reading_axes(face);
            let letters = stickers
                .iter()
                .filter(|(_, s)| s.facing == face)
                .sorted_by_key(|(pos, _)| (-(pos.dot(up) as i32), pos.dot(right) as i32))
                .map(|(_, s)| color_letter(s.color))
                .collect::<String>();
            (face.to_string(), letters)
        })
        .collect()
}

fn face_reading_axes(face: Face) -> (Vector3<f32>, Vector3<f32>) {
    match face {
        Face::R => (vec3(0.0, 0.0, -1.0), Vector3::unit_y()),
        Face::L => (Vector3::unit_z(), Vector3::unit_y()),
        Face::U => (Vector3::unit_x(), vec3(0.0, 0.0, -1.0)),
        Face::D => (Vector3::unit_x(), Vector3::unit_z()),
        Face::F => (Vector3::unit_x(), Vector3::unit_y()),
        Face::B => (vec3(-1.0, 0.0, 0.0), Vector3::unit_y()),
    }
}

fn color_letter(color: cubepuzzle::FaceColor) -> char {
    color
        .to_string()
        .chars()
        .next()
        .unwrap_or('?')
        .to_ascii_uppercase()
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facelets() {
        let mut sim = CubeSimulation::new(CubeSize::Three);
        let faces = facelets(&sim);
        assert_eq!(faces["F"], "GGGGGGGGG");
        assert_eq!(faces["U"], "WWWWWWWWW");

        assert!(sim.trigger_rotation(Face::U.clockwise_twist(), DEFAULT_TWIST_SPEED));
        sim.finish_rotation();
        let faces = facelets(&sim);
        assert_eq!(faces["F"], "RRRGGGGGG");
        assert_eq!(faces["R"], "BBBRRRRRR");
        assert_eq!(faces["U"], "WWWWWWWWW");
    }

    #[test]
    fn test_play_command_parses() {
        use clap::Parser;

        let args = Args::try_parse_from(["cubespeed", "play", "R", "U'", "--size", "2"])
            .expect("valid arguments");
        let Subcommand::Play { moves, size, .. } = args.subcommand else {
            panic!("expected play subcommand");
        };
        assert_eq!(moves, ["R", "U'"]);
        assert_eq!(size, 2);
        assert!(Args::try_parse_from(["cubespeed", "keys", "--size", "4"]).is_err());
    }
}
