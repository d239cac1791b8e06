use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cubemath::cgmath::vec3;
use pretty_assertions::assert_eq;

use crate::notation::parse_twists;
use crate::*;

fn twist_instantly(sim: &mut CubeSimulation, twist: Twist) {
    assert!(sim.trigger_rotation(twist, DEFAULT_TWIST_SPEED));
    sim.finish_rotation();
}

#[test]
fn test_layer_partition() {
    for size in [CubeSize::Two, CubeSize::Three] {
        for axis in Axis::iter() {
            for &layer in size.layers() {
                for direction in Sign::iter() {
                    let mut sim = CubeSimulation::new(size);
                    let before = sim.cubies().to_vec();
                    twist_instantly(&mut sim, Twist::new(axis, layer, direction));

                    // The center cubie on the twist axis turns in place, so
                    // count changed rotations rather than changed positions.
                    let moved = std::iter::zip(&before, sim.cubies())
                        .filter(|(old, new)| old.rotation != new.rotation)
                        .count();
                    assert_eq!(moved, size.cubies_per_layer());

                    for (old, new) in std::iter::zip(&before, sim.cubies()) {
                        if old.is_in_layer(axis, layer) {
                            assert!(new.is_in_layer(axis, layer));
                        } else {
                            assert_eq!(old.position, new.position);
                            assert_eq!(old, new);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_solved_detection() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    assert!(sim.is_solved());

    twist_instantly(&mut sim, Twist::new(Axis::X, 1, Sign::Pos));
    assert!(!sim.is_solved());
    assert_eq!(sim.status(), GameStatus::Running);

    twist_instantly(&mut sim, Twist::new(Axis::X, 1, Sign::Neg));
    assert!(sim.is_solved());
    assert_eq!(sim.status(), GameStatus::Solved);
    assert!(!sim.is_solving());
}

#[test]
fn test_inverse_sequence_solves() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    let twists = parse_twists("R U R' U' M2 F D' S E' B L2", CubeSize::Three)
        .expect("valid notation");
    for &twist in &twists {
        twist_instantly(&mut sim, twist);
    }
    assert!(!sim.is_solved());
    for &twist in twists.iter().rev() {
        twist_instantly(&mut sim, twist.rev());
    }
    assert!(sim.is_solved());
    assert_eq!(sim.status(), GameStatus::Solved);
    assert_eq!(sim.move_count(), 2 * twists.len() as u32);
}

#[test]
fn test_middle_slice_keeps_center_colors_consistent() {
    // Four slice turns return every cubie home, even though the centers move.
    let mut sim = CubeSimulation::new(CubeSize::Three);
    for _ in 0..4 {
        twist_instantly(&mut sim, Twist::new(Axis::X, 0, Sign::Pos));
    }
    assert!(sim.is_solved());
}

#[test]
fn test_busy_lock() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    let first = Twist::new(Axis::Y, 1, Sign::Neg);
    assert!(sim.trigger_rotation(first, 1.0));

    let cubies = sim.cubies().to_vec();
    assert!(!sim.trigger_rotation(Twist::new(Axis::Z, -1, Sign::Pos), 1.0));
    assert_eq!(sim.cubies(), &cubies[..]);
    assert_eq!(sim.move_count(), 0);
    assert_eq!(sim.animation().map(|anim| anim.twist), Some(first));

    sim.finish_rotation();
    assert_eq!(sim.move_count(), 1);
    assert!(!sim.is_animating());

    // Finishing with nothing in flight does nothing.
    sim.finish_rotation();
    assert_eq!(sim.move_count(), 1);
}

#[test]
fn test_invalid_layer_rejected() {
    let mut sim = CubeSimulation::new(CubeSize::Two);
    assert!(!sim.trigger_rotation(Twist::new(Axis::X, 0, Sign::Pos), 1.0));
    assert!(!sim.is_animating());
    assert_eq!(sim.status(), GameStatus::Idle);
}

#[test]
fn test_scramble_drains_queue() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    let finished = Rc::new(Cell::new(0));
    let finished_ref = Rc::clone(&finished);
    sim.subscribe(move |event| {
        if let CubeEvent::TwistFinished(_) = event {
            finished_ref.set(finished_ref.get() + 1);
        }
    });

    sim.scramble(DEFAULT_SCRAMBLE_LENGTH);
    assert!(sim.is_scrambling());
    assert_eq!(sim.scramble_queue().len(), DEFAULT_SCRAMBLE_LENGTH - 1);
    assert_eq!(
        sim.animation().map(|anim| anim.speed),
        Some(DEFAULT_SCRAMBLE_SPEED),
    );

    // Player twists are rejected while scrambling.
    assert!(!sim.trigger_rotation(Twist::new(Axis::X, 1, Sign::Pos), 1.0));

    let mut frames = 0;
    while sim.tick(web_time::Duration::from_millis(16), 4.0) {
        frames += 1;
        assert!(frames < 10_000, "scramble never finished");
    }
    assert_eq!(finished.get(), DEFAULT_SCRAMBLE_LENGTH);
    assert_eq!(sim.move_count(), DEFAULT_SCRAMBLE_LENGTH as u32);
    assert_eq!(sim.status(), GameStatus::Idle);
    assert!(!sim.is_scrambling());
    assert!(!sim.is_solving());
    assert_eq!(sim.elapsed(), web_time::Duration::ZERO);
}

#[test]
fn test_forced_scramble() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    sim.scramble_with_twists(vec![Twist::new(Axis::X, 1, Sign::Pos)]);
    assert!(sim.scramble_queue().is_empty());
    assert!(sim.is_animating());

    sim.finish_rotation();
    assert_eq!(sim.move_count(), 1);
    assert_eq!(sim.status(), GameStatus::Idle);
    assert!(!sim.is_solved());

    // The next player twist starts the timer.
    assert!(sim.trigger_rotation(Twist::new(Axis::X, 1, Sign::Neg), 1.0));
    assert_eq!(sim.status(), GameStatus::Running);
    sim.finish_rotation();
    assert_eq!(sim.status(), GameStatus::Solved);
    assert_eq!(sim.leaderboard().len(), 1);
    assert_eq!(sim.leaderboard().best().map(|e| e.moves), Some(2));
}

#[test]
fn test_scramble_that_solves_stays_idle() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    let twist = Twist::new(Axis::Y, 0, Sign::Pos);
    sim.scramble_with_twists(vec![twist, twist.rev()]);
    assert_eq!(sim.scramble_queue().len(), 1);

    sim.catch_up();
    assert!(sim.is_solved());
    assert_eq!(sim.move_count(), 2);
    assert_eq!(sim.status(), GameStatus::Idle);
    assert!(!sim.is_solving());
    assert!(sim.leaderboard().is_empty());
}

#[test]
fn test_seeded_scramble_is_deterministic() {
    let mut a = CubeSimulation::new(CubeSize::Three);
    let mut b = CubeSimulation::new(CubeSize::Three);
    a.scramble_with_seed(25, 42);
    b.scramble_with_seed(25, 42);
    assert_eq!(a.scramble_twists(), b.scramble_twists());
    a.catch_up();
    b.catch_up();
    assert_eq!(a.cubies(), b.cubies());
    assert_eq!(a.move_count(), 25);
}

#[test]
fn test_scramble_interrupts_animation() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    assert!(sim.trigger_rotation(Twist::new(Axis::Z, 1, Sign::Pos), 1.0));
    sim.scramble_with_twists(vec![]);
    assert!(!sim.is_animating());
    assert_eq!(sim.status(), GameStatus::Idle);
    assert!(sim.is_solved());
}

#[test]
fn test_reset_keeps_leaderboard() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    twist_instantly(&mut sim, Twist::new(Axis::Y, -1, Sign::Pos));
    twist_instantly(&mut sim, Twist::new(Axis::Y, -1, Sign::Neg));
    assert_eq!(sim.status(), GameStatus::Solved);

    // Twists are still accepted after solving.
    twist_instantly(&mut sim, Twist::new(Axis::Y, -1, Sign::Neg));
    assert_eq!(sim.status(), GameStatus::Solved);

    sim.reset_game();
    assert!(sim.is_solved());
    assert_eq!(sim.status(), GameStatus::Idle);
    assert_eq!(sim.move_count(), 0);
    assert_eq!(sim.leaderboard().len(), 1);
}

#[test]
fn test_events() {
    let mut sim = CubeSimulation::new(CubeSize::Two);
    let events = Rc::new(RefCell::new(vec![]));
    let events_ref = Rc::clone(&events);
    let id = sim.subscribe(move |event| events_ref.borrow_mut().push(event.clone()));

    let r = Twist::new(Axis::X, 1, Sign::Neg);
    twist_instantly(&mut sim, r);
    twist_instantly(&mut sim, r.rev());

    let events_seen = events.borrow().clone();
    assert_eq!(events_seen.len(), 7);
    assert_eq!(
        events_seen[..3],
        [
            CubeEvent::StatusChanged {
                old: GameStatus::Idle,
                new: GameStatus::Running,
            },
            CubeEvent::TwistStarted(r),
            CubeEvent::TwistFinished(r),
        ],
    );
    assert!(matches!(events_seen[5], CubeEvent::StatusChanged { new: GameStatus::Solved, .. }));
    assert!(matches!(events_seen[6], CubeEvent::Solved(_)));

    assert!(sim.unsubscribe(id));
    assert!(!sim.unsubscribe(id));
    sim.reset_game();
    assert_eq!(events.borrow().len(), 7);
}

#[test]
fn test_stickers_after_twist() {
    let mut sim = CubeSimulation::new(CubeSize::Three);
    twist_instantly(&mut sim, Face::U.clockwise_twist());

    // After U, the front face of the top layer shows the right face's color.
    let front_top = sim
        .cubies()
        .iter()
        .find(|c| c.position == vec3(0, 1, 1))
        .expect("edge exists");
    let front_sticker = front_top
        .stickers()
        .into_iter()
        .find(|s| s.facing == Face::F)
        .expect("edge has a front sticker");
    assert_eq!(front_sticker.color, FaceColor::Red);
}
