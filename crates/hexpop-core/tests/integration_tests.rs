//! Integration tests for the Hexpop engine.
//!
//! These tests drive complete shots through the public control surface:
//! shoot, tick until the shot settles, then inspect events and the board.

use hexpop_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::mock::StepRng;

const TICK: f64 = 1.0 / 60.0;
const SPEED: f64 = 600.0;

fn simulation(bubbles: Vec<(HexCoord, BubbleColor)>) -> Simulation {
    let mut config = BoardConfig::empty(
        400.0,
        400.0,
        Point::new(20.0, 20.0),
        HexOrientation::Pointy,
    );
    config.bubbles = bubbles;
    Simulation::new_with_rng(&config, &mut StepRng::new(0, 1)).unwrap()
}

/// Tick until the shot reaches a terminal outcome, collecting every event
fn run_shot(sim: &mut Simulation, max_ticks: usize) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        events.extend(sim.tick(TICK).expect("tick should not fail"));
        if sim.active_bubble().is_none() {
            return events;
        }
    }
    panic!("shot did not settle within {} ticks", max_ticks);
}

#[test]
fn test_shot_places_and_clears_a_group() {
    let mut sim = simulation(vec![
        (HexCoord::new(4, 0), BubbleColor::Red),
        (HexCoord::new(5, 0), BubbleColor::Red),
        (HexCoord::new(6, 0), BubbleColor::Red),
    ]);
    sim.set_next_color(BubbleColor::Red);
    sim.shoot_with_rng(90.0, SPEED, &mut StepRng::new(0, 1));

    let events = run_shot(&mut sim, 120);

    assert_eq!(
        events,
        vec![
            TickEvent::Placed {
                address: HexCoord::new(5, 1),
                color: BubbleColor::Red,
            },
            TickEvent::Cleared {
                addresses: vec![
                    HexCoord::new(4, 0),
                    HexCoord::new(5, 0),
                    HexCoord::new(5, 1),
                    HexCoord::new(6, 0),
                ],
                color: BubbleColor::Red,
            },
        ]
    );

    // The whole group is gone in one step
    assert_eq!(sim.board().bubble_count(), 0);
    for address in [HexCoord::new(4, 0), HexCoord::new(5, 0), HexCoord::new(6, 0)] {
        assert_eq!(sim.board().occupant_at(address), None);
    }
    assert!(matches!(sim.last_event(), Some(TickEvent::Cleared { .. })));
}

#[test]
fn test_small_group_stays_on_the_board() {
    // Two reds with a gap; landing next to one makes a group of two
    let mut sim = simulation(vec![
        (HexCoord::new(4, 0), BubbleColor::Red),
        (HexCoord::new(6, 0), BubbleColor::Red),
    ]);
    sim.set_next_color(BubbleColor::Red);
    sim.shoot_with_rng(90.0, SPEED, &mut StepRng::new(0, 1));

    let events = run_shot(&mut sim, 120);

    assert_eq!(
        events,
        vec![TickEvent::Placed {
            address: HexCoord::new(5, 1),
            color: BubbleColor::Red,
        }]
    );
    assert_eq!(sim.board().bubble_count(), 3);
    assert_eq!(
        sim.board().occupant_at(HexCoord::new(5, 1)),
        Some(BubbleColor::Red)
    );
}

#[test]
fn test_shot_below_the_board_is_a_miss() {
    let mut sim = simulation(vec![(HexCoord::new(4, 0), BubbleColor::Blue)]);
    sim.set_next_color(BubbleColor::Blue);
    // Straight down: leaves the field without ever touching the grid
    sim.shoot_with_rng(270.0, SPEED, &mut StepRng::new(0, 1));

    let events = run_shot(&mut sim, 60);

    assert_eq!(events, vec![TickEvent::Missed]);
    assert_eq!(sim.last_event(), Some(&TickEvent::Missed));
    // A miss changes nothing on the board
    assert_eq!(sim.board().bubble_count(), 1);
}

#[test]
fn test_side_wall_bounce_keeps_the_shot_alive() {
    let mut sim = simulation(vec![]);
    sim.set_next_color(BubbleColor::Green);
    // Straight left into the wall
    sim.shoot_with_rng(180.0, SPEED, &mut StepRng::new(0, 1));

    let mut bounced = None;
    for _ in 0..60 {
        let events = sim.tick(0.1).unwrap();
        if let Some(event) = events.first() {
            bounced = Some(event.clone());
            break;
        }
    }

    assert_eq!(bounced, Some(TickEvent::Bounced { edge: Wall::Left }));
    let bubble = sim.active_bubble().expect("bubble should still be airborne");
    assert!(bubble.velocity().x > 0.0);
    assert_eq!(bubble.state(), FlightState::Airborne);
}

#[test]
fn test_top_wall_bounces_instead_of_sticking() {
    // With nothing to hit, a straight-up shot bounces off the ceiling and
    // eventually falls out of the bottom
    let mut sim = simulation(vec![]);
    sim.set_next_color(BubbleColor::Green);
    sim.shoot_with_rng(90.0, SPEED, &mut StepRng::new(0, 1));

    let events = run_shot(&mut sim, 240);

    assert!(events.contains(&TickEvent::Bounced { edge: Wall::Top }));
    assert_eq!(events.last(), Some(&TickEvent::Missed));
    assert_eq!(sim.board().bubble_count(), 0);
}

#[test]
fn test_next_color_tracks_the_board() {
    let mut sim = simulation(vec![
        (HexCoord::new(4, 0), BubbleColor::Green),
        (HexCoord::new(5, 0), BubbleColor::Green),
    ]);

    // Only green is present, so the queue can only hold green
    assert_eq!(sim.next_color(), BubbleColor::Green);
    sim.shoot_with_rng(90.0, SPEED, &mut StepRng::new(0, 1));
    assert_eq!(sim.next_color(), BubbleColor::Green);
}

#[test]
fn test_snapshot_reflects_each_commit() {
    let mut sim = simulation(vec![
        (HexCoord::new(4, 0), BubbleColor::Red),
        (HexCoord::new(6, 0), BubbleColor::Red),
    ]);
    sim.set_next_color(BubbleColor::Blue);
    sim.shoot_with_rng(90.0, SPEED, &mut StepRng::new(0, 1));
    run_shot(&mut sim, 120);

    let snapshot = sim.board_snapshot();
    assert_eq!(
        snapshot.bubbles,
        vec![
            (HexCoord::new(4, 0), BubbleColor::Red),
            (HexCoord::new(5, 1), BubbleColor::Blue),
            (HexCoord::new(6, 0), BubbleColor::Red),
        ]
    );

    // The committed bubble rests exactly on its cell center
    let json = snapshot.to_json().unwrap();
    assert_eq!(BoardSnapshot::from_json(&json).unwrap(), snapshot);
}
