use std::time::Duration;

use glam::Vec2;
use kokaton_musou::compute::init_state;
use kokaton_musou::constants::*;
use kokaton_musou::driver::{Driver, Step};
use kokaton_musou::entities::*;
use kokaton_musou::events::GameEvent;
use kokaton_musou::input::{Command, Keys, TickInput};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn driver_steps_one_tick_at_a_time() {
    let mut driver = Driver::new(Some(7));
    assert!(driver.is_running());
    assert_eq!(driver.period(), TICK_DURATION);

    let step = driver.step(&TickInput::default());
    assert!(matches!(step, Step::Continue(_)));
    assert_eq!(driver.state().tick, 1);
}

#[test]
fn quit_ends_the_run_and_stays_ended() {
    let mut driver = Driver::new(Some(7));
    driver.step(&TickInput::default());

    let step = driver.step(&TickInput::command(Command::Quit));
    assert_eq!(
        step,
        Step::Ended {
            status: GameStatus::Quit,
            score: 0,
            events: Vec::new(),
        }
    );
    assert!(!driver.is_running());

    driver.step(&TickInput::held(Keys::FIRE));
    assert_eq!(driver.state().tick, 1);
    assert!(driver.state().beams.is_empty());
}

#[test]
fn lethal_hit_reports_game_over_with_the_score() {
    let mut state = init_state();
    state.tick = 1;
    state.score = Score::new(77);
    state.bombs.insert(Bomb::new(PLAYER_START, 10.0, Vec2::Y, 0));
    let mut driver = Driver::with_state(state, StdRng::seed_from_u64(1));

    match driver.step(&TickInput::default()) {
        Step::Ended {
            status,
            score,
            events,
        } => {
            assert_eq!(status, GameStatus::GameOver);
            assert_eq!(score, 77);
            assert!(events.contains(&GameEvent::PlayerDefeated { score: 77 }));
        }
        Step::Continue(_) => panic!("run should have ended"),
    }
}

#[test]
fn remaining_budget_fills_the_frame() {
    let driver = Driver::new(Some(7));
    assert_eq!(
        driver.remaining_budget(Duration::from_millis(5)),
        TICK_DURATION - Duration::from_millis(5)
    );
    assert_eq!(driver.remaining_budget(TICK_DURATION), Duration::ZERO);
}

#[test]
fn overrun_leaves_no_budget() {
    let driver = Driver::new(Some(7));
    assert_eq!(
        driver.remaining_budget(TICK_DURATION + Duration::from_millis(3)),
        Duration::ZERO
    );
}

#[test]
fn seeded_drivers_replay_the_same_run() {
    let mut a = Driver::new(Some(99));
    let mut b = Driver::new(Some(99));
    for _ in 0..600 {
        let input = TickInput::held(Keys::FIRE);
        assert_eq!(a.step(&input), b.step(&input));
    }
    let enemies = |d: &Driver| -> Vec<Vec2> { d.state().enemies.values().map(|e| e.rect.center).collect() };
    assert_eq!(enemies(&a), enemies(&b));
    assert_eq!(a.state().score, b.state().score);
}
