use glam::Vec2;
use kokaton_musou::compute::*;
use kokaton_musou::constants::*;
use kokaton_musou::entities::*;
use kokaton_musou::events::{Ability, GameEvent};
use kokaton_musou::geometry::Rect;
use kokaton_musou::input::{Command, Keys, TickInput};

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A running state past tick 0, so no enemy spawns for the next 199 ticks.
fn make_state() -> GameState {
    let mut s = init_state();
    s.tick = 1;
    s
}

fn idle() -> TickInput {
    TickInput::default()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state();
    assert_eq!(s.player.rect.center, Vec2::new(900.0, 400.0));
    assert_eq!(s.player.facing, Direction::East);
    assert_eq!(s.player.mode, PlayerMode::Normal);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state();
    assert!(s.enemies.is_empty());
    assert!(s.bombs.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.explosions.is_empty());
    assert!(s.gravity_fields.is_empty());
    assert!(s.emp_pulses.is_empty());
    assert!(s.shield.is_none());
    assert_eq!(s.score.value(), 0);
    assert_eq!(s.tick, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── tick: bookkeeping ─────────────────────────────────────────────────────────

#[test]
fn tick_increments_the_counter() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    tick(&mut s, &idle(), &mut rng);
    tick(&mut s, &idle(), &mut rng);
    assert_eq!(s.tick, 3);
}

#[test]
fn first_tick_spawns_an_enemy() {
    let mut s = init_state();
    let events = tick(&mut s, &idle(), &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemySpawned { .. })));
}

#[test]
fn quit_ends_the_run_without_touching_anything() {
    let mut s = make_state();
    s.score = Score::new(300);
    s.enemies
        .insert(Enemy::new(500.0, EnemyKind::Crab, 100.0, 100));
    let input = TickInput::new(Keys::FIRE | Keys::UP, vec![Command::Gravity, Command::Quit]);

    let events = tick(&mut s, &input, &mut seeded_rng());

    assert_eq!(s.status, GameStatus::Quit);
    assert!(events.is_empty());
    assert_eq!(s.tick, 1);
    assert_eq!(s.score.value(), 300);
    assert!(s.beams.is_empty());
    assert!(s.gravity_fields.is_empty());
    assert_eq!(s.player.rect.center, PLAYER_START);
    let enemy_y = s.enemies.values().next().map(|e| e.rect.center.y);
    assert_eq!(enemy_y, Some(0.0));
}

#[test]
fn finished_runs_do_not_advance() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let events = tick(&mut s, &TickInput::held(Keys::FIRE), &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(s.tick, 1);
    assert!(s.beams.is_empty());
}

// ── tick: enemies ─────────────────────────────────────────────────────────────

#[test]
fn enemy_holds_on_the_tenth_tick() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies
        .insert(Enemy::new(500.0, EnemyKind::Spacecraft, 50.0, 300));

    for _ in 0..9 {
        tick(&mut s, &idle(), &mut rng);
    }
    let state = s.enemies.values().next().map(|e| e.state);
    assert_eq!(state, Some(EnemyState::Descending));

    tick(&mut s, &idle(), &mut rng);
    let state = s.enemies.values().next().map(|e| e.state);
    assert_eq!(state, Some(EnemyState::Holding));
}

#[test]
fn beam_hit_before_the_enemy_holds_scores_ten() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies
        .insert(Enemy::new(500.0, EnemyKind::Spacecraft, 50.0, 300));
    // a beam climbing towards the descending enemy
    s.beams.insert(Beam {
        rect: Rect::new(Vec2::new(500.0, 60.0), Vec2::new(14.0, 44.0)),
        direction: Vec2::new(0.0, -1.0),
        angle: 90.0,
        speed: BEAM_SPEED,
    });

    tick(&mut s, &idle(), &mut rng);
    assert_eq!(s.enemies.len(), 1);

    let events = tick(&mut s, &idle(), &mut rng);
    assert!(s.enemies.is_empty());
    assert!(s.beams.is_empty());
    assert_eq!(s.score.value(), 10);
    assert!(events.iter().any(GameEvent::is_enemy_kill));
}

// ── tick: firing ──────────────────────────────────────────────────────────────

#[test]
fn held_fire_shoots_on_cooldown() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut shots = 0;
    for _ in 0..60 {
        let events = tick(&mut s, &TickInput::held(Keys::FIRE), &mut rng);
        shots += events
            .iter()
            .filter(|e| matches!(e, GameEvent::BeamsFired { .. }))
            .count();
    }
    // ticks 1, 27 and 53
    assert_eq!(shots, 3);
}

// ── tick: abilities ───────────────────────────────────────────────────────────

#[test]
fn hyper_lasts_501_ticks() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.score = Score::new(HYPER_COST);

    let events = tick(&mut s, &TickInput::command(Command::Hyper), &mut rng);
    assert_eq!(events, vec![GameEvent::AbilityActivated(Ability::Hyper)]);
    assert_eq!(s.player.mode, PlayerMode::Hyper);

    for _ in 1..500 {
        tick(&mut s, &idle(), &mut rng);
    }
    assert_eq!(s.player.mode, PlayerMode::Hyper);

    tick(&mut s, &idle(), &mut rng);
    assert_eq!(s.player.mode, PlayerMode::Normal);
}

#[test]
fn emp_through_tick_halves_both_bombs() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.score = Score::new(21);
    s.bombs
        .insert(Bomb::new(Vec2::new(100.0, 100.0), 10.0, Vec2::Y, 0));
    s.bombs
        .insert(Bomb::new(Vec2::new(300.0, 100.0), 10.0, Vec2::Y, 3));

    tick(&mut s, &TickInput::command(Command::Emp), &mut rng);

    assert_eq!(s.score.value(), 1);
    let bombs: Vec<(BombState, f32, Vec2)> = s
        .bombs
        .values()
        .map(|b| (b.state, b.speed, b.rect.center))
        .collect();
    assert_eq!(
        bombs,
        vec![
            (BombState::Inactive, 3.0, Vec2::new(100.0, 103.0)),
            (BombState::Inactive, 3.0, Vec2::new(300.0, 103.0)),
        ]
    );
}

#[test]
fn gravity_through_tick_clears_the_field() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.score = Score::new(GRAVITY_COST);
    s.enemies
        .insert(Enemy::new(100.0, EnemyKind::Octopus, 100.0, 100));
    s.bombs
        .insert(Bomb::new(Vec2::new(300.0, 300.0), 10.0, Vec2::Y, 0));

    tick(&mut s, &TickInput::command(Command::Gravity), &mut rng);

    assert!(s.enemies.is_empty());
    assert!(s.bombs.is_empty());
    assert_eq!(s.score.value(), ENEMY_POINTS + BOMB_POINTS);
    assert_eq!(s.gravity_fields.len(), 1);
}

// ── tick: game over ───────────────────────────────────────────────────────────

#[test]
fn lethal_hit_freezes_the_state() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.bombs.insert(Bomb::new(PLAYER_START, 10.0, Vec2::Y, 0));

    let events = tick(&mut s, &TickInput::held(Keys::LEFT), &mut rng);

    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.tick, 1);
    assert_eq!(s.player.rect.center, PLAYER_START);
    assert_eq!(events.last(), Some(&GameEvent::PlayerDefeated { score: 0 }));
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut s = init_state();
        let mut rng = seeded_rng();
        for i in 0..1200u32 {
            let held = if i % 2 == 0 { Keys::FIRE | Keys::FAN } else { Keys::LEFT };
            tick(&mut s, &TickInput::held(held), &mut rng);
        }
        let enemies: Vec<Rect> = s.enemies.values().map(|e| e.rect).collect();
        (s.tick, s.score.value(), s.status, enemies)
    };
    assert_eq!(run(), run());
}
