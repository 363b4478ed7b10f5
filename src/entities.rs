//! All game entity types and their per-kind state machines.
//!
//! Each kind lives in its own [`SlotMap`] inside [`GameState`], keyed by a
//! kind-specific generational id; nothing holds a reference to another
//! entity.  Effects that need a source copy its
//! position when they are created.

use glam::{IVec2, Vec2};
use slotmap::{new_key_type, SlotMap};

use crate::constants::*;
use crate::geometry::{degrees_of, rotated_extent, unit_from_degrees, Rect};

new_key_type! {
    pub struct EnemyId;
    pub struct BombId;
    pub struct BeamId;
    pub struct ExplosionId;
    pub struct GravityId;
    pub struct EmpId;
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// The eight compass headings the player can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Grid step for this heading in screen coordinates (+y is down).
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::East => IVec2::new(1, 0),
            Direction::NorthEast => IVec2::new(1, -1),
            Direction::North => IVec2::new(0, -1),
            Direction::NorthWest => IVec2::new(-1, -1),
            Direction::West => IVec2::new(-1, 0),
            Direction::SouthWest => IVec2::new(-1, 1),
            Direction::South => IVec2::new(0, 1),
            Direction::SouthEast => IVec2::new(1, 1),
        }
    }

    /// Inverse of [`Direction::delta`]; `None` for the zero step.
    pub fn from_delta(delta: IVec2) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.delta() == delta)
    }

    pub fn degrees(self) -> f32 {
        degrees_of(self.delta().as_vec2())
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    Normal,
    /// Invulnerable to bombs; bombs that touch the player explode for points.
    Hyper,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Direction,
    pub speed: f32,
    pub mode: PlayerMode,
    /// Ticks of hyper mode left.  Only meaningful while `mode` is `Hyper`.
    pub hyper_remaining: i32,
    /// Tick of the most recent shot.
    pub last_shot: i64,
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        Player {
            rect: Rect::new(center, PLAYER_SIZE),
            facing: Direction::East,
            speed: PLAYER_SPEED,
            mode: PlayerMode::Normal,
            hyper_remaining: 0,
            last_shot: -BEAM_INTERVAL,
        }
    }

    pub fn is_hyper(&self) -> bool {
        self.mode == PlayerMode::Hyper
    }

    pub fn enter_hyper(&mut self) {
        self.mode = PlayerMode::Hyper;
        self.hyper_remaining = HYPER_TICKS;
    }

    /// Count down hyper mode, dropping back to normal once the budget is spent.
    pub fn tick_mode(&mut self) {
        if self.mode == PlayerMode::Hyper {
            self.hyper_remaining -= 1;
            if self.hyper_remaining < 0 {
                self.mode = PlayerMode::Normal;
            }
        }
    }

    pub fn can_fire(&self, tick: u64) -> bool {
        tick as i64 - self.last_shot > BEAM_INTERVAL
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Alien sprite variant.  Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Spacecraft,
    Octopus,
    Crab,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Spacecraft, EnemyKind::Octopus, EnemyKind::Crab];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Descending,
    Holding,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub velocity: Vec2,
    /// Once the center passes below this y the enemy stops.
    pub halt_y: f32,
    pub state: EnemyState,
    /// Ticks between bomb drops while holding.  `None` after an EMP.
    pub bomb_interval: Option<u64>,
    /// Set by an EMP; drawn with a scrambled sprite.
    pub jammed: bool,
}

impl Enemy {
    pub fn new(x: f32, kind: EnemyKind, halt_y: f32, bomb_interval: u64) -> Self {
        Enemy {
            rect: Rect::new(Vec2::new(x, 0.0), ENEMY_SIZE),
            kind,
            velocity: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
            halt_y,
            state: EnemyState::Descending,
            bomb_interval: Some(bomb_interval),
            jammed: false,
        }
    }

    /// One tick of descent.  The halt check runs before the move, so the
    /// enemy travels one extra step past its threshold before stopping.
    pub fn advance(&mut self) {
        if self.rect.center.y > self.halt_y {
            self.velocity.y = 0.0;
            self.state = EnemyState::Holding;
        }
        self.rect.translate(self.velocity);
    }

    pub fn drops_bomb_at(&self, tick: u64) -> bool {
        self.state == EnemyState::Holding
            && self
                .bomb_interval
                .is_some_and(|interval| interval > 0 && tick % interval == 0)
    }

    pub fn jam(&mut self) {
        self.bomb_interval = None;
        self.jammed = true;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Active,
    /// Defused by an EMP: harmless to a normal-mode player.
    Inactive,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    /// Unit heading fixed at launch.
    pub direction: Vec2,
    pub speed: f32,
    pub state: BombState,
    /// Index into the six-color bomb palette.
    pub palette: u8,
}

impl Bomb {
    pub fn new(center: Vec2, radius: f32, direction: Vec2, palette: u8) -> Self {
        Bomb {
            rect: Rect::new(center, Vec2::splat(radius * 2.0)),
            direction,
            speed: BOMB_SPEED,
            state: BombState::Active,
            palette,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    pub fn disarm(&mut self) {
        self.speed *= 0.5;
        self.state = BombState::Inactive;
    }
}

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub direction: Vec2,
    /// Screen angle in degrees; used to orient the sprite.
    pub angle: f32,
    pub speed: f32,
}

impl Beam {
    /// A beam leaving `player` at `angle` degrees, placed one body-length out.
    pub fn from_player(player: &Player, angle: f32) -> Self {
        let direction = unit_from_degrees(angle);
        let offset = Vec2::new(
            player.rect.width() * direction.x,
            player.rect.height() * direction.y,
        );
        Beam {
            rect: Rect::new(player.rect.center + offset, rotated_extent(BEAM_SIZE, angle)),
            direction,
            angle,
            speed: BEAM_SPEED,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

// ── Timed-life effects ────────────────────────────────────────────────────────

/// Countdown shared by every effect with a bounded life.
///
/// An effect created with `ticks = L` survives `L` calls to [`Lifetime::tick`]
/// and expires on call `L + 1`, so it is still visible on its zero tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifetime {
    remaining: i32,
}

impl Lifetime {
    pub fn new(ticks: i32) -> Self {
        Lifetime { remaining: ticks }
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Decrement once; returns whether the effect is still alive.
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        self.remaining >= 0
    }
}

#[derive(Clone, Debug)]
pub struct Shield {
    pub lifetime: Lifetime,
    pub rect: Rect,
    pub angle: f32,
}

impl Shield {
    pub fn new(player: &Player, ticks: i32) -> Self {
        let mut shield = Shield {
            lifetime: Lifetime::new(ticks),
            rect: player.rect,
            angle: 0.0,
        };
        shield.follow(player);
        shield
    }

    /// Re-seat the wall in front of the player's current facing.
    pub fn follow(&mut self, player: &Player) {
        let angle = player.facing.degrees();
        let radians = angle.to_radians();
        let size = Vec2::new(SHIELD_THICKNESS, player.rect.height() * 2.0);
        let center = player.rect.center
            + Vec2::new(
                radians.cos() * player.rect.width(),
                -radians.sin() * player.rect.height(),
            );
        self.angle = angle;
        self.rect = Rect::new(center, rotated_extent(size, angle));
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub center: Vec2,
    pub lifetime: Lifetime,
}

impl Explosion {
    pub fn new(center: Vec2, ticks: i32) -> Self {
        Explosion {
            center,
            lifetime: Lifetime::new(ticks),
        }
    }

    /// Which of the two flip-book frames to show; alternates every 10 ticks.
    pub fn frame(&self) -> usize {
        self.lifetime.remaining().div_euclid(10).rem_euclid(2) as usize
    }
}

/// Full-screen field that crushes every enemy and bomb it touches.
#[derive(Clone, Debug)]
pub struct GravityField {
    pub lifetime: Lifetime,
}

impl GravityField {
    pub fn new(ticks: i32) -> Self {
        GravityField {
            lifetime: Lifetime::new(ticks),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::playfield()
    }
}

/// Flash left behind by an EMP.  The pulse's effect is applied once when it
/// is triggered; this only tracks how long the flash stays on screen.
#[derive(Clone, Debug)]
pub struct EmpPulse {
    pub lifetime: Lifetime,
}

impl EmpPulse {
    pub fn new(ticks: i32) -> Self {
        EmpPulse {
            lifetime: Lifetime::new(ticks),
        }
    }
}

// ── Score ─────────────────────────────────────────────────────────────────────

/// Points banked by the player.  Only [`Score::try_spend`] can lower it, and
/// only after the threshold check has passed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u32);

/// Minimum balance an ability requires before its cost is debited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    AtLeast(u32),
    Above(u32),
}

impl Score {
    pub fn new(value: u32) -> Self {
        Score(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn credit(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn meets(&self, threshold: Threshold) -> bool {
        match threshold {
            Threshold::AtLeast(min) => self.0 >= min,
            Threshold::Above(min) => self.0 > min,
        }
    }

    /// Debit `cost` if the balance meets `threshold` and covers the cost.
    pub fn try_spend(&mut self, threshold: Threshold, cost: u32) -> bool {
        if !self.meets(threshold) || self.0 < cost {
            return false;
        }
        self.0 -= cost;
        true
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// A live bomb reached a normal-mode player.
    GameOver,
    /// The player asked to leave.
    Quit,
}

/// The entire simulation state.  Created once per run, mutated by
/// [`crate::compute::tick`] and read by the renderer between ticks.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub bombs: SlotMap<BombId, Bomb>,
    pub beams: SlotMap<BeamId, Beam>,
    pub explosions: SlotMap<ExplosionId, Explosion>,
    pub gravity_fields: SlotMap<GravityId, GravityField>,
    pub emp_pulses: SlotMap<EmpId, EmpPulse>,
    /// At most one shield exists at a time.
    pub shield: Option<Shield>,
    pub score: Score,
    pub status: GameStatus,
    /// Completed ticks since the run started.
    pub tick: u64,
}
