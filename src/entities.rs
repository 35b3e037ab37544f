/// Board entity types: pure data, no simulation logic.
///
/// Coordinates follow the level files: `x` grows to the right, `y` grows
/// upward and `(0, 0)` is the bottom-left cell of the board.

// ── Board geometry ────────────────────────────────────────────────────────────

pub const BOARD_WIDTH: i32 = 20;
pub const BOARD_HEIGHT: i32 = 20;

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Ticks a freshly emitted burp lives (it attacks on all but the last).
pub const BURP_LIFE: u32 = 5;
/// Burp charges granted by a garlic goodie.
pub const GARLIC_BURPS: u32 = 5;
/// Ticks a koopa contact freezes the player, and the koopa's own cooldown.
pub const FREEZE_TICKS: u32 = 50;
/// Last step of the multi-tick jump (1..=3 drift forward, 4 rises).
pub const JUMP_FINAL_STEP: u8 = 4;
/// Enemies run their special move once every this many ticks.
pub const ENEMY_SPECIAL_INTERVAL: u32 = 10;
/// A fleeing Kong climbs one row every this many ticks.
pub const KONG_CLIMB_INTERVAL: u32 = 5;
/// Kong flees once the player is within this euclidean distance (squared).
pub const KONG_FLEE_DISTANCE_SQ: i32 = 4;
pub const ENEMY_KILL_SCORE: u32 = 100;
pub const LEVEL_FINISH_SCORE: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }

    pub fn above(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    pub fn below(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    /// The neighbouring cell along a horizontal facing (itself for `Facing::None`).
    pub fn ahead(self, facing: Facing) -> Self {
        Self::new(self.x + facing.dx(), self.y)
    }

    /// The neighbouring cell along a vertical climb direction.
    pub fn towards(self, climb: ClimbState) -> Self {
        Self::new(self.x, self.y + climb.dy())
    }

    pub fn distance_sq(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
    None,
}

impl Facing {
    pub fn dx(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
            Facing::None => 0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
            Facing::None => Facing::None,
        }
    }
}

/// Vertical state of a climbing enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClimbState {
    None,
    Up,
    Down,
}

impl ClimbState {
    pub fn dy(self) -> i32 {
        match self {
            ClimbState::None => 0,
            ClimbState::Up => 1,
            ClimbState::Down => -1,
        }
    }
}

// ── Driver-facing vocabulary ─────────────────────────────────────────────────

/// One pending player command, polled at most once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Jump,
    /// Emit a burp.
    Action,
}

/// Named sound effects the core asks the presentation layer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Burp,
    GotGoodie,
    EnemyDie,
    PlayerDie,
    FinishedLevel,
}

/// Result of a single world step, consumed by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    LifeLost,
    LevelComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoodieKind {
    /// One extra life.
    ExtraLife,
    /// `GARLIC_BURPS` burp charges.
    Garlic,
}

impl GoodieKind {
    pub fn score_worth(self) -> u32 {
        match self {
            GoodieKind::ExtraLife => 50,
            GoodieKind::Garlic => 25,
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Position,
    pub facing: Facing,
    pub alive: bool,
    pub burps: u32,
    /// Ticks remaining incapacitated.
    pub freeze_timer: u32,
    /// 0 while grounded, 1..=JUMP_FINAL_STEP mid-jump.
    pub jump_sequence: u8,
}

impl Player {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            facing: Facing::Right,
            alive: true,
            burps: 0,
            freeze_timer: 0,
            jump_sequence: 0,
        }
    }

    pub fn is_at(&self, pos: Position) -> bool {
        self.pos == pos
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_timer > 0
    }
}

// ── Actor variant state ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    Fireball { climb: ClimbState },
    Koopa { freeze_cooldown: u32 },
    Barrel { fallen: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub variant: EnemyVariant,
    /// Free-running tick counter driving the special move.
    pub countdown: u32,
}

impl Enemy {
    pub fn new(variant: EnemyVariant) -> Self {
        Self {
            variant,
            countdown: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Kong {
    /// One-way: once set it never clears.
    pub fleeing: bool,
    pub countdown: u32,
    pub ticks_elapsed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Burp {
    pub life: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Floor,
    Ladder,
    Bonfire,
    Goodie(GoodieKind),
    Enemy(Enemy),
    Kong(Kong),
    Burp(Burp),
}

/// Identity assigned by the world when an actor joins the live set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

// ── Actor ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub(crate) id: ActorId,
    pub pos: Position,
    pub facing: Facing,
    pub alive: bool,
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(kind: ActorKind, pos: Position, facing: Facing) -> Self {
        Self {
            id: ActorId::default(),
            pos,
            facing,
            alive: true,
            kind,
        }
    }

    pub fn floor(pos: Position) -> Self {
        Self::new(ActorKind::Floor, pos, Facing::None)
    }

    pub fn ladder(pos: Position) -> Self {
        Self::new(ActorKind::Ladder, pos, Facing::None)
    }

    pub fn bonfire(pos: Position) -> Self {
        Self::new(ActorKind::Bonfire, pos, Facing::None)
    }

    pub fn goodie(kind: GoodieKind, pos: Position) -> Self {
        Self::new(ActorKind::Goodie(kind), pos, Facing::None)
    }

    pub fn fireball(pos: Position, facing: Facing) -> Self {
        let variant = EnemyVariant::Fireball {
            climb: ClimbState::None,
        };
        Self::new(ActorKind::Enemy(Enemy::new(variant)), pos, facing)
    }

    pub fn koopa(pos: Position, facing: Facing) -> Self {
        let variant = EnemyVariant::Koopa { freeze_cooldown: 0 };
        Self::new(ActorKind::Enemy(Enemy::new(variant)), pos, facing)
    }

    pub fn barrel(pos: Position, facing: Facing) -> Self {
        let variant = EnemyVariant::Barrel { fallen: false };
        Self::new(ActorKind::Enemy(Enemy::new(variant)), pos, facing)
    }

    pub fn kong(pos: Position, facing: Facing) -> Self {
        Self::new(ActorKind::Kong(Kong::default()), pos, facing)
    }

    pub fn burp(pos: Position, facing: Facing) -> Self {
        Self::new(ActorKind::Burp(Burp { life: BURP_LIFE }), pos, facing)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn is_at(&self, pos: Position) -> bool {
        self.pos == pos
    }

    /// Short name used by logs and the renderer.
    pub fn label(&self) -> &'static str {
        match self.kind {
            ActorKind::Floor => "floor",
            ActorKind::Ladder => "ladder",
            ActorKind::Bonfire => "bonfire",
            ActorKind::Goodie(GoodieKind::ExtraLife) => "extra-life",
            ActorKind::Goodie(GoodieKind::Garlic) => "garlic",
            ActorKind::Enemy(Enemy { variant, .. }) => match variant {
                EnemyVariant::Fireball { .. } => "fireball",
                EnemyVariant::Koopa { .. } => "koopa",
                EnemyVariant::Barrel { .. } => "barrel",
            },
            ActorKind::Kong(_) => "kong",
            ActorKind::Burp(_) => "burp",
        }
    }

    // ── Capabilities ─────────────────────────────────────────────────────────

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, ActorKind::Floor)
    }

    pub fn can_climb(&self) -> bool {
        matches!(self.kind, ActorKind::Ladder)
    }

    /// Everything survives a bonfire except barrels.
    pub fn fireproof(&self) -> bool {
        !matches!(
            self.kind,
            ActorKind::Enemy(Enemy {
                variant: EnemyVariant::Barrel { .. },
                ..
            })
        )
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, ActorKind::Enemy(_))
    }

    /// The goodie this actor may leave behind when defeated.
    pub fn drop_goodie(&self) -> Option<GoodieKind> {
        match self.kind {
            ActorKind::Enemy(Enemy { variant, .. }) => match variant {
                EnemyVariant::Fireball { .. } => Some(GoodieKind::Garlic),
                EnemyVariant::Koopa { .. } => Some(GoodieKind::ExtraLife),
                EnemyVariant::Barrel { .. } => None,
            },
            _ => None,
        }
    }
}
