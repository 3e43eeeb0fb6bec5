//! # Adventure Phase
//!
//! Populates a finished board with a player, enemies and treasures, then runs the
//! chase: the player moves one cell at a time and, after a short delay, every
//! enemy takes one greedy step towards them.

use crate::game::{
    Board, Direction, Enemy, EntityId, GameEvent, Player, Position, TerrainType, Treasure,
};
use crate::GenerationConfig;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// Outcome of one enemy step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyMove {
    /// The enemy stays put
    Stay,
    /// The enemy moves to the given cell
    MoveTo(Position),
    /// The step would land on the player
    Collide,
}

/// Picks the next move of an enemy chasing the player.
///
/// With `roll < x_bias` the enemy steps along X towards the player (when not
/// already aligned); otherwise it steps along Y. The target must be on the board
/// and walkable. There is no fallback axis, so an enemy facing a wall stalls.
///
/// # Examples
///
/// ```
/// use terrablocks::{next_enemy_move, Board, EnemyMove, Position};
///
/// let board = Board::from_rows(&["=====", "====="]).unwrap();
/// let enemy = Position::new(0, 0);
/// let player = Position::new(3, 1);
///
/// assert_eq!(
///     next_enemy_move(&board, enemy, player, 0.1, 0.7),
///     EnemyMove::MoveTo(Position::new(1, 0))
/// );
/// assert_eq!(
///     next_enemy_move(&board, enemy, player, 0.9, 0.7),
///     EnemyMove::MoveTo(Position::new(0, 1))
/// );
/// ```
pub fn next_enemy_move(
    board: &Board,
    enemy: Position,
    player: Position,
    roll: f64,
    x_bias: f64,
) -> EnemyMove {
    let dx = player.x - enemy.x;
    let dy = player.y - enemy.y;

    let target = if roll < x_bias && dx != 0 {
        Position::new(enemy.x + dx.signum(), enemy.y)
    } else if dy != 0 {
        Position::new(enemy.x, enemy.y + dy.signum())
    } else {
        return EnemyMove::Stay;
    };

    if target == player {
        return EnemyMove::Collide;
    }

    match board.get(target) {
        Some(terrain) if terrain.is_walkable() => EnemyMove::MoveTo(target),
        _ => EnemyMove::Stay,
    }
}

/// Finds where the player starts.
///
/// The first cell of row 0 that is neither Hazard nor Empty wins. Without one,
/// random cells in the top `spawn_fallback_rows` rows are sampled until one is
/// not Hazard; if sampling keeps failing the band is scanned in order, and
/// the origin is the last resort.
pub fn find_player_spawn(board: &Board, config: &GenerationConfig, rng: &mut StdRng) -> Position {
    let top_row = (0..board.width as i32)
        .map(|x| Position::new(x, 0))
        .find(|&pos| {
            board
                .get(pos)
                .is_some_and(|terrain| terrain != TerrainType::Hazard && terrain != TerrainType::Empty)
        });

    if let Some(pos) = top_row {
        return pos;
    }

    let band = config.spawn_fallback_rows.clamp(1, board.height.max(1));
    let not_hazard = |pos: Position| {
        board
            .get(pos)
            .is_some_and(|terrain| terrain != TerrainType::Hazard)
    };

    for _ in 0..config.spawn_fallback_attempts {
        let pos = Position::new(
            rng.gen_range(0..board.width.max(1)) as i32,
            rng.gen_range(0..band) as i32,
        );
        if not_hazard(pos) {
            debug!("No spawn on the top row, sampled {:?}", pos);
            return pos;
        }
    }

    warn!("Spawn sampling failed, scanning the top {} row(s)", band);
    (0..band as i32)
        .flat_map(|y| (0..board.width as i32).map(move |x| Position::new(x, y)))
        .find(|&pos| not_hazard(pos))
        .unwrap_or_else(Position::origin)
}

/// Every Hazard cell spawns one enemy.
pub fn spawn_enemies(board: &Board) -> Vec<Enemy> {
    board
        .positions_of(TerrainType::Hazard)
        .into_iter()
        .map(Enemy::new)
        .collect()
}

/// Each Path cell independently hosts a treasure with `treasure_chance`.
pub fn scatter_treasures(board: &Board, config: &GenerationConfig, rng: &mut StdRng) -> Vec<Treasure> {
    board
        .positions_of(TerrainType::Path)
        .into_iter()
        .filter(|_| rng.gen_bool(config.treasure_chance))
        .map(|pos| Treasure::new(pos, config.treasure_value))
        .collect()
}

/// Re-marks Path cells in the bottom `safe_haven_rows` rows as SafeHaven, each
/// with `safe_haven_chance`. Returns the marked cells.
pub fn mark_safe_havens(board: &mut Board, config: &GenerationConfig, rng: &mut StdRng) -> Vec<Position> {
    let first_row = board.height.saturating_sub(config.safe_haven_rows) as i32;
    let candidates: Vec<Position> = board
        .positions_of(TerrainType::Path)
        .into_iter()
        .filter(|pos| pos.y >= first_row)
        .collect();

    let mut marked = Vec::new();
    for pos in candidates {
        if rng.gen_bool(config.safe_haven_chance) {
            board.set_cell(pos.x, pos.y, TerrainType::SafeHaven);
            marked.push(pos);
        }
    }
    marked
}

/// State of the Adventure Phase.
#[derive(Debug, Clone)]
pub struct Adventure {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Treasures still lying on the board
    pub treasures: Vec<Treasure>,
    /// SafeHaven cells already rewarded
    pub visited_havens: HashSet<Position>,
    /// Remaining delay (ms) of each scheduled enemy step
    pending_enemy_steps: VecDeque<f64>,
    all_collected_reported: bool,
}

impl Adventure {
    /// Populates a finished board: player, then enemies, treasures and havens.
    ///
    /// This is the only place the adventure writes to the board.
    pub fn setup(board: &mut Board, config: &GenerationConfig, rng: &mut StdRng) -> Self {
        let spawn = find_player_spawn(board, config, rng);
        let enemies = spawn_enemies(board);
        let treasures = scatter_treasures(board, config, rng);
        let havens = mark_safe_havens(board, config, rng);

        info!(
            "Adventure setup: player at {:?}, {} enemies, {} treasures, {} safe havens",
            spawn,
            enemies.len(),
            treasures.len(),
            havens.len()
        );

        Self::from_parts(
            Player::new(spawn, config.player_health),
            enemies,
            treasures,
        )
    }

    /// Builds an adventure from explicit entities.
    pub fn from_parts(player: Player, enemies: Vec<Enemy>, treasures: Vec<Treasure>) -> Self {
        Self {
            player,
            enemies,
            all_collected_reported: treasures.is_empty(),
            treasures,
            visited_havens: HashSet::new(),
            pending_enemy_steps: VecDeque::new(),
        }
    }

    /// Whether the player can still act.
    pub fn is_active(&self) -> bool {
        self.player.is_alive()
    }

    /// Number of enemy steps waiting on their timer.
    pub fn pending_enemy_steps(&self) -> usize {
        self.pending_enemy_steps.len()
    }

    /// Index of the enemy standing on `position`, if any.
    fn enemy_at(&self, position: Position) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.position == position)
    }

    /// Moves the player one cell.
    ///
    /// Blocked moves produce no events. Walking into an enemy is a collision;
    /// a successful step collects treasure, rewards new havens and schedules the
    /// enemy response.
    pub fn move_player(
        &mut self,
        board: &Board,
        direction: Direction,
        config: &GenerationConfig,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_active() {
            return events;
        }

        let from = self.player.position;
        let to = from.step(direction);

        if let Some(index) = self.enemy_at(to) {
            let enemy_id = self.enemies[index].id;
            self.collide(enemy_id, &mut events);
            return events;
        }

        match board.get(to) {
            Some(terrain) if terrain.is_walkable() => {}
            _ => return events,
        }

        self.player.position = to;
        events.push(GameEvent::PlayerMoved { from, to });

        let (found, remaining): (Vec<Treasure>, Vec<Treasure>) = self
            .treasures
            .iter()
            .partition(|treasure| treasure.position == to);
        self.treasures = remaining;
        for treasure in found {
            self.player.treasure_collected += treasure.value;
            events.push(GameEvent::TreasureCollected {
                position: to,
                value: treasure.value,
            });
        }
        if self.treasures.is_empty() && !self.all_collected_reported {
            self.all_collected_reported = true;
            events.push(GameEvent::AllTreasuresCollected);
        }

        if board.get(to) == Some(TerrainType::SafeHaven) && self.visited_havens.insert(to) {
            events.push(GameEvent::SafeHavenReached {
                position: to,
                bonus: config.safe_haven_bonus,
            });
        }

        self.pending_enemy_steps
            .push_back(config.enemy_move_delay_ms as f64);

        events
    }

    /// Moves every enemy once, drawing one roll per enemy.
    pub fn step_enemies(
        &mut self,
        board: &Board,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for index in 0..self.enemies.len() {
            if !self.is_active() {
                break;
            }
            let roll: f64 = rng.gen();
            let enemy = &self.enemies[index];
            let step = next_enemy_move(
                board,
                enemy.position,
                self.player.position,
                roll,
                config.enemy_x_bias,
            );
            match step {
                EnemyMove::Stay => {}
                EnemyMove::MoveTo(to) => {
                    let enemy = &mut self.enemies[index];
                    events.push(GameEvent::EnemyMoved {
                        enemy_id: enemy.id,
                        from: enemy.position,
                        to,
                    });
                    enemy.position = to;
                }
                EnemyMove::Collide => {
                    let enemy_id = enemy.id;
                    self.collide(enemy_id, &mut events);
                }
            }
        }

        events
    }

    /// Counts down scheduled enemy steps and runs the ones that are due.
    pub fn update(
        &mut self,
        dt_ms: f64,
        board: &Board,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<GameEvent> {
        for remaining in self.pending_enemy_steps.iter_mut() {
            *remaining -= dt_ms;
        }

        let mut events = Vec::new();
        while self
            .pending_enemy_steps
            .front()
            .is_some_and(|&remaining| remaining <= 0.0)
        {
            self.pending_enemy_steps.pop_front();
            events.extend(self.step_enemies(board, config, rng));
        }
        events
    }

    fn collide(&mut self, enemy_id: EntityId, events: &mut Vec<GameEvent>) {
        let alive = self.player.take_hit();
        events.push(GameEvent::Collision {
            enemy_id,
            position: self.player.position,
            health_left: self.player.health,
        });
        if !alive {
            self.pending_enemy_steps.clear();
            events.push(GameEvent::PlayerDefeated);
        }
    }
}
