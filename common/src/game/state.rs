use std::collections::{HashSet, VecDeque};

use super::rng::GameRng;
use super::types::{Direction, GRID_SIZE, Phase, Point};

pub const START_CELL: Point = Point { x: 10, y: 10 };
pub const START_FOOD: Point = Point { x: 15, y: 15 };
pub const START_DIRECTION: Direction = Direction::Right;

/// The authoritative grid state. All transitions are total; the only
/// terminal outcome is `Phase::Over`.
#[derive(Clone, Debug)]
pub struct GameState {
    body: VecDeque<Point>,
    occupied: HashSet<Point>,
    food: Point,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let mut body = VecDeque::new();
        body.push_back(START_CELL);
        let mut occupied = HashSet::new();
        occupied.insert(START_CELL);

        Self {
            body,
            occupied,
            food: START_FOOD,
            direction: START_DIRECTION,
            pending_direction: None,
            score: 0,
            phase: Phase::Running,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn segments(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Records a direction intent for the next tick. The intent is checked
    /// against the committed direction of travel, so two quick inputs inside
    /// one tick cannot reverse the snake onto itself.
    pub fn submit_direction(&mut self, intent: Direction) {
        if self.phase != Phase::Running {
            return;
        }
        if intent.axis() == self.direction.axis() {
            return;
        }
        self.pending_direction = Some(intent);
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    pub fn tick(&mut self, rng: &mut GameRng) {
        if self.phase != Phase::Running {
            return;
        }

        let direction = self.pending_direction.unwrap_or(self.direction);
        let next_head = match self.next_head(direction) {
            Some(point) => point,
            None => {
                self.phase = Phase::Over;
                return;
            }
        };

        // The pre-tick tail vacates its cell this tick unless food is eaten,
        // and food never sits on the snake, so head == tail is always a
        // legal non-eating move.
        if self.occupied.contains(&next_head) && next_head != self.tail() {
            self.phase = Phase::Over;
            return;
        }

        let ate = next_head == self.food;
        if !ate {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.occupied.remove(&tail);
        }
        self.body.push_front(next_head);
        self.occupied.insert(next_head);

        if ate {
            self.score += 1;
            self.resample_food(rng);
        }

        self.direction = direction;
        self.pending_direction = None;
    }

    fn next_head(&self, direction: Direction) -> Option<Point> {
        let head = self.head();
        match direction {
            Direction::Up => (head.y > 0).then(|| Point::new(head.x, head.y - 1)),
            Direction::Down => (head.y + 1 < GRID_SIZE).then(|| Point::new(head.x, head.y + 1)),
            Direction::Left => (head.x > 0).then(|| Point::new(head.x - 1, head.y)),
            Direction::Right => (head.x + 1 < GRID_SIZE).then(|| Point::new(head.x + 1, head.y)),
        }
    }

    fn resample_food(&mut self, rng: &mut GameRng) {
        let mut free = Vec::with_capacity(GRID_SIZE * GRID_SIZE - self.body.len());
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let cell = Point::new(x, y);
                if !self.occupied.contains(&cell) {
                    free.push(cell);
                }
            }
        }

        if free.is_empty() {
            // The snake fills the grid; a completed game is terminal.
            self.phase = Phase::Over;
            return;
        }
        self.food = free[rng.random_range(0..free.len())];
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    fn set_body(&mut self, cells: Vec<Point>) {
        self.occupied = cells.iter().copied().collect();
        self.body = cells.into();
    }

    #[cfg(test)]
    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    #[cfg(test)]
    fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }
}
