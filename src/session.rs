//! A live world driven by commands instead of shared flags.
//!
//! Input handling sends [`Command`]s; the loop that owns the [`Session`]
//! applies them once per tick. Regeneration replaces the map wholesale.

use std::sync::mpsc::Receiver;

use log::info;
use rand::Rng;

use crate::error::MapError;
use crate::map_generator::{Map, MapGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Regenerate,
    Move(Direction),
    Quit,
}

impl Command {
    /// Maps a key to its command: `r` regenerates, WASD moves, `q` quits.
    pub fn from_key(key: char) -> Option<Command> {
        match key.to_ascii_lowercase() {
            'r' => Some(Command::Regenerate),
            'w' => Some(Command::Move(Direction::North)),
            's' => Some(Command::Move(Direction::South)),
            'a' => Some(Command::Move(Direction::West)),
            'd' => Some(Command::Move(Direction::East)),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Exit,
}

pub struct Session<R> {
    generator: MapGenerator,
    rng: R,
    map: Map,
    player: (usize, usize),
    generation: u64,
}

impl<R: Rng> Session<R> {
    pub fn new(generator: MapGenerator, width: usize, height: usize, mut rng: R) -> Result<Self, MapError> {
        let map = generator.generate(width, height, &mut rng)?;
        let player = center(&map);
        Ok(Session {
            generator,
            rng,
            map,
            player,
            generation: 1,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> (usize, usize) {
        self.player
    }

    /// How many maps this session has generated, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, command: Command) -> Result<Tick, MapError> {
        match command {
            Command::Regenerate => {
                info!("Regenerating world...");
                self.map = self
                    .generator
                    .generate(self.map.width, self.map.height, &mut self.rng)?;
                self.player = center(&self.map);
                self.generation += 1;
            }
            Command::Move(direction) => {
                let (dx, dy) = direction.delta();
                let x = self.player.0.saturating_add_signed(dx).min(self.map.width - 1);
                let y = self.player.1.saturating_add_signed(dy).min(self.map.height - 1);
                self.player = (x, y);
            }
            Command::Quit => return Ok(Tick::Exit),
        }
        Ok(Tick::Continue)
    }

    /// Applies every command queued since the last tick, stopping early on
    /// [`Command::Quit`].
    pub fn drain(&mut self, commands: &Receiver<Command>) -> Result<Tick, MapError> {
        for command in commands.try_iter() {
            if self.apply(command)? == Tick::Exit {
                return Ok(Tick::Exit);
            }
        }
        Ok(Tick::Continue)
    }
}

fn center(map: &Map) -> (usize, usize) {
    (map.width / 2, map.height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::mpsc;

    fn session(width: usize, height: usize) -> Session<ChaCha8Rng> {
        Session::new(MapGenerator::default(), width, height, ChaCha8Rng::seed_from_u64(21)).unwrap()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key('R'), Some(Command::Regenerate));
        assert_eq!(Command::from_key('a'), Some(Command::Move(Direction::West)));
        assert_eq!(Command::from_key('q'), Some(Command::Quit));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn test_starts_at_center() {
        let session = session(20, 11);
        assert_eq!(session.player(), (10, 5));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_moves_are_clamped() {
        let mut session = session(3, 3);
        for _ in 0..5 {
            session.apply(Command::Move(Direction::West)).unwrap();
            session.apply(Command::Move(Direction::North)).unwrap();
        }
        assert_eq!(session.player(), (0, 0));
        for _ in 0..5 {
            session.apply(Command::Move(Direction::East)).unwrap();
            session.apply(Command::Move(Direction::South)).unwrap();
        }
        assert_eq!(session.player(), (2, 2));
    }

    #[test]
    fn test_regenerate_resets_player_and_replaces_map() {
        let mut session = session(30, 20);
        let before = session.map().tiles.clone();
        session.apply(Command::Move(Direction::East)).unwrap();

        assert_eq!(session.apply(Command::Regenerate).unwrap(), Tick::Continue);
        assert_eq!(session.player(), (15, 10));
        assert_eq!(session.generation(), 2);
        assert_eq!(session.map().width, 30);
        assert_eq!(session.map().height, 20);
        assert_ne!(session.map().tiles, before);
    }

    #[test]
    fn test_drain_stops_at_quit() {
        let mut session = session(10, 10);
        let (tx, rx) = mpsc::channel();
        tx.send(Command::Move(Direction::East)).unwrap();
        tx.send(Command::Quit).unwrap();
        tx.send(Command::Move(Direction::East)).unwrap();

        assert_eq!(session.drain(&rx).unwrap(), Tick::Exit);
        assert_eq!(session.player(), (6, 5));
        // The move queued after quit is left for the next tick
        assert_eq!(session.drain(&rx).unwrap(), Tick::Continue);
        assert_eq!(session.player(), (7, 5));
    }

    #[test]
    fn test_drain_with_empty_queue() {
        let mut session = session(10, 10);
        let (_tx, rx) = mpsc::channel();
        assert_eq!(session.drain(&rx).unwrap(), Tick::Continue);
        assert_eq!(session.generation(), 1);
    }
}
