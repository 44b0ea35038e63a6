//! Level Solver
//!
//! Breadth-first search over the joint `(player1, player2)` position.
//! Used to validate level catalogs and puzzle submissions, and by the
//! demo binary to play itself.

use std::collections::{BTreeMap, VecDeque};

use crate::core::grid::{Direction, GridPos};
use crate::maze::level::Level;

type JointPos = (GridPos, GridPos);

/// Shortest mirrored move list that puts both players on their own goals.
///
/// Returns `Some(vec![])` if the level starts solved and `None` if no
/// sequence works. Directions are expanded in [`Direction::ALL`] order, so
/// the result is deterministic.
pub fn solve(level: &Level) -> Option<Vec<Direction>> {
    let start = (level.player1_start, level.player2_start);
    let goal = (level.goal1, level.goal2);

    // Parent links double as the visited set
    let mut parent: BTreeMap<JointPos, Option<(JointPos, Direction)>> = BTreeMap::new();
    let mut queue: VecDeque<JointPos> = VecDeque::new();
    parent.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(backtrack(&parent, current));
        }

        for dir in Direction::ALL {
            let next = (current.0.step(dir), current.1.step_mirrored(dir));
            if !level.is_open(next.0) || !level.is_open(next.1) {
                continue;
            }
            if parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, Some((current, dir)));
            queue.push_back(next);
        }
    }

    None
}

fn backtrack(parent: &BTreeMap<JointPos, Option<(JointPos, Direction)>>, end: JointPos) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut cursor = end;
    while let Some(Some((prev, dir))) = parent.get(&cursor) {
        path.push(*dir);
        cursor = *prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use crate::maze::level::LevelCatalog;
    use crate::maze::state::GameState;

    #[test]
    fn test_builtin_shortest_lengths() {
        let catalog = LevelCatalog::builtin();
        let lengths: Vec<usize> = catalog.iter().map(|l| solve(l).unwrap().len()).collect();
        assert_eq!(lengths, vec![7, 7, 9, 11, 13]);
    }

    #[test]
    fn test_solution_actually_solves() {
        let catalog = LevelCatalog::builtin();
        for (index, level) in catalog.iter().enumerate() {
            let mut state = GameState::from_level(index, level);
            for dir in solve(level).unwrap() {
                assert!(state.try_move(dir), "level {} solution hit a wall", index);
            }
            assert!(state.is_won());
        }
    }

    #[test]
    fn test_unsolvable_level() {
        // Player 2 is boxed in, so nothing can ever move
        let level = Level {
            width: 5,
            height: 5,
            player1_start: GridPos::new(0, 0),
            player2_start: GridPos::new(2, 2),
            goal1: GridPos::new(4, 0),
            goal2: GridPos::new(0, 4),
            walls: [(1, 2), (3, 2), (2, 1), (2, 3)]
                .into_iter()
                .map(|(x, y)| GridPos::new(x, y))
                .collect::<BTreeSet<_>>(),
        };
        assert_eq!(solve(&level), None);

        let catalog = LevelCatalog::new(vec![level]).unwrap();
        assert!(matches!(
            catalog.validate_solvable(),
            Err(crate::maze::level::LevelError::Unsolvable { index: 0 })
        ));
    }

    #[test]
    fn test_already_solved() {
        let level = Level {
            width: 2,
            height: 1,
            player1_start: GridPos::new(0, 0),
            player2_start: GridPos::new(1, 0),
            goal1: GridPos::new(0, 0),
            goal2: GridPos::new(1, 0),
            walls: BTreeSet::new(),
        };
        assert_eq!(solve(&level), Some(vec![]));
    }
}
