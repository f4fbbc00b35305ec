//! Territory estimation by flood-fill.
//!
//! Every maximal empty region is given a provisional owner by scanning from its
//! first cell along the axes (up, then down, then right, then left) until a
//! stone is met. When no axis reaches a stone the first stone met by the
//! flood-fill is used instead. The region is then checked: if any stone touching
//! it belongs to somebody else, the region is neutral and counts for nobody.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{Board, Occupant, PlayerId, Point};

/// Territory per player, as (row, col) coordinates. Players without territory
/// are absent.
pub type Territories = BTreeMap<PlayerId, BTreeSet<(usize, usize)>>;

/// Compute each player's territory on `board`.
pub fn controlled_territories(board: &Board) -> Territories {
    let mut territories = Territories::new();
    let mut assigned = vec![false; board.len()];

    for seed in board.points() {
        if assigned[seed] || !board.get(seed).is_empty() {
            continue;
        }
        let (region, first_border) = empty_region(board, seed, &mut assigned);
        let owner = scan_owner(board, seed)
            .or(first_border)
            .filter(|&p| borders_only(board, &region, p));
        if let Some(player) = owner {
            territories
                .entry(player)
                .or_default()
                .extend(region.iter().map(|&pt| board.coords(pt)));
        }
    }
    territories
}

/// Territory size of one player.
pub fn territory_size(territories: &Territories, player: PlayerId) -> usize {
    territories.get(&player).map_or(0, BTreeSet::len)
}

/// Collect the empty region containing `seed`, marking it as assigned. Also
/// returns the owner of the first bordering stone met.
fn empty_region(
    board: &Board,
    seed: Point,
    assigned: &mut [bool],
) -> (Vec<Point>, Option<PlayerId>) {
    let mut region = Vec::new();
    let mut first_border = None;
    let mut stack = vec![seed];
    assigned[seed] = true;
    while let Some(pt) = stack.pop() {
        region.push(pt);
        for &n in board.neighbors(pt) {
            match board.get(n) {
                Occupant::Stone(p) => {
                    first_border.get_or_insert(p);
                }
                Occupant::Empty if !assigned[n] => {
                    assigned[n] = true;
                    stack.push(n);
                }
                Occupant::Empty => {}
            }
        }
    }
    (region, first_border)
}

/// First stone seen walking up, down, right, then left from `seed`.
fn scan_owner(board: &Board, seed: Point) -> Option<PlayerId> {
    let size = board.size() as isize;
    let (row, col) = board.coords(seed);
    let (row, col) = (row as isize, col as isize);

    for (dr, dc) in [(-1, 0), (1, 0), (0, 1), (0, -1)] {
        let (mut r, mut c) = (row + dr, col + dc);
        while (0..size).contains(&r) && (0..size).contains(&c) {
            if let Occupant::Stone(p) = board.get((r * size + c) as usize) {
                return Some(p);
            }
            r += dr;
            c += dc;
        }
    }
    None
}

/// True when every stone adjacent to the region belongs to `player`.
fn borders_only(board: &Board, region: &[Point], player: PlayerId) -> bool {
    region.iter().all(|&pt| {
        board.neighbors(pt).iter().all(|&n| match board.get(n) {
            Occupant::Empty => true,
            Occupant::Stone(p) => p == player,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, player: u8, stones: &[(usize, usize)]) {
        for &(r, c) in stones {
            let pt = board.point(r, c).unwrap();
            board.set(pt, Occupant::Stone(player));
        }
    }

    #[test]
    fn test_empty_board_has_no_territory() {
        let board = Board::new(9);
        assert!(controlled_territories(&board).is_empty());
    }

    #[test]
    fn test_single_stone_owns_the_board() {
        let mut board = Board::new(5);
        place(&mut board, 2, &[(2, 2)]);
        let t = controlled_territories(&board);
        assert_eq!(territory_size(&t, 2), 24);
        assert_eq!(territory_size(&t, 1), 0);
    }

    #[test]
    fn test_corner_enclosure() {
        let mut board = Board::new(7);
        place(&mut board, 1, &[(0, 2), (1, 2), (2, 1), (2, 0), (1, 1)]);
        place(&mut board, 2, &[(5, 5)]);
        let t = controlled_territories(&board);
        let black = &t[&1];
        assert_eq!(black.len(), 3);
        assert!(black.contains(&(0, 0)));
        assert!(black.contains(&(0, 1)));
        assert!(black.contains(&(1, 0)));
        // the outside region touches both colours
        assert_eq!(territory_size(&t, 2), 0);
    }

    #[test]
    fn test_mixed_border_is_neutral() {
        let mut board = Board::new(5);
        // column 2 is a wall, but one of its stones is white
        place(&mut board, 1, &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        place(&mut board, 2, &[(4, 2)]);
        let t = controlled_territories(&board);
        assert!(t.is_empty());
    }

    #[test]
    fn test_scan_falls_back_to_other_axes() {
        let mut board = Board::new(5);
        // nothing above or below (0,0); the first stone is to the right
        place(&mut board, 1, &[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]);
        let t = controlled_territories(&board);
        assert_eq!(territory_size(&t, 1), 20);
    }

    #[test]
    fn test_is_idempotent() {
        let mut board = Board::new(9);
        place(&mut board, 1, &[(0, 3), (1, 3), (2, 3), (3, 2), (3, 1), (3, 0)]);
        place(&mut board, 2, &[(6, 6), (6, 7), (7, 6)]);
        let first = controlled_territories(&board);
        let second = controlled_territories(&board);
        assert_eq!(first, second);
    }
}
