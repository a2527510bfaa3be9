//! Attack tables for move generation and check detection.
//!
//! Leapers use precomputed per-square masks. Sliders walk precomputed rays and cut each
//! ray at its first blocker, which is included so captures fall out of the same mask.

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use once_cell::sync::Lazy;

/// Ray directions as (rank delta, file delta). The first four increase the square index.
const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (1, -1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (-1, 1),
];

const ORTHOGONAL: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL: [usize; 4] = [1, 3, 5, 7];

/// `RAYS[dir][sq]`: every square from `sq` (exclusive) to the board edge in direction `dir`
static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for (dir, &(dr, df)) in DIRECTIONS.iter().enumerate() {
        for sq in 0..64 {
            let mut r = (sq / 8) as isize + dr;
            let mut f = (sq % 8) as isize + df;
            let mut mask = 0u64;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                mask |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            rays[dir][sq] = mask;
        }
    }
    rays
});

#[inline]
fn ray_attacks(dir: usize, square: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][square];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let first = if dir < 4 {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][first]
}

/// Bishop attacks (diagonals only)
#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    DIAGONAL
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupancy))
}

/// Rook attacks (ranks and files only)
#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    ORTHOGONAL
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupancy))
}

/// Queen attacks (all 8 directions)
#[inline]
pub(crate) fn queen_attacks(square: usize, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}
