pub mod bracket;
pub mod tables;
pub mod theme;

/// Row or column count as a terminal coordinate, saturating at `u16::MAX`.
pub fn row_count(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
