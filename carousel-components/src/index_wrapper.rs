//! Mapping between the unbounded drive position and bounded page indices.
//!
//! The host pager is handed a huge virtual page space and scrolls through it
//! freely. Which real page is on screen is always derived from the drive
//! position here, never stored on its own, so the two cannot drift apart.

/// Number of virtual pages presented to the host while looping.
pub const LOOP_VIRTUAL_COUNT: usize = i32::MAX as usize;

/// Midpoint of the virtual page space. Anchors are taken just below it so
/// there is room to swipe backward from the first page.
const ANCHOR_BASE: i64 = (i32::MAX >> 1) as i64;

/// Which virtual page is currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrivePosition(pub i64);

impl DrivePosition {
    /// The first virtual page.
    pub const ZERO: Self = DrivePosition(0);

    /// Returns the raw position.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Returns the position `steps` pages further along.
    pub fn offset(self, steps: i64) -> Self {
        DrivePosition(self.0.saturating_add(steps))
    }

    /// Returns the following position.
    pub fn next(self) -> Self {
        self.offset(1)
    }
}

impl From<i64> for DrivePosition {
    fn from(value: i64) -> Self {
        DrivePosition(value)
    }
}

/// Maps a drive position onto `[0, count)`.
///
/// Returns `None` when there are no pages. A single page always maps to `0`.
/// Negative positions wrap the same way positive ones do.
///
/// ```
/// use carousel_components::index_wrapper::{DrivePosition, wrap};
///
/// assert_eq!(wrap(DrivePosition(7), 3), Some(1));
/// assert_eq!(wrap(DrivePosition(-1), 3), Some(2));
/// assert_eq!(wrap(DrivePosition(42), 1), Some(0));
/// assert_eq!(wrap(DrivePosition(42), 0), None);
/// ```
pub fn wrap(position: DrivePosition, count: usize) -> Option<usize> {
    match count {
        0 => None,
        1 => Some(0),
        _ => {
            let bounded = i128::from(position.0).rem_euclid(count as i128);
            Some(bounded as usize)
        }
    }
}

/// How the page set is exposed to the host, chosen from the real page count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStrategy {
    /// No pages. Nothing is shown and autoplay is inert.
    Empty,
    /// A single page. The virtual space has one slot and nothing slides.
    NoLoop,
    /// Two or more pages spread over [`LOOP_VIRTUAL_COUNT`] virtual slots.
    Loop {
        /// Number of real pages.
        count: usize,
    },
}

impl LoopStrategy {
    /// Picks the strategy for a real page count.
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => LoopStrategy::Empty,
            1 => LoopStrategy::NoLoop,
            count => LoopStrategy::Loop { count },
        }
    }

    /// Number of real pages.
    pub fn page_count(self) -> usize {
        match self {
            LoopStrategy::Empty => 0,
            LoopStrategy::NoLoop => 1,
            LoopStrategy::Loop { count } => count,
        }
    }

    /// Number of virtual pages the host should believe exist.
    pub fn virtual_count(self) -> usize {
        match self {
            LoopStrategy::Empty => 0,
            LoopStrategy::NoLoop => 1,
            LoopStrategy::Loop { .. } => LOOP_VIRTUAL_COUNT,
        }
    }

    /// Returns `true` when pages slide endlessly.
    pub fn is_looping(self) -> bool {
        matches!(self, LoopStrategy::Loop { .. })
    }

    /// Bounded index for a drive position, `None` when there are no pages.
    pub fn wrap(self, position: DrivePosition) -> Option<usize> {
        wrap(position, self.page_count())
    }

    /// Position to (re)start from: the largest multiple of the page count
    /// not above the middle of the virtual space, so it shows page `0` and
    /// leaves room to swipe backward.
    pub fn anchor(self) -> DrivePosition {
        match self {
            LoopStrategy::Empty | LoopStrategy::NoLoop => DrivePosition::ZERO,
            LoopStrategy::Loop { count } => {
                let count = i64::try_from(count).unwrap_or(i64::MAX);
                DrivePosition(ANCHOR_BASE - ANCHOR_BASE % count)
            }
        }
    }

    /// Clamps a position into the virtual page space.
    pub fn clamp(self, position: DrivePosition) -> DrivePosition {
        let last = i64::try_from(self.virtual_count())
            .unwrap_or(i64::MAX)
            .saturating_sub(1)
            .max(0);
        DrivePosition(position.0.clamp(0, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POSITIONS: [i64; 9] = [
        i64::MIN,
        -1_000_003,
        -7,
        -1,
        0,
        1,
        13,
        ANCHOR_BASE,
        i64::MAX,
    ];

    #[test]
    fn wrap_stays_in_range() {
        for count in 1..=9 {
            for position in SAMPLE_POSITIONS {
                let index = wrap(DrivePosition(position), count).expect("pages exist");
                assert!(index < count, "wrap({position}, {count}) = {index}");
            }
        }
    }

    #[test]
    fn wrap_is_periodic() {
        for count in 1..=9_i64 {
            for position in -50..50 {
                let expected = wrap(DrivePosition(position), count as usize);
                assert_eq!(wrap(DrivePosition(position + count), count as usize), expected);
                assert_eq!(wrap(DrivePosition(position - count), count as usize), expected);
            }
        }
    }

    #[test]
    fn single_page_always_maps_to_zero() {
        for position in SAMPLE_POSITIONS {
            assert_eq!(wrap(DrivePosition(position), 1), Some(0));
        }
    }

    #[test]
    fn empty_set_has_no_index() {
        assert_eq!(wrap(DrivePosition(5), 0), None);
        assert_eq!(LoopStrategy::for_count(0).wrap(DrivePosition(5)), None);
    }

    #[test]
    fn strategy_selection() {
        assert_eq!(LoopStrategy::for_count(0), LoopStrategy::Empty);
        assert_eq!(LoopStrategy::for_count(1), LoopStrategy::NoLoop);
        assert_eq!(LoopStrategy::for_count(3), LoopStrategy::Loop { count: 3 });

        assert_eq!(LoopStrategy::Empty.virtual_count(), 0);
        assert_eq!(LoopStrategy::NoLoop.virtual_count(), 1);
        assert_eq!(
            LoopStrategy::Loop { count: 3 }.virtual_count(),
            LOOP_VIRTUAL_COUNT
        );
    }

    #[test]
    fn anchor_shows_first_page_with_room_behind() {
        for count in 2..=12 {
            let strategy = LoopStrategy::for_count(count);
            let anchor = strategy.anchor();
            assert_eq!(strategy.wrap(anchor), Some(0));
            assert!(anchor.get() > 1_000_000);
            assert!(anchor.get() <= ANCHOR_BASE);
            assert!(ANCHOR_BASE - anchor.get() < count as i64);
        }
        assert_eq!(LoopStrategy::NoLoop.anchor(), DrivePosition::ZERO);
        assert_eq!(LoopStrategy::Empty.anchor(), DrivePosition::ZERO);
    }

    #[test]
    fn clamp_respects_virtual_space() {
        let looping = LoopStrategy::for_count(4);
        assert_eq!(looping.clamp(DrivePosition(-3)), DrivePosition::ZERO);
        assert_eq!(
            looping.clamp(DrivePosition(i64::MAX)),
            DrivePosition(LOOP_VIRTUAL_COUNT as i64 - 1)
        );
        assert_eq!(LoopStrategy::NoLoop.clamp(DrivePosition(9)), DrivePosition::ZERO);
        assert_eq!(LoopStrategy::Empty.clamp(DrivePosition(9)), DrivePosition::ZERO);
    }
}
