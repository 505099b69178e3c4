/// Position of the reader in the story: which day, and how many of that
/// day's alert/guide pairs (minus one) are already visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCursor {
    pub day: u32,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    SameDay,
    NextDay,
}

impl Default for DayCursor {
    fn default() -> Self {
        Self::start()
    }
}

impl DayCursor {
    pub fn start() -> Self {
        Self { day: 1, index: 0 }
    }

    pub fn new(day: u32, index: u32) -> Self {
        Self {
            day: day.max(1),
            index,
        }
    }

    /// Reveals the next pair of the current day, or rolls over to the first
    /// pair of the next day once the last one is visible. A day without pairs
    /// always rolls over.
    pub fn advance(&mut self, pairs_in_day: usize) -> CursorStep {
        if (self.index as usize) + 1 < pairs_in_day {
            self.index += 1;
            CursorStep::SameDay
        } else {
            self.day += 1;
            self.index = 0;
            CursorStep::NextDay
        }
    }

    pub fn reset(&mut self) {
        *self = Self::start();
    }

    /// Last pair of `day`, i.e. the whole day visible.
    pub fn end_of_day(day: u32, pairs_in_day: usize) -> Self {
        Self::new(day, pairs_in_day.saturating_sub(1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_day_advance_only_moves_index() {
        let mut cursor = DayCursor::new(3, 0);
        assert_eq!(cursor.advance(3), CursorStep::SameDay);
        assert_eq!(cursor, DayCursor::new(3, 1));
        assert_eq!(cursor.advance(3), CursorStep::SameDay);
        assert_eq!(cursor, DayCursor::new(3, 2));
    }

    #[test]
    fn last_pair_rolls_over_to_next_day() {
        let mut cursor = DayCursor::new(3, 2);
        assert_eq!(cursor.advance(3), CursorStep::NextDay);
        assert_eq!(cursor, DayCursor::new(4, 0));
    }

    #[test]
    fn empty_day_rolls_over() {
        let mut cursor = DayCursor::start();
        assert_eq!(cursor.advance(0), CursorStep::NextDay);
        assert_eq!(cursor, DayCursor::new(2, 0));
    }

    #[test]
    fn overflowed_index_rolls_over() {
        let mut cursor = DayCursor::new(5, 7);
        assert_eq!(cursor.advance(2), CursorStep::NextDay);
        assert_eq!(cursor, DayCursor::new(6, 0));
    }

    #[test]
    fn reset_and_end_of_day() {
        let mut cursor = DayCursor::new(9, 4);
        cursor.reset();
        assert_eq!(cursor, DayCursor::start());
        assert_eq!(DayCursor::end_of_day(0, 3), DayCursor::new(1, 2));
        assert_eq!(DayCursor::end_of_day(4, 0), DayCursor::new(4, 0));
    }
}
