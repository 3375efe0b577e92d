use daybook_core::dates::Day;
use daybook_core::types::DbId;

/// The `(user, day)` pair every category and note belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayScope {
    pub user_id: DbId,
    pub day: Day,
}

impl DayScope {
    pub fn new(user_id: DbId, day: Day) -> Self {
        Self { user_id, day }
    }

    /// The stored form of the day (`YYYY-MM-DD`).
    pub fn day_key(&self) -> String {
        self.day.to_string()
    }
}
