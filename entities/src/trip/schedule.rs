use itertools::Itertools;

use crate::trip::ItineraryItem;

/// The in-progress and next upcoming entries of a day, borrowed from the
/// slice they were selected from.
#[derive(Debug)]
pub struct CurrentAndNext<'a> {
    pub current: Option<&'a ItineraryItem>,
    pub next: Option<&'a ItineraryItem>,
}

impl ItineraryItem {
    /// Open-ended items stay active from their start time onwards. Ranged
    /// items that end before they start span midnight.
    pub fn is_active_at(&self, minute_of_day: u32) -> bool {
        let start = self.start_time.minute_of_day();
        match self.end_time {
            None => minute_of_day >= start,
            Some(end) => {
                let end = end.minute_of_day();
                if end < start {
                    minute_of_day >= start || minute_of_day <= end
                } else {
                    minute_of_day >= start && minute_of_day <= end
                }
            }
        }
    }

    pub fn minutes_until_start(&self, minute_of_day: u32) -> i64 {
        i64::from(self.start_time.minute_of_day()) - i64::from(minute_of_day)
    }
}

/// Walks the day's items in start-time order, reporting the item covering
/// `minute_of_day` and the first one still ahead of it. When nothing is
/// current or upcoming, the earliest item is offered as `next`.
pub fn current_and_next(items: &[ItineraryItem], minute_of_day: u32) -> CurrentAndNext<'_> {
    let sorted = items
        .iter()
        .sorted_by_key(|item| item.start_time)
        .collect_vec();

    let mut current = None;
    let mut next = None;

    for item in &sorted {
        if item.is_active_at(minute_of_day) {
            current = Some(*item);
            continue;
        }
        if item.minutes_until_start(minute_of_day) > 0 {
            next = Some(*item);
            break;
        }
    }

    if current.is_none() && next.is_none() {
        next = sorted.first().copied();
    }

    CurrentAndNext { current, next }
}
