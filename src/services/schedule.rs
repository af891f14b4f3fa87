//! Past/upcoming split of shows, evaluated against the clock at query time.

use chrono::{DateTime, Utc};

/// A show is upcoming when it starts strictly after `now`; everything else is past.
pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time > now
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Split `items` into past and upcoming, keeping their relative order.
pub fn partition_by_start<T, F>(
    items: impl IntoIterator<Item = T>,
    now: DateTime<Utc>,
    start_time: F,
) -> Partitioned<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let (upcoming, past) = items
        .into_iter()
        .partition(|item| is_upcoming(start_time(item), now));

    Partitioned { past, upcoming }
}

pub fn count_upcoming<'a>(
    start_times: impl IntoIterator<Item = &'a DateTime<Utc>>,
    now: DateTime<Utc>,
) -> usize {
    start_times
        .into_iter()
        .filter(|start| is_upcoming(**start, now))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_every_show_lands_in_exactly_one_side() {
        let now = Utc::now();
        let starts: Vec<DateTime<Utc>> = (-5..=5).map(|h| now + Duration::hours(h)).collect();

        let split = partition_by_start(starts.clone(), now, |s| *s);

        assert_eq!(split.past.len() + split.upcoming.len(), starts.len());
        for start in &starts {
            let in_past = split.past.contains(start);
            let in_upcoming = split.upcoming.contains(start);
            assert!(in_past != in_upcoming, "{start} must be in exactly one side");
        }
        assert!(split.upcoming.iter().all(|s| *s > now));
        assert!(split.past.iter().all(|s| *s <= now));
    }

    #[test]
    fn test_show_starting_now_is_past() {
        let now = Utc::now();

        assert!(!is_upcoming(now, now));
        assert_eq!(count_upcoming(&[now], now), 0);
    }

    #[test]
    fn test_order_is_preserved() {
        let now = Utc::now();
        let starts = vec![
            now + Duration::days(3),
            now - Duration::days(1),
            now + Duration::days(1),
            now - Duration::days(2),
        ];

        let split = partition_by_start(starts.clone(), now, |s| *s);

        assert_eq!(split.upcoming, vec![starts[0], starts[2]]);
        assert_eq!(split.past, vec![starts[1], starts[3]]);
    }

    #[test]
    fn test_count_upcoming() {
        let now = Utc::now();
        let starts = [now - Duration::minutes(1), now + Duration::minutes(1)];

        assert_eq!(count_upcoming(&starts, now), 1);
    }
}
