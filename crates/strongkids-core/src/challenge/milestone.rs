use serde::Serialize;

/// A reward threshold shown while working through the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub day: u32,
    pub reward: &'static str,
    pub badge: &'static str,
}

impl Milestone {
    /// Days left from `day` until this milestone. Zero once reached.
    pub fn days_remaining(&self, day: u32) -> u32 {
        self.day.saturating_sub(day)
    }

    /// Reward label with its badge in front.
    pub fn decorated(&self) -> String {
        format!("{} {}", self.badge, self.reward)
    }
}

/// Milestones in ascending day order.
pub const MILESTONES: [Milestone; 6] = [
    Milestone {
        day: 1,
        reward: "Starting Strong!",
        badge: "🌟",
    },
    Milestone {
        day: 7,
        reward: "One Week Warrior",
        badge: "🏆",
    },
    Milestone {
        day: 14,
        reward: "Two Week Champion",
        badge: "🎯",
    },
    Milestone {
        day: 30,
        reward: "Monthly Master",
        badge: "🌈",
    },
    Milestone {
        day: 50,
        reward: "Halfway Hero",
        badge: "⚡",
    },
    Milestone {
        day: 75,
        reward: "75 Strong Legend",
        badge: "👑",
    },
];

/// First milestone strictly after `day`, or the final one once every
/// threshold has been passed.
pub fn next_milestone(day: u32) -> &'static Milestone {
    MILESTONES
        .iter()
        .find(|m| m.day > day)
        .unwrap_or(&MILESTONES[MILESTONES.len() - 1])
}

/// Milestones already reached on `day`.
pub fn reached_milestones(day: u32) -> impl Iterator<Item = &'static Milestone> {
    MILESTONES.iter().filter(move |m| m.day <= day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_ascending() {
        assert!(MILESTONES.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn next_is_strictly_greater() {
        assert_eq!(next_milestone(1).day, 7);
        assert_eq!(next_milestone(6).day, 7);
        assert_eq!(next_milestone(7).day, 14);
        let m = next_milestone(10);
        assert_eq!((m.day, m.reward), (14, "Two Week Champion"));
    }

    #[test]
    fn last_entry_once_past_every_threshold() {
        for day in [74, 75, 76, 120] {
            let m = next_milestone(day);
            assert_eq!((m.day, m.reward), (75, "75 Strong Legend"), "day {day}");
        }
    }

    #[test]
    fn days_remaining_saturates() {
        assert_eq!(next_milestone(10).days_remaining(10), 4);
        assert_eq!(next_milestone(80).days_remaining(80), 0);
    }

    #[test]
    fn reached_counts_thresholds_at_or_below_day() {
        assert_eq!(reached_milestones(1).count(), 1);
        assert_eq!(reached_milestones(30).count(), 4);
        assert_eq!(reached_milestones(75).count(), 6);
    }
}
