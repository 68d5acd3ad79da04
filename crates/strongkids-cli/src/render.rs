//! Plain-text rendering of the challenge for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use strongkids_core::{
    Category, ChallengeState, Config, Event, Milestone, ResetReason, TaskKey, STRIKE_LIMIT,
};

fn milestone_label(milestone: &Milestone, config: &Config) -> String {
    if config.display.badges {
        milestone.decorated()
    } else {
        milestone.reward.to_string()
    }
}

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Header, milestone line and the five categories. At most one category is
/// expanded to list its items.
pub fn status(
    state: &ChallengeState,
    pending_until: Option<DateTime<Utc>>,
    expand: Option<Category>,
    config: &Config,
) -> String {
    let mut out = String::new();
    let milestone = state.next_milestone();

    let _ = writeln!(out, "75 Strong Kids Challenge");
    let _ = writeln!(
        out,
        "Day {} of {}    Strikes: {}/{}",
        state.day, config.challenge.length_days, state.strikes, STRIKE_LIMIT
    );
    let _ = writeln!(
        out,
        "Next milestone: {} in {} days!",
        milestone_label(milestone, config),
        milestone.days_remaining(state.day)
    );
    if let Some(date) = state.last_completed_date {
        let _ = writeln!(out, "Last completed: {date}");
    }
    if let Some(until) = pending_until {
        let _ = writeln!(
            out,
            "Celebrating! Day {} starts at {}",
            state.day.saturating_add(1),
            local_time(until)
        );
    }
    let _ = writeln!(
        out,
        "\nToday: {}/{} done",
        state.tasks.completed_count(),
        state.tasks.total_count()
    );

    for category in Category::ALL {
        let items = category.items();
        let done = items.iter().filter(|&&k| state.tasks.is_done(k)).count();
        let expanded = expand == Some(category);
        let _ = writeln!(
            out,
            "{} {} {:<20} {}/{}",
            if expanded { "v" } else { ">" },
            check(state.tasks.is_category_complete(category)),
            category.title(),
            done,
            items.len()
        );
        if expanded {
            for &key in items {
                render_item(&mut out, state, key, config);
            }
        }
    }
    out
}

fn render_item(out: &mut String, state: &ChallengeState, key: TaskKey, config: &Config) {
    let _ = writeln!(
        out,
        "    {} {:<36} ({} {})",
        check(state.tasks.is_done(key)),
        key.label(),
        key.category(),
        key.item()
    );
    if config.display.show_ideas {
        let _ = writeln!(out, "          Ideas: {}", key.ideas());
    }
}

/// One-line description of an event.
pub fn event(event: &Event, config: &Config) -> String {
    match event {
        Event::TaskToggled {
            category,
            item,
            done,
            completed,
            total,
        } => format!(
            "{} {category}.{item} ({completed}/{total} done today)",
            if *done { "Checked" } else { "Unchecked" }
        ),
        Event::DayCompleted {
            day, advance_at, ..
        } => format!(
            "🎉 Day {day} complete! Great job! Day {} starts at {}",
            day.saturating_add(1),
            local_time(*advance_at)
        ),
        Event::DayAdvanced { day, strikes } => {
            let reached = strongkids_core::MILESTONES.iter().find(|m| m.day == *day);
            let mut line = format!("Welcome to day {day}! Strikes: {strikes}/{STRIKE_LIMIT}");
            if let Some(m) = reached {
                let _ = write!(line, "\nMilestone reached: {}", milestone_label(m, config));
            }
            line
        }
        Event::StrikeAdded {
            day,
            strikes,
            strike_limit,
        } => format!(
            "Not every task is done yet. Strike {strikes}/{strike_limit}. Keep going on day {day}!"
        ),
        Event::ChallengeReset {
            reason: ResetReason::Strikes,
        } => format!("Strike {STRIKE_LIMIT}/{STRIKE_LIMIT}. The challenge starts again at day 1."),
        Event::ChallengeReset {
            reason: ResetReason::Manual,
        } => "Progress reset. Back to day 1.".to_string(),
        Event::StateSnapshot { day, strikes, .. } => {
            format!("Day {day}, strikes {strikes}/{STRIKE_LIMIT}")
        }
    }
}
