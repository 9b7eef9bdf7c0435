//! Plain-text rendering of timer views.

use std::fmt::Write;

use daycount_engine::{Direction, TimerSummary, TimerView};

pub fn view(view: &TimerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", view.name, view.direction);

    let b = &view.breakdown;
    if b.is_expired {
        let _ = writeln!(out, "{}", expired_label(view.direction));
    } else {
        let _ = writeln!(out, "{}", b.human_readable());
        let _ = writeln!(out, "{} total", days(b.total_whole_days));
    }

    if let Some(message) = &view.active_message {
        let _ = writeln!(out, "Message: {} ({})", message.text, message.since_label());
    }
    out
}

pub fn summary_line(summary: &TimerSummary) -> String {
    if summary.is_expired {
        return format!("{}: {}", summary.name, expired_label(summary.direction));
    }
    let n = days(summary.total_whole_days);
    match summary.direction {
        Direction::CountUp => format!("{}: {} since", summary.name, n),
        Direction::CountDown => format!("{}: {} left", summary.name, n),
    }
}

// A count-up timer with a future anchor reports expired too.
fn expired_label(direction: Direction) -> &'static str {
    match direction {
        Direction::CountUp => "not started yet",
        Direction::CountDown => "target date has passed",
    }
}

fn days(n: i64) -> String {
    format!("{} day{}", n, if n == 1 { "" } else { "s" })
}
