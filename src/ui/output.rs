use crate::output::is_quiet;
use crate::ui::{Icons, theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::PEOPLE, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

/// One KPI card: icon, label, headline figure
pub fn metric(icon: &str, label: &str, value: &str) {
    println!(
        "  {} {} {}",
        icon,
        label.style(theme().dim.clone()),
        value.style(theme().figure.clone())
    );
}

/// Performance rating with a bar scaled to `max`, colored by rating
pub fn rating_line(rating: i64, label: &str, count: usize, max: usize) {
    println!("{}", rating_bar(rating, label, count, max));
}

fn rating_bar(rating: i64, label: &str, count: usize, max: usize) -> String {
    const WIDTH: usize = 30;
    let filled = if max == 0 { 0 } else { count * WIDTH / max };
    format!(
        "  {} {:<18} {} {}",
        rating.style(theme().rating(rating)),
        label.style(theme().dim.clone()),
        "█".repeat(filled).style(theme().rating(rating)),
        count.style(theme().figure.clone())
    )
}

/// `58750` -> `$58,750`
pub fn dollars(amount: f64) -> String {
    let whole = amount.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bar_scales_to_max() {
        let full = console::strip_ansi_codes(&rating_bar(5, "Outstanding", 40, 40)).into_owned();
        assert_eq!(full.matches('█').count(), 30);
        assert!(full.trim_end().ends_with("40"));

        let half = console::strip_ansi_codes(&rating_bar(1, "Poor", 20, 40)).into_owned();
        assert_eq!(half.matches('█').count(), 15);

        let none = console::strip_ansi_codes(&rating_bar(3, "Average", 0, 0)).into_owned();
        assert_eq!(none.matches('█').count(), 0);
    }

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(58750.4), "$58,750");
        assert_eq!(dollars(999.0), "$999");
        assert_eq!(dollars(1_000_000.0), "$1,000,000");
        assert_eq!(dollars(0.0), "$0");
        assert_eq!(dollars(-1200.0), "-$1,200");
    }
}
