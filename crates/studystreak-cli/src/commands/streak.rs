use std::time::Duration;

use studystreak_core::{Clock, Config, KeyValueStore, StreakTracker, StreakWindow};

use super::open_tracker;

pub async fn show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;
    let window = tracker.get_window().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&window)?);
    } else {
        print!("{}", render(&window));
    }
    Ok(())
}

pub async fn mark(hours: Option<f64>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;

    if !force && tracker.is_marked_today().await {
        eprintln!("today is already marked as studied (use --force to update it)");
        return Ok(());
    }

    let window = tracker.mark_today(hours).await?;
    println!("marked {} as studied", window.last_date());
    print!("{}", render(&window));
    Ok(())
}

/// Poll for day rollover until Ctrl-C.
pub async fn watch(interval: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let secs = interval.unwrap_or(config.watch.interval_secs);
    if secs == 0 {
        return Err("interval must be at least 1 second".into());
    }
    let tracker = open_tracker(&config)?;

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    let mut shown: Option<StreakWindow> = None;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(text) = refresh(&tracker, &mut shown).await {
                    print!("{text}");
                }
            }
            _ = &mut ctrl_c => break,
        }
    }
    Ok(())
}

/// Re-read the window, returning its rendering if it differs from `shown`.
async fn refresh<S: KeyValueStore, C: Clock>(
    tracker: &StreakTracker<S, C>,
    shown: &mut Option<StreakWindow>,
) -> Option<String> {
    let window = tracker.get_window().await;
    if shown.as_ref() == Some(&window) {
        return None;
    }
    if let Some(previous) = shown.as_ref() {
        if previous.last_date() != window.last_date() {
            tracing::info!(today = %window.last_date(), "day rolled over");
        }
    }
    let text = render(&window);
    *shown = Some(window);
    Some(text)
}

fn render(window: &StreakWindow) -> String {
    let mut out = String::new();
    for day in window {
        let mark = if day.completed { "[x]" } else { "[ ]" };
        let hours = day
            .study_hours
            .map(|h| format!("  {h}h"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}  {}  {mark}{hours}\n",
            day.date,
            day.date.format("%a")
        ));
    }
    let streak = window.current_streak();
    let unit = if streak == 1 { "day" } else { "days" };
    out.push_str(&format!("current streak: {streak} {unit}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use studystreak_core::{FixedClock, MemoryStore};

    #[test]
    fn render_lists_days_and_streak() {
        let window = StreakWindow::fresh(NaiveDate::from_ymd_opt(2024, 10, 7).unwrap());
        let text = render(&window);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "2024-10-01  Tue  [ ]");
        assert_eq!(lines[6], "2024-10-07  Mon  [ ]");
        assert_eq!(lines[7], "current streak: 0 days");
    }

    #[tokio::test]
    async fn refresh_renders_only_on_change() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 7).unwrap();
        let tracker = StreakTracker::new(MemoryStore::new(), FixedClock::new(today));
        let mut shown = None;

        let first = refresh(&tracker, &mut shown).await.unwrap();
        assert!(first.contains("2024-10-07  Mon  [ ]"));
        assert!(refresh(&tracker, &mut shown).await.is_none());

        tracker.mark_today(Some(1.0)).await.unwrap();
        let marked = refresh(&tracker, &mut shown).await.unwrap();
        assert!(marked.contains("2024-10-07  Mon  [x]  1h"));
        assert!(refresh(&tracker, &mut shown).await.is_none());

        tracker.clock().advance_days(1);
        let rolled = refresh(&tracker, &mut shown).await.unwrap();
        assert!(rolled.contains("2024-10-08  Tue  [ ]"));
        assert!(!rolled.contains("2024-10-01"));
        assert_eq!(shown.as_ref().map(|w| w.last_date()), NaiveDate::from_ymd_opt(2024, 10, 8));
        assert!(refresh(&tracker, &mut shown).await.is_none());
    }
}
