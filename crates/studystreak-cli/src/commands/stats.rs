use studystreak_core::Config;

use super::open_tracker;

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tracker = open_tracker(&config)?;
    let summary = tracker.summary().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("current streak:       {}", summary.current_streak);
        println!("studied days (7d):    {}", summary.completed_days);
        println!("studied this month:   {}", summary.completed_this_month);
        println!("longest day (hours):  {}", summary.max_study_hours);
        println!("total hours (7d):     {}", summary.total_study_hours);
    }
    Ok(())
}
