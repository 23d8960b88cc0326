use chrono::Utc;
use colored::Colorize;
use internly_lib::{
    InternRecord, JoinDate, Repository, Result, SessionStore, milestones::MILESTONES, stats,
};

/// The intern's personal view. Fails closed without an intern session;
/// stale intern ids are cleared by [`SessionStore::current_intern`].
pub fn show(repo: &Repository, sessions: &SessionStore) -> Result<()> {
    let record = sessions.current_intern(repo)?;

    println!("{}", "Intern Dashboard".bold());
    println!("Welcome back, {}!\n", record.name);

    println!("Name:             {}", or_na(&record.name));
    println!("Username:         {}", or_na(&record.username));
    println!("Referral Code:    {}", or_na(&record.referral_code));
    println!("Donations Raised: ₹{:.2}", record.donations_raised);
    println!("Joining Date:     {}", join_date_label(&record));
    println!(
        "Days as Intern:   {}",
        stats::days_since_joining(&record, Utc::now())
    );

    println!("\n{}", "Rewards & Unlockables".bold());
    for milestone in &MILESTONES {
        let marker = if milestone.achieved(record.donations_raised) {
            "[x]"
        } else {
            "[ ]"
        };
        let reward = if milestone.label_highlighted(record.donations_raised) {
            milestone.reward.green().to_string()
        } else {
            milestone.reward.to_string()
        };

        println!("{marker} {reward}");
        println!("    {}", milestone.detail.dimmed());
    }

    Ok(())
}

pub fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

pub fn join_date_label(record: &InternRecord) -> String {
    match &record.joining_date {
        Some(JoinDate::Timestamp(timestamp)) => timestamp.format("%Y-%m-%d").to_string(),
        Some(JoinDate::Text(text)) => text.clone(),
        None => "N/A".to_string(),
    }
}
