use colored::Colorize;
use internly_lib::{Repository, Result, stats};

use crate::dashboard::or_na;

/// Every intern ranked by joining date. Open to anyone, signed in or not,
/// as in the original portal.
pub fn show(repo: &Repository) -> Result<()> {
    let interns = stats::leaderboard_order(repo.interns()?);

    println!(
        "{}",
        format!(
            "{:<6} {:<24} {:<18} {:>12}",
            "Rank", "Name", "Referral Code", "Donations"
        )
        .bold()
    );

    for (index, intern) in interns.iter().enumerate() {
        println!(
            "{:<6} {:<24} {:<18} {:>12}",
            index + 1,
            or_na(&intern.name),
            or_na(&intern.referral_code),
            format!("₹{:.2}", intern.donations_raised),
        );
    }

    Ok(())
}
