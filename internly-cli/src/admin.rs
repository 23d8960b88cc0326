use clap::{Args, Subcommand};
use colored::Colorize;
use internly_lib::{Error, InternPatch, NewIntern, Repository, Result, SessionStore, stats};

use crate::dashboard::{join_date_label, or_na};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Headline stats across all interns
    Stats,
    /// List every intern record
    List,
    /// Add a new intern
    Add(AddArgs),
    /// Edit fields on an existing intern
    Edit(EditArgs),
    /// Delete an intern record
    Remove { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    /// Leave unset to auto-generate from the name
    #[arg(long)]
    pub referral_code: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub donations: f64,
    /// Leave unset to use the current date
    #[arg(long)]
    pub joining_date: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub referral_code: Option<String>,
    #[arg(long)]
    pub donations: Option<f64>,
}

pub fn handle(repo: &Repository, sessions: &SessionStore, cmd: &Command) -> Result<()> {
    require_admin(sessions)?;

    match cmd {
        Command::Stats => stats_view(repo),
        Command::List => list(repo),
        Command::Add(args) => add(repo, args),
        Command::Edit(args) => edit(repo, args),
        Command::Remove { id } => remove(repo, id),
    }
}

/// Every admin view fails closed without the admin flag. A failed check
/// also drops any intern session, as the original panel did.
fn require_admin(sessions: &SessionStore) -> Result<()> {
    let session = sessions.current()?;

    if session.admin_id.is_none() {
        sessions.clear_intern()?;
        return Err(Error::InvalidCredentials);
    }

    Ok(())
}

fn stats_view(repo: &Repository) -> Result<()> {
    let interns = repo.interns()?;
    let summary = stats::summary_stats(&interns);

    println!("Total Interns:     {}", summary.total_interns);
    println!("Total Donations:   ₹{:.2}", summary.total_donations);
    println!("Average Donations: ₹{:.2}", summary.average_donations);

    match &summary.top_performer {
        Some(top) => println!(
            "Top Performer:     {} (₹{:.2})",
            or_na(&top.name),
            top.donations_raised
        ),
        None => println!("Top Performer:     N/A"),
    }

    println!("\n{}", "Recent Interns".bold());
    for intern in &summary.recent_interns {
        println!(
            "  {:<24} {:<12} ₹{:.2}",
            or_na(&intern.name),
            join_date_label(intern),
            intern.donations_raised,
        );
    }

    Ok(())
}

fn list(repo: &Repository) -> Result<()> {
    let interns = stats::leaderboard_order(repo.interns()?);

    println!(
        "{}",
        format!(
            "{:<18} {:<22} {:<16} {:<18} {:>12}   {}",
            "Id", "Name", "Username", "Referral Code", "Donations", "Joining Date"
        )
        .bold()
    );

    for intern in &interns {
        println!(
            "{:<18} {:<22} {:<16} {:<18} {:>12}   {}",
            intern.id,
            or_na(&intern.name),
            or_na(&intern.username),
            or_na(&intern.referral_code),
            format!("₹{:.2}", intern.donations_raised),
            join_date_label(intern),
        );
    }

    Ok(())
}

fn add(repo: &Repository, args: &AddArgs) -> Result<()> {
    let record = repo.add_intern(NewIntern {
        name: args.name.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        referral_code: args.referral_code.clone(),
        donations_raised: args.donations,
        joining_date: args.joining_date.clone(),
    })?;

    println!(
        "{}",
        format!("Intern added successfully! (id: {})", record.id).green()
    );

    Ok(())
}

fn edit(repo: &Repository, args: &EditArgs) -> Result<()> {
    repo.update_intern(
        &args.id,
        &InternPatch {
            name: args.name.clone(),
            username: args.username.clone(),
            password: args.password.clone(),
            referral_code: args.referral_code.clone(),
            donations_raised: args.donations,
        },
    )?;

    println!("{}", format!("Updated intern `{}`.", args.id).green());

    Ok(())
}

fn remove(repo: &Repository, id: &str) -> Result<()> {
    repo.remove_intern(id)?;

    println!("{}", format!("Deleted intern `{id}`.").green());

    Ok(())
}
