use clap::Args;
use colored::Colorize;
use internly_lib::{Repository, Result, SessionStore};

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
    /// Validate against the admin pair instead of the intern records
    #[arg(long)]
    pub admin: bool,
}

pub fn login(repo: &Repository, sessions: &SessionStore, args: &LoginArgs) -> Result<()> {
    let session = sessions.login(repo, &args.username, &args.password, args.admin)?;

    if args.admin {
        println!("{}", "Signed in as admin.".green());
    } else {
        let id = session.intern_id.as_deref().unwrap_or_default();
        println!("{}", format!("Signed in as intern `{id}`.").green());
    }

    Ok(())
}

pub fn logout(sessions: &SessionStore) -> Result<()> {
    sessions.logout()?;
    println!("Signed out.");

    Ok(())
}
