//! User query handlers: USERS, WHOIS

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::{TOPIC_TIME_FORMAT, UserRef};
use chrono::Local;

/// Handler for the `/users` command.
pub struct UsersHandler;

impl Handler for UsersHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        let mut nicks: Vec<String> = ctx.directory.users().iter().map(|u| u.nick()).collect();
        nicks.sort_unstable_by_key(|nick| nick.to_lowercase());

        ctx.system_message(format!("Users: {}", nicks.join(", ")));
        Ok(())
    }
}

/// Handler for the `/whois <nick>` command.
pub struct WhoisHandler;

impl Handler for WhoisHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let nick = args
            .split_whitespace()
            .next()
            .ok_or(HandlerError::MissingArgument("<nick>"))?;

        let user = ctx
            .directory
            .lookup_user(nick)
            .ok_or_else(|| HandlerError::NoSuchUser(nick.to_string()))?;

        ctx.system_message(profile(&user));
        Ok(())
    }
}

fn profile(user: &UserRef) -> String {
    let mut lines = vec![
        format!("/whois - {}:", user.nick()),
        format!("Code: {}", user.code()),
    ];

    if let Some(ip) = user.ip() {
        lines.push(format!("IP address: {ip}"));
    }

    lines.push(format!(
        "Logged on: {}",
        user.logged_on().format(TOPIC_TIME_FORMAT)
    ));
    lines.push(format!("Online for: {}", online_for(user)));

    if let Some(message) = user.away_message() {
        lines.push(format!("Away message: {message}"));
    }

    lines.join("\n")
}

/// Whole hours and minutes since logon, e.g. `2h 05m`.
fn online_for(user: &UserRef) -> String {
    let minutes = (Local::now() - user.logged_on()).num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
