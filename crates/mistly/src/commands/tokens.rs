//! API token command handlers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tabled::Tabled;

use mistly_core::{ApiToken, TidyPlan, tokens};

use crate::cli::{TokensArgs, TokensCommand};
use crate::error::CliError;
use crate::output::{self, render_pairs, render_table};
use crate::settings::Settings;

use super::util;

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Last used")]
    last_used: String,
}

fn to_row(t: &ApiToken) -> TokenRow {
    let now = Utc::now();
    TokenRow {
        id: t.id.clone(),
        key: t.key.clone(),
        created: t.created_at().map(fmt_time).unwrap_or_default(),
        last_used: t.last_used_at().map(|at| ago(at, now)).unwrap_or_default(),
    }
}

fn fmt_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `3h 12m ago`, rounded to whole minutes.
fn ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0).unsigned_abs();
    let rounded = Duration::from_secs(secs - secs % 60);
    if rounded.is_zero() {
        "just now".into()
    } else {
        format!("{} ago", humantime::format_duration(rounded))
    }
}

fn token_detail(t: &ApiToken) -> String {
    render_pairs(&[
        ("ID", t.id.clone()),
        ("Key", t.key.clone()),
        ("Created", t.created_at().map(fmt_time).unwrap_or_default()),
    ])
}

pub async fn handle(args: TokensArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        TokensCommand::List => {
            let client = settings.read_only_client()?;
            let listed = tokens::list_tokens(&client).await?;
            let out = output::render_list(settings.output, &listed, to_row, |t| t.id.clone())?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        TokensCommand::Create => {
            let client = settings.read_write_client()?;
            let created = tokens::create_token(&client).await?;
            let out =
                output::render_single(settings.output, &created, token_detail, |t| t.key.clone())?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        TokensCommand::Delete { token_id } => {
            if !util::confirm(
                &format!("Delete API token '{token_id}'?"),
                "tokens delete",
                settings.yes,
            )? {
                return Ok(());
            }
            let client = settings.read_write_client()?;
            tokens::delete_token(&client, &token_id).await?;
            if !settings.quiet {
                eprintln!("Deleted token {token_id}");
            }
            Ok(())
        }

        TokensCommand::Tidy => {
            let client = settings.read_write_client()?;
            let token = settings.credentials.require_token()?;
            let plan = tokens::plan_tidy(tokens::list_tokens(&client).await?, token)?;

            if plan.is_noop() {
                if !settings.quiet {
                    eprintln!("No tokens to tidy up");
                }
                return Ok(());
            }

            output::print_output(&describe_plan(&plan), settings.quiet);
            let prompt = format!("Delete {} token(s)?", plan.delete.len());
            if !util::confirm(&prompt, "tokens tidy", settings.yes)? {
                return Ok(());
            }

            let deleted = tokens::execute_tidy(&client, &plan).await?;
            if !settings.quiet {
                for id in &deleted {
                    eprintln!("Deleted token {id}");
                }
            }
            Ok(())
        }
    }
}

fn describe_plan(plan: &TidyPlan) -> String {
    let mut out = String::new();
    if let Some(keep) = &plan.keep {
        out.push_str(&format!("Keeping current token {} ({})\n", keep.id, keep.key));
    }
    let rows: Vec<TokenRow> = plan.delete.iter().map(to_row).collect();
    out.push_str(&render_table(&rows));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ago_rounds_to_minutes() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let at = DateTime::from_timestamp(1_700_000_000 - 3 * 3600 - 12 * 60 - 5, 0).unwrap();
        assert_eq!(ago(at, now), "3h 12m ago");
        assert_eq!(ago(now, now), "just now");
    }
}
