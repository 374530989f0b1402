use clap::Args;
use jiff::{SignedDuration, Timestamp};
use scoutline_app::{
    database::{self, Db},
    domain::password_resets::prune_expired_resets,
};

#[derive(Debug, Args)]
pub(crate) struct PruneArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Keep records that expired less than this many hours ago
    #[arg(long, default_value_t = 0)]
    grace_hours: i64,
}

pub(crate) async fn run(args: PruneArgs) -> Result<(), String> {
    let before = cutoff(Timestamp::now(), args.grace_hours)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let removed = prune_expired_resets(&Db::new(pool), before)
        .await
        .map_err(|error| format!("failed to prune password resets: {error}"))?;

    println!("removed {removed} password reset records expired before {before}");

    Ok(())
}

fn cutoff(now: Timestamp, grace_hours: i64) -> Result<Timestamp, String> {
    if grace_hours < 0 {
        return Err("grace-hours cannot be negative".to_string());
    }

    let grace = grace_hours
        .checked_mul(3600)
        .map(SignedDuration::from_secs)
        .ok_or_else(|| format!("grace-hours {grace_hours} is too large"))?;

    now.checked_sub(grace)
        .map_err(|error| format!("invalid grace period: {error}"))
}
