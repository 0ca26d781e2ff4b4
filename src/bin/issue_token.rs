// Mints a bearer token for local testing.
// Usage: cargo run --bin issue_token -- --subject admin@example.com --role ADMIN

use chrono::Duration;
use clap::Parser;
use dotenvy::dotenv;

use events_server::auth::JwtKeys;
use events_server::config::Config;

#[derive(Debug, Parser)]
#[command(name = "issue_token", about = "Mint a bearer token for the events API")]
struct Args {
    /// Caller identity stored in the `sub` claim
    #[arg(long)]
    subject: String,

    /// Role claim; anything other than ADMIN or MANAGER is refused by the API
    #[arg(long, default_value = "ADMIN")]
    role: String,

    /// Lifetime in minutes
    #[arg(long, default_value_t = 60)]
    ttl_minutes: i64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let args = Args::parse();
    let config = Config::from_env()?;

    if args.role.parse::<events_server::auth::UserRole>().is_err() {
        eprintln!("Warning: '{}' is not a known role", args.role);
    }

    let token = JwtKeys::from_secret(&config.jwt_secret).issue(
        &args.subject,
        &args.role,
        Duration::minutes(args.ttl_minutes),
    )?;

    println!("{}", token);
    Ok(())
}
