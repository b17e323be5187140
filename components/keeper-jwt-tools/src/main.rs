use clap::{Args, Parser, Subcommand};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;
use std::time::Duration;
use time::OffsetDateTime;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Keeper access token tools.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new access token.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Secret key used to sign access token (`security.jwt_secret`).
    #[arg(short, long)]
    secret: String,
    /// ID of the user the token is issued to.
    #[arg(long)]
    user_id: i64,
    /// Token time-to-live, e.g. `1h` or `30days`.
    #[arg(long)]
    exp: humantime::Duration,
}

fn generate(secret: &str, user_id: i64, ttl: Duration) -> anyhow::Result<String> {
    anyhow::ensure!(user_id > 0, "User ID must be a positive number.");

    let exp = OffsetDateTime::now_utc() + ttl;
    Ok(encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "user_id": user_id,
            "exp": exp.unix_timestamp(),
        }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = Cli::parse();
    match &args.command {
        Commands::Generate(generate_args) => {
            let jwt = generate(
                &generate_args.secret,
                generate_args.user_id,
                *generate_args.exp.as_ref(),
            )?;
            println!("{jwt}");
        }
    }

    Ok(())
}
