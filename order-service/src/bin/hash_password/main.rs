use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use auth::PasswordError;
use auth::PasswordHasher;
use clap::Parser;

/// Produce a password hash for seeding a credential by hand, e.g. the first director.
#[derive(Parser)]
#[command(name = "hash-password")]
#[command(about = "Hash a password in the format stored by order-service", long_about = None)]
struct Args {
    /// Plaintext password to hash
    password: String,

    /// Existing stored hash to check the password against
    #[arg(long)]
    verify: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let hasher = PasswordHasher::new();

    if args.password.is_empty() {
        bail!("Password must not be empty");
    }

    let hash = hasher
        .hash(&args.password)
        .context("Failed to hash password")?;
    println!("{}", hash);

    if let Some(existing) = args.verify {
        match hasher.verify(&args.password, &existing) {
            Ok(()) => eprintln!("Existing hash matches"),
            Err(PasswordError::Mismatch) => bail!("Existing hash does not match the password"),
            Err(e) => return Err(e).context("Existing hash could not be checked"),
        }
    }

    Ok(())
}
