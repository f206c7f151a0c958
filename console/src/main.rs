use std::{
    io::{self, Write},
    process,
};

use abi::{Config, HotelError};
use anyhow::Result;
use clap::Parser;
use console::{connect_or_report, Console};
use tracing_subscriber::{fmt, EnvFilter};

/// Interactive console for the hotel booking database.
#[derive(Debug, Parser)]
#[command(name = "hotel-console")]
struct Args {
    /// database name
    dbname: String,
    /// database port
    port: u16,
    /// database user
    user: String,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    password: Option<String>,
    /// yaml file with the remaining settings, the arguments above win
    #[arg(long, short)]
    config: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(filename) => Config::load(filename)?,
            None => Config::from_args(self.dbname.as_str(), self.port, self.user.as_str()),
        };
        config.db.dbname = self.dbname;
        config.db.port = self.port;
        config.db.user = self.user;
        if let Some(host) = self.host {
            config.db.host = host;
        }
        if let Some(password) = self.password {
            config.db.password = password;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = Args::parse().into_config()?;

    println!("\n\n*******************************************************");
    println!("              User Interface      \t");
    println!("*******************************************************\n");
    println!("Connection URL: {}", config.db.redacted_url());
    print!("Connecting to database...");
    io::stdout().flush()?;

    let manager = match connect_or_report(&config.db, &mut io::stderr()).await {
        Ok(manager) => manager,
        Err(_) => process::exit(-1),
    };
    println!("Done");

    let stdin = io::stdin();
    let result = Console::new(
        &manager,
        stdin.lock(),
        io::stdout(),
        io::stderr(),
        config.console,
    )
    .run()
    .await;

    print!("Disconnecting from database...");
    manager.close().await;
    println!("Done\n\nBye !");

    match result {
        Ok(()) | Err(HotelError::InputClosed) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
