use che_mint::utils::{logger, validation::Validate};
use che_mint::{build_service, CliConfig, MintError, MintOutcome};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting che-mint CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let service = build_service(&config)?;

    // Passive discovery first; only prompt if nothing is authorized yet.
    let account = match service.discover_account().await {
        Some(account) => account,
        None => match service.connect().await {
            Ok(account) => account,
            Err(MintError::ProviderUnavailable) => {
                eprintln!("❌ No wallet provider reachable at {}", config.rpc_endpoint);
                eprintln!("💡 Start your wallet bridge or pass --rpc-endpoint");
                std::process::exit(1);
            }
            Err(MintError::UserRejected) => {
                eprintln!("❌ Wallet connection was rejected");
                std::process::exit(1);
            }
            Err(e) => {
                tracing::error!("Connect failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
    };
    println!("🔑 Connected as {}", account);

    let Some(label) = config.label.clone() else {
        println!("Nothing to mint; pass --label to register a domain");
        return Ok(());
    };

    match service.mint(label.clone(), config.record.clone()).await {
        Ok(MintOutcome::Minted {
            registration,
            record,
        }) => {
            tracing::info!("✅ Mint completed");
            println!("✅ Minted {}", service.full_name(&label));
            println!("📜 Registration tx: {}", registration);
            println!("📝 Record tx: {}", record);
        }
        Ok(MintOutcome::Idle) => {
            println!("Empty label; nothing was submitted");
        }
        Err(e) => {
            tracing::error!("❌ Mint failed: {}", e);
            eprintln!("❌ {}", e);
            if let Some(hash) = e.registration_hash() {
                eprintln!(
                    "⚠️  {} is already registered (tx {}); retry to set the record",
                    service.full_name(&label),
                    hash
                );
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
