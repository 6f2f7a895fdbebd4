use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chain-ops")]
#[command(about = "Toolkit for offline multisig transactions and deployment consistency checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an unsigned transaction envelope from a calls file
    Generate {
        /// Calls file: JSON array of {contract_address, entry_point, chain, payload}
        calls_file: String,

        /// Sender account address
        #[arg(long)]
        sender: String,

        /// Account nonce, supplied explicitly (never fetched from the chain)
        #[arg(long)]
        nonce: String,

        /// Transaction type: invoke, declare
        #[arg(long, default_value = "invoke")]
        tx_type: String,

        /// L1 gas bounds as max_amount,max_price_per_unit
        #[arg(long, default_value = "0x0,0x0")]
        l1_gas: String,

        /// L2 gas bounds as max_amount,max_price_per_unit
        #[arg(long, default_value = "0x0,0x0")]
        l2_gas: String,

        /// L1 data bounds as max_amount,max_price_per_unit
        #[arg(long, default_value = "0x0,0x0")]
        l1_data: String,

        /// Tip, hex
        #[arg(long, default_value = "0x0")]
        tip: String,

        /// Directory for the unsigned transaction artifact
        #[arg(long, default_value = "output")]
        output_dir: String,

        /// Base filename; a timestamp is inserted before the extension
        #[arg(long)]
        filename: Option<String>,
    },
    /// Merge independently signed artifacts into one multisig transaction
    Combine {
        /// Unsigned transaction file the signatures commit to
        #[arg(long)]
        unsigned: String,

        /// Signed artifact files, one per signer
        #[arg(long = "signed", required = true)]
        signed: Vec<String>,

        /// Signer addresses, same order as --signed and as the multisig account expects
        #[arg(long = "signer", required = true)]
        signers: Vec<String>,

        /// Directory for the combined artifact (defaults next to --unsigned)
        #[arg(long)]
        output_dir: Option<String>,

        /// Base filename; a timestamp is inserted before the extension
        #[arg(long)]
        filename: Option<String>,
    },
    /// Cross-check router, coordinator and multisig snapshots
    Check {
        /// Router chain-list snapshot file
        #[arg(long)]
        router: String,

        /// Coordinator chain→prover snapshot file
        #[arg(long)]
        coordinator: String,

        /// Multisig chain→prover snapshot file
        #[arg(long)]
        multisig: String,

        /// Deployment config; enables the address-uniqueness check
        #[arg(long)]
        config: Option<String>,

        /// Treat chains known to the router but not the coordinator as violations
        #[arg(long)]
        flag_router_gaps: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            calls_file,
            sender,
            nonce,
            tx_type,
            l1_gas,
            l2_gas,
            l1_data,
            tip,
            output_dir,
            filename,
        } => commands::generate::run(
            &calls_file,
            &sender,
            &nonce,
            &tx_type,
            &l1_gas,
            &l2_gas,
            &l1_data,
            &tip,
            &output_dir,
            filename.as_deref(),
        ),
        Commands::Combine {
            unsigned,
            signed,
            signers,
            output_dir,
            filename,
        } => commands::combine::run(
            &unsigned,
            &signed,
            &signers,
            output_dir.as_deref(),
            filename.as_deref(),
        ),
        Commands::Check {
            router,
            coordinator,
            multisig,
            config,
            flag_router_gaps,
        } => commands::check::run(
            &router,
            &coordinator,
            &multisig,
            config.as_deref(),
            flag_router_gaps,
        ),
    }
}
