use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "xnft", version, about = "xNFT marketplace CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Solana RPC endpoint.
    #[arg(
        long,
        global = true,
        env = "XNFT_RPC_URL",
        default_value = "https://api.mainnet-beta.solana.com"
    )]
    pub rpc_url: String,

    /// Keypair file used to sign. Without one, only read commands work.
    #[arg(long, global = true, env = "XNFT_KEYPAIR")]
    pub keypair: Option<String>,

    /// Override the xNFT program id.
    #[arg(long, global = true)]
    pub program_id: Option<String>,

    /// processed|confirmed|finalized
    #[arg(long, global = true, default_value = "confirmed")]
    pub commitment: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show one xNFT with its resolved metadata.
    Account {
        address: String,

        /// Print the decoded on-chain record only.
        #[arg(long)]
        raw: bool,
    },

    /// List xNFTs, optionally by owner and kind.
    List {
        /// app|collectible
        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        owner: Option<String>,
    },

    /// List the installations of a wallet.
    Installs { wallet: String },

    /// List the reviews of an xNFT.
    Reviews { xnft: String },

    /// Compute a program address without touching the network.
    Derive {
        #[command(subcommand)]
        target: DeriveTarget,
    },

    /// Install an xNFT for the signing wallet.
    Install {
        xnft: String,

        /// Use the wallet's access grant for a private xNFT.
        #[arg(long)]
        permissioned: bool,
    },

    /// Remove an install record.
    Uninstall {
        install: String,

        /// Rent receiver (default: signer).
        #[arg(long)]
        receiver: Option<String>,
    },

    /// Review an installed xNFT.
    Review {
        xnft: String,

        /// 0 to 5
        #[arg(long)]
        rating: u8,

        #[arg(long)]
        uri: String,
    },

    /// Verify the curator assignment; signed by the curator.
    Verify { xnft: String },

    /// Withdraw curator verification; signed by the curator.
    Unverify { xnft: String },

    /// Suspend new installs of an xNFT.
    Suspend {
        xnft: String,

        /// Lift a suspension instead.
        #[arg(long)]
        lift: bool,
    },

    /// Close an xNFT owned by the signer.
    Delete {
        xnft: String,

        /// Also burn the master token and close its token account.
        #[arg(long)]
        burn: bool,

        /// Rent receiver (default: signer).
        #[arg(long)]
        receiver: Option<String>,
    },

    /// Check the RPC endpoint and signer.
    Doctor,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeriveTarget {
    /// Master mint of an App xNFT.
    Mint { name: String, publisher: String },
    /// xNFT record of a master mint.
    Xnft { mint: String },
    Install { wallet: String, xnft: String },
    Review { xnft: String, author: String },
    Access { wallet: String, xnft: String },
}
