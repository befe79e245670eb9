use battleboats::{
    init_logging, print_view, Agent, AgentNode, EndReason, InMemoryTransport, LineTransport,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play two automated agents against each other on the local machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Wait for a peer to connect and answer its challenge.
    TcpServer {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Connect to a waiting peer and challenge it.
    TcpClient {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn announce_seed(seed: Option<u64>) {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
}

fn report(result: anyhow::Result<EndReason>) {
    match result {
        Ok(reason) => println!("{}", reason.status_text()),
        Err(e) => eprintln!("Game ended with an error: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed } => {
            println!("Starting local agent vs agent game...");
            announce_seed(seed);
            let (t1, t2) = InMemoryTransport::pair();
            let mut node1 = AgentNode::new(Agent::new(make_rng(seed, 0)), Box::new(t1))
                .with_redraw(|agent| print_view(&agent.view()));
            let mut node2 = AgentNode::new(Agent::new(make_rng(seed, 1)), Box::new(t2));

            let (r1, r2) = tokio::join!(node1.run(true), node2.run(false));
            print!("Player 1: ");
            report(r1);
            print!("Player 2: ");
            report(r2);
        }
        Commands::TcpServer { bind, seed } => {
            println!("Starting TCP server at {}...", bind);
            announce_seed(seed);
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a player to connect...");
            let (stream, addr) = listener.accept().await?;
            stream.set_nodelay(true)?;
            println!("Player connected from {}", addr);

            let transport = Box::new(LineTransport::new(stream));
            let mut node = AgentNode::new(Agent::new(make_rng(seed, 0)), transport)
                .with_redraw(|agent| print_view(&agent.view()));
            report(node.run(false).await);
        }
        Commands::TcpClient { connect, seed } => {
            println!("Connecting to TCP server at {}...", connect);
            announce_seed(seed);
            let transport = Box::new(LineTransport::connect(&connect).await?);
            println!("Connected successfully!");

            let mut node = AgentNode::new(Agent::new(make_rng(seed, 0)), transport)
                .with_redraw(|agent| print_view(&agent.view()));
            report(node.run(true).await);
        }
    }
    Ok(())
}
