//! Headless agent-vs-agent game for scripting. Prints one JSON object.

use battleboats::{Agent, AgentNode, EndReason, InMemoryTransport};
use serde_json::{json, Value};

fn parse_seed(arg: Option<String>) -> anyhow::Result<u64> {
    let text = arg.ok_or_else(|| anyhow::anyhow!("Usage: sim <seed1> <seed2>"))?;
    text.parse()
        .map_err(|e| anyhow::anyhow!("Invalid seed {:?}: {}", text, e))
}

fn summary(end: EndReason, node: &AgentNode) -> anyhow::Result<Value> {
    Ok(json!({
        "status": serde_json::to_value(end)?,
        "shots": node.turn_count(),
        "ships_afloat": node.agent().own_board().boat_states().count_ones(),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let seed1 = parse_seed(args.next())?;
    let seed2 = parse_seed(args.next())?;

    let (t1, t2) = InMemoryTransport::pair();
    let mut challenger = AgentNode::new(Agent::from_seed(seed1), Box::new(t1));
    let mut accepter = AgentNode::new(Agent::from_seed(seed2), Box::new(t2));

    let (end1, end2) = tokio::try_join!(challenger.run(true), accepter.run(false))?;

    let winner = match (end1, end2) {
        (EndReason::Victory, _) => Some("player1"),
        (_, EndReason::Victory) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": summary(end1, &challenger)?,
        "player2": summary(end2, &accepter)?,
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
