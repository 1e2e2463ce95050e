use partitioned_kv::{KeyValueStore, NodeState, RangeRouter, ShardRouter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut shards = 5usize;
    let mut ranges = 50usize;
    let mut replicas = 0usize;
    let mut down: Vec<usize> = vec![];

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shards" | "--ranges" | "--replicas" | "--down" if i + 1 >= args.len() => {
                anyhow::bail!("{} expects a value", args[i]);
            }
            "--shards" => {
                shards = args[i + 1].parse()?;
                i += 2;
            }
            "--ranges" => {
                ranges = args[i + 1].parse()?;
                i += 2;
            }
            "--replicas" => {
                replicas = args[i + 1].parse()?;
                i += 2;
            }
            "--down" => {
                down.push(args[i + 1].parse()?);
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--shards <n>] [--ranges <n>] [--replicas <r>] [--down <idx>]...",
                    args[0]
                );
                eprintln!("Example: {} --ranges 10 --replicas 2 --down 3", args[0]);
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Sharding:
    let storage = ShardRouter::new(shards)?;
    storage.mark_all_up();
    tracing::info!("Sharding over {} nodes", storage.node_count());

    storage.create("toto", 1)?;
    tracing::info!("toto -> {}", storage.read("toto")?);
    storage.update("toto", 2)?;
    tracing::info!("toto -> {}", storage.read("toto")?);
    if let Err(e) = storage.update("tutu", 1) {
        tracing::info!("update tutu: {}", e);
    }
    storage.delete("toto")?;
    if let Err(e) = storage.read("toto") {
        tracing::info!("read toto after delete: {}", e);
    }

    // 2. Consistent hashing:
    let storage_ch = RangeRouter::with_replicas(ranges, replicas)?;
    storage_ch.mark_all_up();
    for &idx in &down {
        storage_ch.set_node_state(idx, NodeState::Down)?;
    }
    tracing::info!(
        "Consistent hashing over {} nodes ({} replicas, {} down)",
        storage_ch.node_count(),
        storage_ch.replicas(),
        down.len()
    );

    storage_ch.create("toto", 1)?;
    tracing::info!("toto owned by {:?}", storage_ch.owners("toto"));
    match storage_ch.read("toto") {
        Ok(value) => tracing::info!("toto -> {}", value),
        Err(e) => tracing::warn!("read toto: {}", e),
    }

    println!("{}", serde_json::to_string_pretty(&storage_ch.snapshot())?);

    Ok(())
}
