use anyhow::Context;
use kasir_pos::{ReceiptPrintService, Store, print_banner, setup_environment};
use kasir_printer::TcpChannel;

/// Reprint a receipt: `kasir-pos [TRANSACTION_ID]` (latest when omitted)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    let config = setup_environment()?;

    print_banner();

    // 2. Store
    let db_path = config.database_path();
    let store = Store::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    // 3. Printer
    let addr = config
        .printer_addr
        .as_deref()
        .context("PRINTER_ADDR is not set")?;
    let mut channel = TcpChannel::from_addr(addr)?.with_timeout(config.connect_timeout());
    channel.connect().await?;

    // 4. Reprint
    let transaction_id = std::env::args().nth(1);
    let mut service = ReceiptPrintService::new(store, channel, config.chunk_config());
    let result = service.reprint(transaction_id.as_deref()).await;
    service.channel_mut().disconnect().await;

    let (tx, report) = result?;
    println!(
        "Printed {} ({} bytes in {} chunks)",
        tx.id, report.bytes, report.chunks
    );
    Ok(())
}
