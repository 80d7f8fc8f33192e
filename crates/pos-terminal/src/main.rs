use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::printer::receipt::{format_currency, format_weight};
use application::printer::{PrinterManager, render_receipt};
use application::search::filter_and_rank;
use application::session::{SaveDestination, SessionService};
use application::sync::{Reconciler, SyncOutcome};
use domain::connectivity::ConnectivityProbe;
use domain::printer::PrinterConnection;
use domain::session::{EditContext, OfflineQueue, SessionStore, WeighingSession};
use infrastructure::config::TerminalConfig;
use infrastructure::printer::{FilePrinter, NetworkPrinter};
use infrastructure::{HttpConnectivityMonitor, KvOfflineQueue, RestSessionStore, SqliteKvStore};
use pos_terminal::draft_file::DraftFile;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weighing nota terminal", long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the operator identity recorded on new sessions
    #[arg(long)]
    operator: Option<String>,

    /// Override the remote store base URL
    #[arg(long)]
    remote_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a weighing session from a draft file and print the nota
    Record {
        /// JSON draft file
        draft: PathBuf,
        /// Skip printing
        #[arg(long)]
        no_print: bool,
    },
    /// Upload queued sessions to the remote store
    Sync,
    /// List sessions waiting in the offline queue
    Pending,
    /// Search cached sessions (multi-term; supports >, < and berat> operators)
    Search {
        /// Query terms
        query: Vec<String>,
    },
    /// Re-print the nota of a stored session
    Reprint {
        /// Session id (queued or synced)
        id: String,
    },
}

/// Wired-up collaborators shared by every command.
struct Terminal {
    config: TerminalConfig,
    queue: Arc<dyn OfflineQueue>,
    remote: Arc<dyn SessionStore>,
    monitor: HttpConnectivityMonitor,
}

impl Terminal {
    async fn init(config: TerminalConfig) -> Result<Self> {
        if let Some(dir) = std::path::Path::new(&config.storage_path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("cannot create data directory {}", dir.display()))?;
            }
        }

        let db_url = format!("sqlite://{}?mode=rwc", config.storage_path);
        info!("💾 Local storage: {}", db_url);
        let kv = SqliteKvStore::new(&db_url).await?;
        let queue: Arc<dyn OfflineQueue> = Arc::new(KvOfflineQueue::new(Arc::new(kv)));

        let remote: Arc<dyn SessionStore> = Arc::new(RestSessionStore::new(
            &config.remote.base_url,
            Duration::from_secs(config.remote.poll_interval_secs),
        ));

        let monitor = HttpConnectivityMonitor::new(&config.remote.base_url);
        let online = monitor.probe_now().await;
        info!(
            "📡 Remote store {} is {}",
            config.remote.base_url,
            if online { "ONLINE" } else { "OFFLINE" }
        );

        Ok(Self {
            config,
            queue,
            remote,
            monitor,
        })
    }

    /// Locate a session by id: the offline queue first (it holds the freshest
    /// copy of anything queued), then the remote store when reachable.
    async fn find_session(&self, id: &str) -> Result<Option<WeighingSession>> {
        if let Some(session) = self
            .queue
            .list()
            .await?
            .into_iter()
            .find(|s| s.id.as_str() == id)
        {
            return Ok(Some(session));
        }

        if !self.monitor.is_connected() {
            return Ok(None);
        }
        Ok(self
            .remote
            .fetch_all()
            .await?
            .into_iter()
            .find(|s| s.id.as_str() == id))
    }

    /// The search working set: queued records plus the remote snapshot,
    /// deduplicated by id with the queued copy winning.
    async fn snapshot(&self) -> Result<Vec<WeighingSession>> {
        let mut all = self.queue.list().await?;

        if self.monitor.is_connected() {
            match self.remote.fetch_all().await {
                Ok(remote) => {
                    for session in remote {
                        if !all.iter().any(|q| q.id == session.id) {
                            all.push(session);
                        }
                    }
                }
                Err(e) => warn!("Remote snapshot unavailable: {}", e),
            }
        } else {
            warn!("Offline: searching queued sessions only");
        }

        Ok(all)
    }
}

async fn run() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,pos_terminal=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = TerminalConfig::load(&args.config_dir)?;
    if let Some(operator) = args.operator {
        config.operator = operator;
    }
    if let Some(url) = args.remote_url {
        config.remote.base_url = url;
    }

    info!("🧾 Timbang POS Terminal");
    info!("👤 Operator: {}", config.operator);

    let terminal = Terminal::init(config).await?;

    match args.command {
        Command::Record { draft, no_print } => record(&terminal, &draft, no_print).await,
        Command::Sync => sync(&terminal).await,
        Command::Pending => pending(&terminal).await,
        Command::Search { query } => search(&terminal, &query.join(" ")).await,
        Command::Reprint { id } => reprint(&terminal, &id).await,
    }
}

async fn record(terminal: &Terminal, draft_path: &std::path::Path, no_print: bool) -> Result<()> {
    let file = DraftFile::load(draft_path)?;

    let editing = match &file.edit_id {
        Some(id) => {
            let existing = terminal
                .find_session(id)
                .await?
                .ok_or_else(|| anyhow!("session {id} not found locally or remotely"))?;
            Some(EditContext {
                id: existing.id.clone(),
                created_by: existing.data.created_by.clone(),
                created_at: existing.data.created_at,
            })
        }
        None => None,
    };

    let service = SessionService::new(
        terminal.remote.clone(),
        terminal.queue.clone(),
        Arc::new(terminal.monitor.clone()),
        &terminal.config.operator,
    );
    let saved = service.save(&file.into_draft(editing)).await?;

    match saved.destination {
        SaveDestination::Remote => {
            info!("✅ Nota {} tersimpan di database pusat", saved.session.id);
        }
        SaveDestination::OfflineQueue => {
            warn!("💾 Tersimpan offline. Mohon sinkronisasi saat online.");
        }
    }

    if no_print {
        return Ok(());
    }
    print_receipt(terminal, &saved.session).await
}

async fn sync(terminal: &Terminal) -> Result<()> {
    let reconciler = Reconciler::new(
        terminal.queue.clone(),
        terminal.remote.clone(),
        Arc::new(terminal.monitor.clone()),
    );

    match reconciler.run().await? {
        SyncOutcome::NoConnection => warn!("Tidak ada koneksi internet"),
        SyncOutcome::NothingToSync => info!("Tidak ada data untuk disinkronkan"),
        SyncOutcome::Completed(report) if report.failed == 0 => {
            info!("✅ {} data berhasil disinkronkan!", report.synced);
        }
        SyncOutcome::Completed(report) => {
            warn!(
                "⚠️ Selesai sebagian: {} berhasil, {} gagal. Silakan coba lagi nanti.",
                report.synced, report.failed
            );
        }
    }
    Ok(())
}

async fn pending(terminal: &Terminal) -> Result<()> {
    let count = terminal.queue.pending_count().await?;
    if count == 0 {
        info!("Tidak ada data yang perlu disinkronkan.");
        return Ok(());
    }

    info!("{} Data Pending", count);
    for session in terminal.queue.list().await? {
        let kind = if session.id.is_pending() {
            "Data Baru"
        } else {
            "Edit Data"
        };
        println!(
            "{}  {}  {}  {} Kg  {}  [{}]",
            session.id,
            session.data.date,
            session.data.buyer,
            format_weight(session.data.total_net_weight),
            format_currency(session.data.total_amount),
            kind
        );
    }
    Ok(())
}

async fn search(terminal: &Terminal, query: &str) -> Result<()> {
    let snapshot = terminal.snapshot().await?;
    let results = filter_and_rank(&snapshot, query);

    info!("{} hasil ditemukan untuk \"{}\"", results.len(), query);
    for session in &results {
        println!(
            "{}  {} {}  {}  {} Kg  {}  {}",
            session.id,
            session.data.date,
            session.data.time,
            session.data.buyer,
            format_weight(session.data.total_net_weight),
            format_currency(session.data.total_amount),
            session.data.payment_status.as_str()
        );
    }
    Ok(())
}

async fn reprint(terminal: &Terminal, id: &str) -> Result<()> {
    let session = terminal
        .find_session(id)
        .await?
        .ok_or_else(|| anyhow!("session {id} not found locally or remotely"))?;
    print_receipt(terminal, &session).await
}

async fn print_receipt(terminal: &Terminal, session: &WeighingSession) -> Result<()> {
    let Some(printer_config) = terminal.config.printer.as_ref().filter(|p| p.enabled) else {
        info!("🖨️ Printer disabled; nota not printed");
        return Ok(());
    };

    let settings = terminal.config.farm.clone().unwrap_or_default();
    let job = render_receipt(session, &settings);

    let connection: Box<dyn PrinterConnection> = if printer_config.r#type.as_deref() == Some("File")
        || printer_config.path.is_some()
    {
        let path = printer_config.path.as_deref().unwrap_or("receipts.escpos");
        info!(path = %path, "🖨️ Spooling nota to file");
        Box::new(FilePrinter::new(path))
    } else {
        info!(host = %printer_config.host, port = %printer_config.port, "🖨️ Printing nota");
        Box::new(NetworkPrinter::new(&printer_config.host, printer_config.port))
    };

    let (tx, rx) = tokio::sync::mpsc::channel(4);
    let manager = PrinterManager::new(connection, rx);
    let handle = tokio::spawn(manager.run());

    tx.send(job).await?;
    drop(tx);

    // The manager retries on its own; bound the wait so an unreachable
    // printer cannot hang the command forever.
    if tokio::time::timeout(Duration::from_secs(30), handle)
        .await
        .is_err()
    {
        warn!("⚠️ Printer not reachable within 30s. Nota not printed; use reprint later.");
    }
    Ok(())
}

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    if let Err(e) = rt.block_on(run()) {
        eprintln!("\n❌ ERROR: {:?}", e);
        std::process::exit(1);
    }
}
