use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inter_statement_rs::{
    StatementPipeline, StatementRequest,
    delivery::prelude::*,
    inter::prelude::*,
};
use tracing_subscriber::EnvFilter;

/// Banco Inter statement automator
#[derive(Parser, Debug)]
#[command(name = "inter-statement", version, about, long_about = None)]
struct Cli {
    /// Data de (YYYY-MM-DD)
    #[arg(long = "de", visible_alias = "start")]
    start: String,

    /// Data até (YYYY-MM-DD)
    #[arg(long = "ate", visible_alias = "end")]
    end: String,

    /// Diretório para salvar arquivos
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,

    /// Arquivo JSON com client_id, client_secret, cert e key do Banco Inter
    #[arg(long)]
    bank_creds: PathBuf,

    /// Credenciais do Google Drive (JSON com access_token e folder_id opcional)
    #[arg(long)]
    drive_creds: Option<PathBuf>,

    /// API key do SendGrid
    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    sendgrid_key: Option<String>,

    /// Lista de emails separada por vírgula
    #[arg(long)]
    recipients: Option<String>,

    /// Remetente dos emails
    #[arg(long, default_value = DEFAULT_SENDER)]
    from_email: String,

    /// Imprime o relatório final em JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;

    let cli = Cli::parse();

    let request = StatementRequest::new(cli.start.as_str(), cli.end.as_str());
    request.validate().context("invalid statement range")?;

    let credentials = BankCredentials::load(&cli.bank_creds)
        .with_context(|| format!("read bank credentials {}", cli.bank_creds.display()))?;
    let client = InterClient::connect(&credentials).context("authenticate with Banco Inter")?;

    let mut pipeline = StatementPipeline::new(client, &cli.output_dir);

    if let Some(path) = &cli.drive_creds {
        let drive = DriveCredentials::load(path)
            .with_context(|| format!("read Google Drive credentials {}", path.display()))?;
        pipeline = pipeline.uploader(DriveUploader::new(drive)?);
    }

    if let Some(api_key) = cli.sendgrid_key {
        let recipients = parse_recipients(cli.recipients.as_deref().unwrap_or_default());
        let mailer = SendGridMailer::new(api_key, cli.from_email, recipients)
            .context("configure SendGrid mailer (check --recipients)")?;
        pipeline = pipeline.mailer(mailer);
    }

    let report = pipeline
        .run(&request)
        .with_context(|| format!("statement {}", request.base_name()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("PDF: {}", report.pdf_path.display());
        println!("OFX: {} ({} transactions)", report.ofx_path.display(), report.transaction_count);
        for id in &report.uploaded_ids {
            println!("Drive file: {id}");
        }
        if report.emailed {
            println!("Email sent");
        }
    }

    Ok(())
}
