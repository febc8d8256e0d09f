use inter_statement_rs::{OfxBuilder, StatementRequest, inter::prelude::*};
use serde::Deserialize;
use std::{env, io::Write};

#[derive(Deserialize)]
struct Extrato {
    #[serde(default)]
    transacoes: Vec<InterTransactionRaw>,
}

const SAMPLE_EXTRATO: &str = r#"{
    "transacoes": [
        {"tipoOperacao": "C", "dataEntrada": "2024-03-01", "valor": 150.00, "descricao": "Deposit"},
        {"tipoOperacao": "D", "dataEntrada": "2024-03-04", "valor": 89.90, "descricao": "Pagamento de boleto"},
        {"tipoOperacao": "D", "dataEntrada": "2024-03-12", "valor": 12.5, "descricao": "Pix enviado"}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: cargo run --example render_ofx [extrato.json] [start] [end]
    let args: Vec<String> = env::args().collect();

    let content = match args.get(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            eprintln!("Using built-in sample statement\n");
            SAMPLE_EXTRATO.to_string()
        }
    };
    let start = args.get(2).map(String::as_str).unwrap_or("2024-03-01");
    let end = args.get(3).map(String::as_str).unwrap_or("2024-03-31");

    let extrato: Extrato = serde_json::from_str(&content)?;
    eprintln!("Found {} transactions", extrato.transacoes.len());

    let balance: InterBalanceRaw = serde_json::from_str(r#"{"disponivel": 47.6}"#)?;
    let ofx = OfxBuilder::new()
        .raw_transactions(extrato.transacoes)
        .balance(balance)
        .request(StatementRequest::new(start, end))
        .build();

    std::io::stdout().write_all(&ofx)?;
    println!();

    Ok(())
}
