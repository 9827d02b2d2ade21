//! Sample legacy database seeded by the `pipeline` command

use anyhow::Result;
use mig_core::{ColumnDef, ColumnType, Record, RecordStore, TableSchema};
use mig_model::BusinessCriticality;
use mig_risk::MigrationProfile;
use serde_json::{json, Value};

const REGIONS: [&str; 4] = ["NORTH", "SOUTH", "EAST", "WEST"];

fn accounts() -> TableSchema {
    TableSchema::new("BILLING", "ACCOUNT_MASTER")
        .with_column(ColumnDef::new("ACCT_NO", ColumnType::Integer).not_null())
        .with_column(ColumnDef::new("ACCT_NAME", ColumnType::Char).with_length(30))
        .with_column(ColumnDef::new("REGION", ColumnType::Char).with_length(8))
        .with_column(ColumnDef::new("BALANCE", ColumnType::Decimal).with_precision(15, 2))
        .with_column(ColumnDef::new("OPENED", ColumnType::Date))
        .with_primary_key(["ACCT_NO"])
}

fn invoices() -> TableSchema {
    TableSchema::new("BILLING", "INVOICE")
        .with_column(ColumnDef::new("INVOICE_NO", ColumnType::Bigint).not_null())
        .with_column(ColumnDef::new("ACCT_NO", ColumnType::Integer).not_null())
        .with_column(ColumnDef::new("AMOUNT", ColumnType::Decimal).with_precision(11, 2))
        .with_column(ColumnDef::new("ISSUED_AT", ColumnType::Timestamp))
        .with_primary_key(["INVOICE_NO"])
}

fn row(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Create the sample tables with `records` rows each; returns the matching profile
pub(crate) async fn seed(store: &dyn RecordStore, records: usize) -> Result<MigrationProfile> {
    store.create_table(accounts()).await?;
    store.create_table(invoices()).await?;

    let account_rows = (0..records)
        .map(|i| {
            row(json!({
                "ACCT_NO": 100_000 + i,
                "ACCT_NAME": format!("{:<30}", format!("ACCOUNT {i:05}")),
                "REGION": format!("{:<8}", REGIONS[i % REGIONS.len()]),
                "BALANCE": (i as f64 * 37.129) % 10_000.0,
                "OPENED": "1998-07-01",
            }))
        })
        .collect();
    let invoice_rows = (0..records)
        .map(|i| {
            row(json!({
                "INVOICE_NO": 9_000_000 + i,
                "ACCT_NO": 100_000 + i / 3,
                "AMOUNT": format!("{:.3}", 19.995 + i as f64),
                "ISSUED_AT": "2024-01-31T23:59:59Z",
            }))
        })
        .collect();
    store.insert("BILLING", "ACCOUNT_MASTER", account_rows).await?;
    store.insert("BILLING", "INVOICE", invoice_rows).await?;

    tracing::info!(records, tables = 2, "sample legacy store seeded");
    Ok(MigrationProfile::default()
        .with_records(records as u64 * 2)
        .with_tables(2)
        .with_criticality(BusinessCriticality::High)
        .with_max_downtime_hours(4.0))
}
