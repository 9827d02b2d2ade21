//! Testing utilities for the migration workspace
//!
//! Shared customers, legacy tables, seeded stores and vote providers.

#![allow(missing_docs)]

use async_trait::async_trait;
use mig_core::{
    ColumnDef, ColumnType, Decision, InMemoryStore, Participant, Record, RecordStore, TableSchema, VoteProvider,
};
use mig_model::{BusinessCriticality, ChannelType, Customer, IntegrationChannel};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Turn a JSON object literal into a record
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("record fixture must be a JSON object, got {other}"),
    }
}

pub fn rest_channel(id: &str) -> IntegrationChannel {
    IntegrationChannel::new(id, ChannelType::RestApi, "Orders API")
        .with_config("api_type", "REST")
        .with_target_endpoint(format!("https://api.example.com/{id}"))
}

pub fn edi_channel(id: &str) -> IntegrationChannel {
    IntegrationChannel::new(id, ChannelType::Edi, "EDI gateway")
        .with_config("protocol", "X12")
        .with_config("version", "4010")
        .with_volume(25_000)
}

pub fn thick_client_channel(id: &str) -> IntegrationChannel {
    IntegrationChannel::new(id, ChannelType::ThickClient, "Desktop order entry")
}

/// One REST channel, low criticality, reachable contact
pub fn low_risk_customer() -> Customer {
    Customer::new("CUST-LOW", "Small Retailer")
        .with_criticality(BusinessCriticality::Low)
        .with_email("it@small-retailer.example")
        .with_channel(rest_channel("CH-REST-1"))
}

/// Six EDI / thick-client channels, critical, HIPAA and PCI-DSS
pub fn critical_legacy_customer() -> Customer {
    let mut customer = Customer::new("CUST-CRIT", "Regional Health Network")
        .with_criticality(BusinessCriticality::Critical)
        .with_compliance("HIPAA")
        .with_compliance("PCI-DSS")
        .with_phone("+1-555-0199");
    for i in 0..6 {
        let channel = if i % 2 == 0 {
            edi_channel(&format!("CH-EDI-{i}"))
        } else {
            thick_client_channel(&format!("CH-TC-{i}"))
        };
        customer = customer.with_channel(channel);
    }
    customer
}

/// REST and EDI channels, both with target endpoints
pub fn two_channel_customer() -> Customer {
    Customer::new("CUST-TWO", "Acme Distribution")
        .with_criticality(BusinessCriticality::High)
        .with_email("integration@acme.example")
        .with_channel(rest_channel("CH-REST-1"))
        .with_channel(edi_channel("CH-EDI-1").with_target_endpoint("https://edi.example.com/inbound"))
}

/// Legacy customer master table
pub fn customer_table() -> TableSchema {
    TableSchema::new("PROD", "CUSTOMER_MASTER")
        .with_column(ColumnDef::new("CUST_ID", ColumnType::Integer).not_null())
        .with_column(ColumnDef::new("CUST_NAME", ColumnType::Char).with_length(40))
        .with_column(ColumnDef::new("CREDIT_LIMIT", ColumnType::Decimal).with_precision(12, 2))
        .with_column(ColumnDef::new("REGION", ColumnType::Smallint))
        .with_primary_key(["CUST_ID"])
}

/// Legacy order header table
pub fn order_table() -> TableSchema {
    TableSchema::new("PROD", "ORDER_HEADER")
        .with_column(ColumnDef::new("ORDER_ID", ColumnType::Bigint).not_null())
        .with_column(ColumnDef::new("CUST_ID", ColumnType::Integer).not_null())
        .with_column(ColumnDef::new("STATUS", ColumnType::Char).with_length(8))
        .with_column(ColumnDef::new("ORDER_DATE", ColumnType::Date))
        .with_primary_key(["ORDER_ID"])
}

pub fn customer_rows(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            record(json!({
                "CUST_ID": i,
                "CUST_NAME": format!("{:<40}", format!("CUSTOMER {i}")),
                "CREDIT_LIMIT": 1000.0 + i as f64 * 12.345,
                "REGION": i % 4,
            }))
        })
        .collect()
}

pub fn order_rows(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            record(json!({
                "ORDER_ID": 10_000 + i,
                "CUST_ID": i % 7,
                "STATUS": "OPEN    ",
                "ORDER_DATE": "2024-03-01",
            }))
        })
        .collect()
}

/// Legacy store with both tables and `rows` rows in each
pub async fn seeded_legacy_store(rows: usize) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::legacy());
    store.create_table(customer_table()).await.unwrap();
    store.create_table(order_table()).await.unwrap();
    store.insert("PROD", "CUSTOMER_MASTER", customer_rows(rows)).await.unwrap();
    store.insert("PROD", "ORDER_HEADER", order_rows(rows)).await.unwrap();
    store
}

/// Approves unless the participant id is denied
#[derive(Debug, Default)]
pub struct ScriptedVotes {
    deny: HashSet<String>,
}

impl ScriptedVotes {
    pub fn approve_all() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn denying(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            deny: ids.iter().map(ToString::to_string).collect(),
        })
    }
}

#[async_trait]
impl VoteProvider for ScriptedVotes {
    async fn vote(&self, participant: &Participant, _decision: &Decision) -> bool {
        !self.deny.contains(&participant.id)
    }
}
