//! Static scenario templates per channel type

use mig_model::ChannelType;
use serde_json::{json, Value};

/// Blueprint a [`TestScenario`](crate::TestScenario) is stamped from
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTemplate {
    /// Scenario name
    pub name: &'static str,
    /// What is exercised
    pub description: &'static str,
    /// Input data
    pub test_data: Value,
    /// Expected outcome
    pub expected_results: Value,
    /// Validation rule labels
    pub validation_rules: &'static [&'static str],
}

/// Templates for a channel type, in execution order
#[must_use]
pub fn templates_for(channel_type: ChannelType) -> Vec<ScenarioTemplate> {
    match channel_type {
        ChannelType::Edi => vec![
            ScenarioTemplate {
                name: "EDI 850 Purchase Order",
                description: "Test EDI 850 purchase order processing",
                test_data: json!({
                    "transaction_set": "850",
                    "po_number": "PO123456",
                    "items": [{"sku": "ITEM001", "quantity": 10}]
                }),
                expected_results: json!({"status": "accepted"}),
                validation_rules: &["Valid 997 acknowledgment", "Data integrity"],
            },
            ScenarioTemplate {
                name: "EDI 856 ASN",
                description: "Test EDI 856 Advanced Shipping Notice",
                test_data: json!({
                    "transaction_set": "856",
                    "shipment_id": "SHIP789",
                    "tracking": "1Z999AA10123456784"
                }),
                expected_results: json!({"status": "processed"}),
                validation_rules: &["Shipment tracking updated", "Notification sent"],
            },
        ],
        ChannelType::Sftp => vec![
            ScenarioTemplate {
                name: "File Upload",
                description: "Test SFTP file upload",
                test_data: json!({"filename": "orders_20240101.csv", "records": 100}),
                expected_results: json!({"status": "uploaded", "records_processed": 100}),
                validation_rules: &["All records processed", "No errors"],
            },
            ScenarioTemplate {
                name: "File Download",
                description: "Test SFTP file download",
                test_data: json!({"filename": "reports_20240101.pdf"}),
                expected_results: json!({"status": "downloaded", "size_bytes": 1024}),
                validation_rules: &["File integrity verified"],
            },
        ],
        ChannelType::RestApi => vec![
            ScenarioTemplate {
                name: "GET Request",
                description: "Test GET API endpoint",
                test_data: json!({"endpoint": "/api/orders/12345", "method": "GET"}),
                expected_results: json!({"status": 200, "order_found": true}),
                validation_rules: &["Response code 200", "Valid JSON"],
            },
            ScenarioTemplate {
                name: "POST Request",
                description: "Test POST API endpoint",
                test_data: json!({
                    "endpoint": "/api/orders",
                    "method": "POST",
                    "body": {"order_number": "ORD456"}
                }),
                expected_results: json!({"status": 201, "order_created": true}),
                validation_rules: &["Response code 201", "Order ID returned"],
            },
        ],
        ChannelType::SoapApi => vec![ScenarioTemplate {
            name: "SOAP Service Call",
            description: "Test SOAP web service",
            test_data: json!({"operation": "GetOrderStatus", "order_id": "12345"}),
            expected_results: json!({"status": "success"}),
            validation_rules: &["Valid SOAP response", "Status returned"],
        }],
        ChannelType::ThickClient => vec![
            ScenarioTemplate {
                name: "Login Test",
                description: "Test user authentication",
                test_data: json!({"username": "testuser", "action": "login"}),
                expected_results: json!({"authenticated": true}),
                validation_rules: &["Session established"],
            },
            ScenarioTemplate {
                name: "Data Sync Test",
                description: "Test data synchronization",
                test_data: json!({"sync_type": "full", "records": 50}),
                expected_results: json!({"synced": 50}),
                validation_rules: &["All records synced", "No conflicts"],
            },
        ],
        ChannelType::WebPortal => vec![ScenarioTemplate {
            name: "Portal Login",
            description: "Test web portal login",
            test_data: json!({"username": "customer@example.com", "action": "login"}),
            expected_results: json!({"authenticated": true}),
            validation_rules: &["Successful login", "Dashboard loaded"],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_channel_type_has_templates() {
        let counts: Vec<_> = ChannelType::ALL.iter().map(|t| templates_for(*t).len()).collect();
        assert_eq!(counts, vec![2, 2, 2, 1, 2, 1]);
    }

    #[test]
    fn edi_templates_carry_transaction_sets() {
        let t = templates_for(ChannelType::Edi);
        assert_eq!(t[0].test_data["transaction_set"], "850");
        assert_eq!(t[1].test_data["transaction_set"], "856");
        assert_eq!(t[0].test_data["items"][0]["quantity"], 10);
    }
}
