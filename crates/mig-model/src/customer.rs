//! Customers and integration channels

use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of customer-facing integration surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Electronic Data Interchange (X12, EDIFACT)
    Edi,
    /// Batch file exchange over SFTP
    Sftp,
    /// REST API
    RestApi,
    /// SOAP web service
    SoapApi,
    /// Installed desktop client
    ThickClient,
    /// Browser-based portal
    WebPortal,
}

impl ChannelType {
    /// Every channel type, in declaration order
    pub const ALL: [ChannelType; 6] = [
        ChannelType::Edi,
        ChannelType::Sftp,
        ChannelType::RestApi,
        ChannelType::SoapApi,
        ChannelType::ThickClient,
        ChannelType::WebPortal,
    ];

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Edi => "edi",
            ChannelType::Sftp => "sftp",
            ChannelType::RestApi => "rest_api",
            ChannelType::SoapApi => "soap_api",
            ChannelType::ThickClient => "thick_client",
            ChannelType::WebPortal => "web_portal",
        }
    }

    /// EDI and thick clients are treated as legacy integration styles
    #[inline]
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self, ChannelType::Edi | ChannelType::ThickClient)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::ChannelType(s.to_string()))
    }
}

/// Business-criticality tier of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessCriticality {
    /// Low
    Low,
    /// Medium (default)
    #[default]
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl BusinessCriticality {
    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessCriticality::Low => "low",
            BusinessCriticality::Medium => "medium",
            BusinessCriticality::High => "high",
            BusinessCriticality::Critical => "critical",
        }
    }

    /// Parse case-insensitively, falling back to `Medium` for unknown tiers
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for BusinessCriticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessCriticality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseError::Criticality(s.to_string())),
        }
    }
}

/// One integration channel owned by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationChannel {
    /// Channel identifier, unique within the customer
    pub channel_id: String,
    /// Integration style
    pub channel_type: ChannelType,
    /// Human-readable name
    pub name: String,
    /// Free-form configuration (protocol, version, api_type, ...)
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    /// Legacy system endpoint
    #[serde(default)]
    pub legacy_endpoint: Option<String>,
    /// Modern platform endpoint
    #[serde(default)]
    pub target_endpoint: Option<String>,
    /// Whether the channel currently carries traffic
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Average daily transaction volume
    #[serde(default)]
    pub transaction_volume: u64,
}

fn default_true() -> bool {
    true
}

impl IntegrationChannel {
    /// Create an active channel with no endpoints and no traffic
    #[inline]
    #[must_use]
    pub fn new(channel_id: impl Into<String>, channel_type: ChannelType, name: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_type,
            name: name.into(),
            config: BTreeMap::new(),
            legacy_endpoint: None,
            target_endpoint: None,
            is_active: true,
            transaction_volume: 0,
        }
    }

    /// With a configuration entry
    #[inline]
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// With legacy endpoint
    #[inline]
    #[must_use]
    pub fn with_legacy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.legacy_endpoint = Some(endpoint.into());
        self
    }

    /// With target endpoint
    #[inline]
    #[must_use]
    pub fn with_target_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.target_endpoint = Some(endpoint.into());
        self
    }

    /// With daily transaction volume
    #[inline]
    #[must_use]
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.transaction_volume = volume;
        self
    }

    /// String config value, if present and a string
    #[must_use]
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(serde_json::Value::as_str)
    }
}

/// A B2B customer and its integration channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier
    pub customer_id: String,
    /// Display name
    pub name: String,
    /// Industry
    #[serde(default)]
    pub industry: Option<String>,
    /// Business-criticality tier
    #[serde(default)]
    pub business_criticality: BusinessCriticality,
    /// Declared compliance regimes (HIPAA, PCI-DSS, ...)
    #[serde(default)]
    pub compliance_requirements: Vec<String>,
    /// Primary contact email
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Primary contact phone
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Integration channels in declaration order
    #[serde(default)]
    pub channels: Vec<IntegrationChannel>,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a medium-criticality customer with no channels
    #[inline]
    #[must_use]
    pub fn new(customer_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            industry: None,
            business_criticality: BusinessCriticality::default(),
            compliance_requirements: Vec::new(),
            contact_email: None,
            contact_phone: None,
            channels: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// With industry
    #[inline]
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// With criticality tier
    #[inline]
    #[must_use]
    pub fn with_criticality(mut self, criticality: BusinessCriticality) -> Self {
        self.business_criticality = criticality;
        self
    }

    /// With a compliance requirement
    #[inline]
    #[must_use]
    pub fn with_compliance(mut self, requirement: impl Into<String>) -> Self {
        self.compliance_requirements.push(requirement.into());
        self
    }

    /// With contact email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    /// With contact phone
    #[inline]
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    /// With an additional channel
    #[inline]
    #[must_use]
    pub fn with_channel(mut self, channel: IntegrationChannel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Whether any contact method is on file
    #[inline]
    #[must_use]
    pub fn has_contact(&self) -> bool {
        self.contact_email.is_some() || self.contact_phone.is_some()
    }

    /// Look up a channel by id
    #[must_use]
    pub fn channel(&self, channel_id: &str) -> Option<&IntegrationChannel> {
        self.channels.iter().find(|c| c.channel_id == channel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_type_canonical_strings() {
        assert_eq!(ChannelType::RestApi.to_string(), "rest_api");
        assert_eq!(ChannelType::ThickClient.as_str(), "thick_client");
        assert_eq!(
            serde_json::to_string(&ChannelType::WebPortal).unwrap(),
            "\"web_portal\""
        );
    }

    #[test]
    fn channel_type_parse_round_trip() {
        for t in ChannelType::ALL {
            assert_eq!(t.as_str().parse::<ChannelType>().unwrap(), t);
        }
        assert!("mainframe".parse::<ChannelType>().is_err());
    }

    #[test]
    fn legacy_channel_types() {
        assert!(ChannelType::Edi.is_legacy());
        assert!(ChannelType::ThickClient.is_legacy());
        assert!(!ChannelType::RestApi.is_legacy());
    }

    #[test]
    fn criticality_lenient_parse() {
        assert_eq!(BusinessCriticality::parse_lenient("CRITICAL"), BusinessCriticality::Critical);
        assert_eq!(BusinessCriticality::parse_lenient("bogus"), BusinessCriticality::Medium);
        assert!("bogus".parse::<BusinessCriticality>().is_err());
    }

    #[test]
    fn customer_builder() {
        let customer = Customer::new("C1", "Acme")
            .with_criticality(BusinessCriticality::High)
            .with_compliance("HIPAA")
            .with_channel(IntegrationChannel::new("CH1", ChannelType::Sftp, "Nightly batch"));

        assert_eq!(customer.channels.len(), 1);
        assert!(!customer.has_contact());
        assert!(customer.channel("CH1").is_some());
        assert!(customer.channel("CH2").is_none());
    }

    #[test]
    fn customer_deserializes_with_defaults() {
        let json = r#"{
            "customer_id": "C9",
            "name": "Globex",
            "channels": [{"channel_id": "E1", "channel_type": "edi", "name": "EDI"}]
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.business_criticality, BusinessCriticality::Medium);
        assert!(customer.channels[0].is_active);
        assert_eq!(customer.channels[0].transaction_volume, 0);
    }

    #[test]
    fn channel_config_lookup() {
        let channel = IntegrationChannel::new("E1", ChannelType::Edi, "EDI")
            .with_config("protocol", "EDIFACT")
            .with_config("retries", 3);
        assert_eq!(channel.config_str("protocol"), Some("EDIFACT"));
        assert_eq!(channel.config_str("retries"), None);
    }
}
