//! Playbook registry
//!
//! Provides [`PlaybookRegistry`], mapping channel types to playbook variants.
//! The mapping is resolved once at construction.

use crate::api::ApiPlaybook;
use crate::base::BasePlaybook;
use crate::edi::EdiPlaybook;
use crate::playbook::{Playbook, PlaybookKind};
use crate::sftp::SftpPlaybook;
use crate::thick_client::ThickClientPlaybook;
use mig_model::{ChannelType, IntegrationChannel};
use std::collections::HashMap;

/// Playbook id assigned to a channel migration (`PLAYBOOK-{channel_type}`)
#[inline]
#[must_use]
pub fn playbook_id(channel_type: ChannelType) -> String {
    format!("PLAYBOOK-{channel_type}")
}

impl PlaybookKind {
    /// Build a playbook of this kind for a channel
    #[must_use]
    pub fn build(self, channel: &IntegrationChannel) -> Box<dyn Playbook> {
        match self {
            PlaybookKind::Edi => Box::new(EdiPlaybook::for_channel(channel)),
            PlaybookKind::Sftp => Box::new(SftpPlaybook::new()),
            PlaybookKind::Api => Box::new(ApiPlaybook::for_channel(channel)),
            PlaybookKind::ThickClient => Box::new(ThickClientPlaybook::new()),
            PlaybookKind::Base => Box::new(BasePlaybook::new()),
        }
    }
}

/// Registry of channel type to playbook variant
#[derive(Debug, Default, Clone)]
pub struct PlaybookRegistry {
    kinds: HashMap<ChannelType, PlaybookKind>,
}

impl PlaybookRegistry {
    /// Create new empty registry; every lookup falls back to the base playbook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Create registry with the built-in mapping
    ///
    /// - `edi` → EDI
    /// - `sftp` → SFTP
    /// - `rest_api`, `soap_api`, `web_portal` → API
    /// - `thick_client` → thick client
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ChannelType::Edi, PlaybookKind::Edi);
        registry.register(ChannelType::Sftp, PlaybookKind::Sftp);
        registry.register(ChannelType::RestApi, PlaybookKind::Api);
        registry.register(ChannelType::SoapApi, PlaybookKind::Api);
        registry.register(ChannelType::WebPortal, PlaybookKind::Api);
        registry.register(ChannelType::ThickClient, PlaybookKind::ThickClient);
        registry
    }

    /// Map a channel type to a variant, replacing any previous mapping
    pub fn register(&mut self, channel_type: ChannelType, kind: PlaybookKind) {
        self.kinds.insert(channel_type, kind);
    }

    /// Variant for a channel type
    #[inline]
    #[must_use]
    pub fn kind_for(&self, channel_type: ChannelType) -> PlaybookKind {
        self.kinds.get(&channel_type).copied().unwrap_or_default()
    }

    /// Select a fresh playbook for a channel
    #[must_use]
    pub fn select(&self, channel: &IntegrationChannel) -> Box<dyn Playbook> {
        let kind = self.kind_for(channel.channel_type);
        tracing::debug!(channel_id = %channel.channel_id, playbook = %kind, "playbook selected");
        kind.build(channel)
    }

    /// Get number of mapped channel types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_channel_type() {
        let registry = PlaybookRegistry::with_defaults();
        assert_eq!(registry.len(), ChannelType::ALL.len());
        for ty in ChannelType::ALL {
            assert_ne!(registry.kind_for(ty), PlaybookKind::Base);
        }
    }

    #[test]
    fn unmapped_type_falls_back_to_base() {
        let registry = PlaybookRegistry::new();
        let channel = IntegrationChannel::new("X", ChannelType::Edi, "EDI");
        let mut playbook = registry.select(&channel);
        assert_eq!(playbook.kind(), PlaybookKind::Base);
        assert!(playbook.generate_steps().is_empty());
        assert!(playbook.prerequisites().is_empty());
        assert!(playbook.rollback_plan().is_empty());
        assert_eq!(playbook.total_estimated_hours(), 0);
    }

    #[test]
    fn playbook_ids_use_canonical_type() {
        assert_eq!(playbook_id(ChannelType::RestApi), "PLAYBOOK-rest_api");
        assert_eq!(playbook_id(ChannelType::Edi), "PLAYBOOK-edi");
    }
}
