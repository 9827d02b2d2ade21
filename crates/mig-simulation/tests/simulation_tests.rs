use mig_model::{ChannelType, IntegrationChannel};
use mig_simulation::{Divergence, DivergentResponder, SimulationEngine, SimulationStatus};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn channel_type() -> impl Strategy<Value = ChannelType> {
    prop_oneof![
        Just(ChannelType::Edi),
        Just(ChannelType::Sftp),
        Just(ChannelType::RestApi),
        Just(ChannelType::SoapApi),
        Just(ChannelType::ThickClient),
        Just(ChannelType::WebPortal),
    ]
}

#[test]
fn every_channel_type_passes_with_mirrors() {
    let engine = SimulationEngine::new();
    for ty in ChannelType::ALL {
        let sim = engine.run("CUST-1", &IntegrationChannel::new("CH", ty, "channel"));
        assert!(sim.passed(), "{ty}");
        assert!(!sim.scenarios.is_empty());
    }
}

#[test]
fn re_execution_replaces_results() {
    let engine = SimulationEngine::new();
    let channel = IntegrationChannel::new("CH", ChannelType::Sftp, "files");
    let mut sim = engine.create_simulation("CUST-1", &channel);
    engine.execute_simulation(&mut sim);
    engine.execute_simulation(&mut sim);
    assert_eq!(sim.results.len(), 2);
    assert_eq!(sim.overall_status, SimulationStatus::Passed);
}

#[test]
fn results_serialize_with_side_labels() {
    let sim = SimulationEngine::new().run("CUST-1", &IntegrationChannel::new("CH", ChannelType::WebPortal, "portal"));
    let json = serde_json::to_value(&sim).unwrap();
    assert_eq!(json["overall_status"], "passed");
    assert_eq!(json["results"][0]["legacy_output"]["source"], "legacy");
    assert_eq!(json["results"][0]["modern_output"]["source"], "modern");
    assert_eq!(json["results"][0]["modern_output"]["data"]["action"], "login");
}

proptest! {
    #[test]
    fn prop_fresh_simulations_agree(ty in channel_type(), diverge in any::<bool>()) {
        let mut engine = SimulationEngine::new();
        if diverge {
            let modern = DivergentResponder::default()
                .diverge("SCEN-CH-01", Divergence::Field("injected".into(), json!(true)));
            engine = engine.with_modern(Arc::new(modern));
        }
        let channel = IntegrationChannel::new("CH", ty, "channel");
        let a = engine.run("CUST-1", &channel);
        let b = engine.run("CUST-1", &channel);
        prop_assert_eq!(a.success_rate.to_bits(), b.success_rate.to_bits());
        prop_assert_eq!(a.overall_status, b.overall_status);
        prop_assert_eq!(a.passed(), !diverge);
    }
}
