use mig_model::{BusinessCriticality, ChannelType, Customer, IntegrationChannel};
use mig_risk::{RiskAssessor, RiskCategory, RiskFactor, RiskSeverity};
use proptest::prelude::*;

fn criticality() -> impl Strategy<Value = BusinessCriticality> {
    prop_oneof![
        Just(BusinessCriticality::Low),
        Just(BusinessCriticality::Medium),
        Just(BusinessCriticality::High),
        Just(BusinessCriticality::Critical),
    ]
}

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

fn customer() -> impl Strategy<Value = Customer> {
    (
        criticality(),
        prop::collection::vec("[A-Z]{3,6}", 0..4),
        prop::collection::vec((channel_type(), 0u64..50_000, any::<bool>()), 0..9),
        any::<bool>(),
    )
        .prop_map(|(crit, compliance, channels, contact)| {
            let mut c = Customer::new("CUST-P", "Prop Co").with_criticality(crit);
            for req in compliance {
                c = c.with_compliance(req);
            }
            for (i, (ty, volume, endpoint)) in channels.into_iter().enumerate() {
                let mut ch = IntegrationChannel::new(format!("CH-{i}"), ty, "channel").with_volume(volume);
                if endpoint {
                    ch = ch.with_target_endpoint("https://modern.test");
                }
                c = c.with_channel(ch);
            }
            if contact {
                c = c.with_email("ops@prop.test");
            }
            c
        })
}

#[test]
fn low_criticality_rest_customer_scores_below_fifty() {
    let customer = Customer::new("CUST-1", "Small Shop")
        .with_criticality(BusinessCriticality::Low)
        .with_channel(IntegrationChannel::new("API-1", ChannelType::RestApi, "Orders"));

    let assessment = RiskAssessor::new().assess_customer(&customer);

    assert!(assessment.overall_risk_score < 50.0);
    assert!(matches!(assessment.risk_level, RiskSeverity::Low | RiskSeverity::Medium));
}

#[test]
fn critical_regulated_legacy_customer_scores_above_thirty_five() {
    let mut customer = Customer::new("CUST-2", "Hospital Network")
        .with_criticality(BusinessCriticality::Critical)
        .with_compliance("HIPAA")
        .with_compliance("PCI-DSS");
    for i in 0..6 {
        let ty = if i % 2 == 0 { ChannelType::ThickClient } else { ChannelType::Edi };
        customer = customer.with_channel(IntegrationChannel::new(format!("CH-{i}"), ty, "legacy"));
    }

    let assessment = RiskAssessor::new().assess_customer(&customer);

    assert!(assessment.overall_risk_score > 35.0);
    assert_ne!(assessment.risk_level, RiskSeverity::Low);
    assert!(assessment.factors_in(RiskCategory::Compliance).count() == 2);
}

proptest! {
    #[test]
    fn prop_factor_score_in_bounds(impact in -50.0f64..200.0, likelihood in -50.0f64..200.0) {
        let f = RiskFactor::new("F", RiskCategory::Technical, "x", impact, likelihood);
        let score = f.risk_score();
        prop_assert!((0.0..=100.0).contains(&score));
        prop_assert_eq!(score, f.impact_score * f.likelihood_score / 100.0);
    }

    #[test]
    fn prop_overall_score_in_bounds(c in customer()) {
        let a = RiskAssessor::new().assess_customer(&c);
        prop_assert!((0.0..=100.0).contains(&a.overall_risk_score));
        prop_assert_eq!(a.migration_readiness_score, 100.0 - a.overall_risk_score);
        prop_assert_eq!(a.risk_level, RiskSeverity::from_score(a.overall_risk_score));
    }

    #[test]
    fn prop_assessment_is_deterministic(c in customer()) {
        let assessor = RiskAssessor::new();
        let a = assessor.assess_customer(&c);
        let b = assessor.assess_customer(&c.clone());
        prop_assert_eq!(a.overall_risk_score.to_bits(), b.overall_risk_score.to_bits());
        prop_assert_eq!(a.risk_level, b.risk_level);
        for ch in &c.channels {
            let x = assessor.assess_channel(&c, ch);
            let y = assessor.assess_channel(&c, ch);
            prop_assert_eq!(x.overall_risk_score.to_bits(), y.overall_risk_score.to_bits());
        }
    }

    #[test]
    fn prop_compliance_never_lowers_score(c in customer(), req in "[A-Z]{3,8}") {
        let assessor = RiskAssessor::new();
        let before = assessor.assess_customer(&c).overall_risk_score;
        let after = assessor.assess_customer(&c.clone().with_compliance(req)).overall_risk_score;
        prop_assert!(after >= before);
    }
}
