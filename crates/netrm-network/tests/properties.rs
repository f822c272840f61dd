//! Property tests for the network rule builder and the frontend remover

use netrm_common::NetrmError;
use netrm_network::{
    new_network_rule, remove_frontend_ip_config, FrontendIpConfiguration, LoadBalancer,
    NewNetworkRuleParams, NetworkRuleProtocol, RemoveFrontendIpConfigParams,
};
use proptest::prelude::*;

/// A protocol name in random letter case
fn protocol_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(NetworkRuleProtocol::ALL.to_vec()),
        prop::collection::vec(any::<bool>(), 4),
    )
        .prop_map(|(protocol, upper)| {
            protocol
                .as_str()
                .chars()
                .zip(upper)
                .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect::<String>()
        })
}

fn list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[0-9a-z./*-]{1,18}", 1..5)
}

fn params_strategy() -> impl Strategy<Value = NewNetworkRuleParams> {
    (
        "[a-z][a-z0-9-]{0,15}",
        prop::option::of("[A-Za-z ]{1,20}"),
        list_strategy(),
        list_strategy(),
        list_strategy(),
        prop::collection::vec(protocol_strategy(), 1..5),
    )
        .prop_map(
            |(name, description, source_addresses, destination_addresses, destination_ports, protocols)| {
                NewNetworkRuleParams {
                    name,
                    description,
                    source_addresses,
                    destination_addresses,
                    destination_ports,
                    protocols,
                }
            },
        )
}

proptest! {
    #[test]
    fn well_formed_params_build_verbatim_rule(params in params_strategy()) {
        let rule = new_network_rule(params.clone()).unwrap();
        prop_assert_eq!(rule.name(), params.name.as_str());
        prop_assert_eq!(rule.description(), params.description.as_deref());
        prop_assert_eq!(rule.protocols(), params.protocols.as_slice());
        prop_assert_eq!(rule.source_addresses(), params.source_addresses.as_slice());
        prop_assert_eq!(rule.destination_addresses(), params.destination_addresses.as_slice());
        prop_assert_eq!(rule.destination_ports(), params.destination_ports.as_slice());
    }

    #[test]
    fn any_empty_list_is_invalid(params in params_strategy(), which in 0usize..4) {
        let mut params = params;
        match which {
            0 => params.protocols.clear(),
            1 => params.source_addresses.clear(),
            2 => params.destination_addresses.clear(),
            _ => params.destination_ports.clear(),
        }
        let result = new_network_rule(params);
        prop_assert!(matches!(result, Err(NetrmError::InvalidArgument(_))));
    }

    #[test]
    fn unknown_protocol_is_invalid(
        params in params_strategy(),
        bogus in "[a-z]{2,8}".prop_filter("must not be a protocol", |s| s.parse::<NetworkRuleProtocol>().is_err()),
        position in any::<prop::sample::Index>(),
    ) {
        let mut params = params;
        let at = position.index(params.protocols.len() + 1);
        params.protocols.insert(at, bogus.clone());
        match new_network_rule(params) {
            Err(NetrmError::InvalidArgument(errors)) => {
                let expected = format!("Invalid protocol {bogus}");
                prop_assert!(errors.iter().any(|e| e.message == expected));
            }
            other => prop_assert!(false, "expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn remover_deletes_exactly_the_unique_match(
        names in prop::collection::hash_set("[a-z]{1,6}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        // lower-case names from a set are unique ignoring case too
        let target = names[pick.index(names.len())].clone();

        let mut lb = LoadBalancer::new("lb");
        lb.properties.frontend_ip_configurations =
            names.iter().map(|n| FrontendIpConfiguration::named(n.clone())).collect();

        let removed = remove_frontend_ip_config(
            &mut lb,
            &RemoveFrontendIpConfigParams::named(target.to_uppercase()),
        ).unwrap();

        prop_assert_eq!(removed.and_then(|r| r.name), Some(target.clone()));
        let expected: Vec<&str> = names.iter().map(String::as_str).filter(|n| *n != target).collect();
        prop_assert_eq!(lb.frontend_names(), expected);
    }
}

#[test]
fn remover_scenarios() {
    let build = |names: &[&str]| {
        let mut lb = LoadBalancer::new("lb");
        lb.properties.frontend_ip_configurations =
            names.iter().map(|n| FrontendIpConfiguration::named(*n)).collect();
        lb
    };

    let mut lb = build(&["a", "b"]);
    remove_frontend_ip_config(&mut lb, &RemoveFrontendIpConfigParams::named("B")).unwrap();
    assert_eq!(lb.frontend_names(), vec!["a"]);

    let mut lb = build(&["a", "b"]);
    remove_frontend_ip_config(&mut lb, &RemoveFrontendIpConfigParams::named("c")).unwrap();
    assert_eq!(lb.frontend_names(), vec!["a", "b"]);

    let mut lb = build(&["dup", "dup"]);
    let err = remove_frontend_ip_config(&mut lb, &RemoveFrontendIpConfigParams::named("dup"));
    assert!(matches!(err, Err(NetrmError::AmbiguousMatch { count: 2, .. })));
    assert_eq!(lb.frontend_names(), vec!["dup", "dup"]);
}
