//! NAT gateway placement and egress binding.

use crate::error::{PlanError, Result};
use crate::models::{Gateway, SubnetRole, Topology};

/// Place `gateway_count` gateways on the first public subnets in build order.
///
/// Placement is deterministic, not load-balanced.
pub fn plan(topology: &Topology, gateway_count: usize) -> Result<Vec<Gateway>> {
    let public: Vec<_> = topology.public_subnets().collect();
    if gateway_count > public.len() {
        return Err(PlanError::NoPublicSubnetAvailable {
            requested: gateway_count,
            available: public.len(),
        });
    }

    let gateways: Vec<Gateway> = public
        .into_iter()
        .take(gateway_count)
        .enumerate()
        .map(|(i, subnet)| Gateway::for_slot(i + 1, subnet.key()))
        .collect();

    for gw in &gateways {
        log::debug!("Placed {gw}");
    }
    Ok(gateways)
}

/// Bind every private-egress subnet's default route to a gateway.
///
/// With a single gateway all egress subnets share it. With several, each
/// subnet binds to the first gateway in its own zone and a zone without one
/// is an error: there is no cross-zone fallback.
pub fn bind_egress(topology: &Topology, gateways: &[Gateway]) -> Result<Topology> {
    for gw in gateways {
        let hosted_on_public = topology
            .get(&gw.hosting_subnet)
            .is_some_and(|s| s.role == SubnetRole::Public);
        if !hosted_on_public {
            return Err(PlanError::GatewayNotOnPublicSubnet {
                gateway: gw.id.to_string(),
                subnet: gw.hosting_subnet.to_string(),
            });
        }
    }

    let mut bound = topology.clone();
    for subnet in bound
        .subnets
        .iter_mut()
        .filter(|s| s.role == SubnetRole::PrivateEgress)
    {
        let gateway = match gateways {
            [single] => Some(single),
            _ => gateways.iter().find(|gw| gw.hosting_subnet.az == subnet.az),
        };
        let gateway = gateway.ok_or_else(|| PlanError::NoGatewayInZone {
            group: subnet.group_name.clone(),
            az: subnet.az.to_string(),
        })?;
        log::trace!("Binding {} to {}", subnet.key(), gateway.id);
        subnet.gateway_binding = Some(gateway.id.clone());
    }

    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AddressBlock, AvailabilityZone, GatewayId, SubnetGroupSpec, SubnetKey,
    };
    use crate::planning::topology::build;

    fn reference_topology(zones: &[&str]) -> Topology {
        let groups = vec![
            SubnetGroupSpec::new("public-subnet-1", SubnetRole::Public, 24),
            SubnetGroupSpec::new("public-subnet-2", SubnetRole::Public, 24),
            SubnetGroupSpec::new("private-subnet-1", SubnetRole::PrivateEgress, 24),
            SubnetGroupSpec::new("isolated-subnet-1", SubnetRole::Isolated, 28),
        ];
        let zones: Vec<AvailabilityZone> = zones.iter().map(|z| AvailabilityZone::new(*z)).collect();
        build(&groups, &zones, &AddressBlock::new("10.0.0.0/16").unwrap()).unwrap()
    }

    #[test]
    fn test_single_gateway_on_first_public_subnet() {
        let topology = reference_topology(&["a", "b"]);
        let gateways = plan(&topology, 1).unwrap();
        assert_eq!(gateways.len(), 1);
        assert_eq!(gateways[0].hosting_subnet, SubnetKey::new("public-subnet-1", "a"));
        assert_eq!(gateways[0].id, GatewayId::new("nat-gateway-1"));
        assert_eq!(gateways[0].elastic_address.id, "eip-1");
        assert_eq!(gateways[0].elastic_address.domain, "vpc");

        let bound = bind_egress(&topology, &gateways).unwrap();
        let egress: Vec<_> = bound.subnets_with_role(SubnetRole::PrivateEgress).collect();
        assert_eq!(egress.len(), 2);
        for subnet in egress {
            assert_eq!(subnet.gateway_binding, Some(GatewayId::new("nat-gateway-1")));
        }
        assert!(bound
            .subnets_with_role(SubnetRole::Isolated)
            .all(|s| s.gateway_binding.is_none()));
    }

    #[test]
    fn test_gateway_per_zone() {
        let topology = reference_topology(&["a", "b"]);
        let gateways = plan(&topology, 2).unwrap();
        assert_eq!(gateways[1].hosting_subnet, SubnetKey::new("public-subnet-1", "b"));

        let bound = bind_egress(&topology, &gateways).unwrap();
        let private_b = bound
            .get(&SubnetKey::new("private-subnet-1", "b"))
            .unwrap();
        assert_eq!(private_b.gateway_binding, Some(GatewayId::new("nat-gateway-2")));
    }

    #[test]
    fn test_too_many_gateways() {
        let topology = reference_topology(&["a"]);
        assert_eq!(
            plan(&topology, 3).unwrap_err(),
            PlanError::NoPublicSubnetAvailable {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_no_gateway_in_zone() {
        let topology = reference_topology(&["a", "b"]);
        let gateways = vec![
            Gateway::for_slot(1, SubnetKey::new("public-subnet-1", "a")),
            Gateway::for_slot(2, SubnetKey::new("public-subnet-2", "a")),
        ];
        let err = bind_egress(&topology, &gateways).unwrap_err();
        assert_eq!(
            err,
            PlanError::NoGatewayInZone {
                group: "private-subnet-1".to_string(),
                az: "b".to_string()
            }
        );
    }

    #[test]
    fn test_zero_gateways_with_egress_subnets() {
        let topology = reference_topology(&["a"]);
        let gateways = plan(&topology, 0).unwrap();
        assert!(gateways.is_empty());
        assert!(matches!(
            bind_egress(&topology, &gateways),
            Err(PlanError::NoGatewayInZone { .. })
        ));
    }

    #[test]
    fn test_gateway_must_be_on_public_subnet() {
        let topology = reference_topology(&["a"]);
        let gateways = vec![Gateway::for_slot(
            1,
            SubnetKey::new("private-subnet-1", "a"),
        )];
        assert!(matches!(
            bind_egress(&topology, &gateways),
            Err(PlanError::GatewayNotOnPublicSubnet { .. })
        ));
    }

    #[test]
    fn test_bind_is_idempotent() {
        let topology = reference_topology(&["a", "b"]);
        let gateways = plan(&topology, 2).unwrap();
        let once = bind_egress(&topology, &gateways).unwrap();
        let twice = bind_egress(&once, &gateways).unwrap();
        assert_eq!(once, twice);
    }
}
