//! Stack kinds and teardown ordering
//!
//! Provides the kind tag used in stack names and a consistent teardown
//! priority. Stacks must be deleted in reverse provisioning order so that
//! consumers disappear before the infrastructure they depend on.

/// Kinds of stacks that make up an environment
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StackKind {
    /// A deployed service (depends on everything below)
    #[strum(serialize = "service")]
    Service,
    /// A database owned by a service
    #[strum(serialize = "database")]
    Database,
    /// Container platform (cluster) hosting the services
    #[strum(serialize = "cluster")]
    ContainerPlatform,
    /// Service discovery for the environment
    #[strum(serialize = "discovery")]
    ServiceDiscovery,
    /// Access-control bindings for an environment or service
    #[strum(serialize = "iam")]
    Roleset,
    /// Load balancer fronting the environment
    #[strum(serialize = "loadbalancer")]
    LoadBalancer,
    /// Network (possibly shared across environments)
    #[strum(serialize = "vpc")]
    Network,
    /// Network target resource attached to the environment
    #[strum(serialize = "target")]
    Target,
}

impl StackKind {
    /// Tag embedded in stack names for this kind
    pub fn tag(self) -> &'static str {
        match self {
            StackKind::Service => "service",
            StackKind::Database => "database",
            StackKind::ContainerPlatform => "cluster",
            StackKind::ServiceDiscovery => "discovery",
            StackKind::Roleset => "iam",
            StackKind::LoadBalancer => "loadbalancer",
            StackKind::Network => "vpc",
            StackKind::Target => "target",
        }
    }

    /// Get teardown priority (lower number = delete first)
    ///
    /// - 0: Services (consume everything else)
    /// - 1: Databases
    /// - 2: Container platform
    /// - 3: Service discovery
    /// - 4: Environment roleset
    /// - 5: Load balancer
    /// - 6: Network, then its target
    pub fn teardown_priority(self) -> u8 {
        match self {
            StackKind::Service => 0,
            StackKind::Database => 1,
            StackKind::ContainerPlatform => 2,
            StackKind::ServiceDiscovery => 3,
            StackKind::Roleset => 4,
            StackKind::LoadBalancer => 5,
            StackKind::Network => 6,
            StackKind::Target => 7,
        }
    }

    /// Whether stacks of this kind are discovered by environment tag
    /// rather than addressed by a computed name
    pub fn is_tag_filtered(self) -> bool {
        matches!(self, StackKind::Service | StackKind::Database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_consumers_before_platform() {
        for consumer in [StackKind::Service, StackKind::Database] {
            for provider in [
                StackKind::ContainerPlatform,
                StackKind::LoadBalancer,
                StackKind::Network,
            ] {
                assert!(
                    consumer.teardown_priority() < provider.teardown_priority(),
                    "{consumer} must be deleted before {provider}"
                );
            }
        }
    }

    #[test]
    fn test_network_last_before_target() {
        let max_other = StackKind::iter()
            .filter(|k| !matches!(k, StackKind::Network | StackKind::Target))
            .map(StackKind::teardown_priority)
            .max()
            .unwrap();
        assert!(StackKind::Network.teardown_priority() > max_other);
        assert!(StackKind::Target.teardown_priority() > StackKind::Network.teardown_priority());
    }

    #[test]
    fn test_display_matches_tag() {
        for kind in StackKind::iter() {
            assert_eq!(kind.to_string(), kind.tag());
            assert_eq!(kind.tag().parse::<StackKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_tag_filtered_kinds() {
        assert!(StackKind::Service.is_tag_filtered());
        assert!(StackKind::Database.is_tag_filtered());
        assert!(!StackKind::Network.is_tag_filtered());
    }
}
