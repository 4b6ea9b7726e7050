use std::{collections::HashSet, iter::FromIterator, net::Ipv4Addr};

use ipnetwork::Ipv4Network;

/// CIDR set difference: the minimal set of networks covering `self` with
/// `other` carved out.
pub trait IpNetDifference: Sized + core::hash::Hash + std::cmp::Eq {
    fn subtract(&self, other: &Self) -> HashSet<Self>;
    fn subnets(&self) -> (Self, Self);
}

impl IpNetDifference for Ipv4Network {
    fn subtract(&self, other: &Self) -> HashSet<Self> {
        use std::cmp;

        let min_pref = cmp::min(self.prefix(), other.prefix());
        let prefs_equal =
            first_nbits32(self.ip().into(), min_pref) == first_nbits32(other.ip().into(), min_pref);
        if other.prefix() == min_pref && prefs_equal {
            HashSet::new()
        } else if !prefs_equal {
            HashSet::from_iter([*self])
        } else {
            let mut filtered: HashSet<Self> = HashSet::new();
            let (n1, n2) = self.subnets();
            filtered.extend(&n1.subtract(other));
            filtered.extend(&n2.subtract(other));
            filtered
        }
    }

    fn subnets(&self) -> (Self, Self) {
        let new_prefix = self.prefix() + 1;
        let first = u32::from(self.ip()) & !(1 << (32 - new_prefix));
        let second = u32::from(self.ip()) | (1 << (32 - new_prefix));
        let to_net = |addr: u32| Ipv4Network::new(addr.into(), new_prefix).unwrap();
        (to_net(first), to_net(second))
    }
}

fn first_nbits32(x: u32, n: u8) -> u32 {
    if n == 0 {
        0
    } else {
        x & (u32::MAX << (32 - n))
    }
}

/// The AllowedIPs cover pushed to mobile clients: all of IPv4 except the
/// server's own /32, as 32 networks sorted by address.
pub fn mobile_allowed_ips() -> Vec<Ipv4Network> {
    let everything = Ipv4Network::new(Ipv4Addr::UNSPECIFIED, 0).unwrap();
    let server = Ipv4Network::new(Ipv4Addr::UNSPECIFIED, 32).unwrap();

    let mut nets: Vec<Ipv4Network> = everything.subtract(&server).into_iter().collect();
    nets.sort_by_key(|n| u32::from(n.ip()));
    nets
}

#[cfg(test)]
mod ipop_test {
    use std::str::FromStr;

    use super::*;

    fn net(s: &str) -> Ipv4Network {
        Ipv4Network::from_str(s).unwrap()
    }

    #[test]
    fn test_subtract_disjoint() {
        assert_eq!(
            net("10.0.0.0/8").subtract(&net("192.168.0.0/16")),
            HashSet::from_iter([net("10.0.0.0/8")])
        );
    }

    #[test]
    fn test_subtract_self() {
        assert_eq!(net("10.0.0.0/8").subtract(&net("10.0.0.0/8")), HashSet::new());
    }

    #[test]
    fn test_subtract_half() {
        assert_eq!(
            net("10.0.0.0/8").subtract(&net("10.0.0.0/9")),
            HashSet::from_iter([net("10.128.0.0/9")])
        );
    }

    #[test]
    fn test_mobile_cover_shape() {
        let nets = mobile_allowed_ips();
        assert_eq!(nets.len(), 32);
        assert_eq!(nets[0], net("0.0.0.1/32"));
        assert_eq!(nets[31], net("128.0.0.0/1"));
        // one network per prefix length, /32 down to /1
        for (i, n) in nets.iter().enumerate() {
            assert_eq!(n.prefix(), 32 - i as u8);
        }
    }
}
