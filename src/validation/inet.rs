use std::net::{Ipv4Addr, Ipv6Addr};

/// Decides whether the text inside a bracketed email domain (`user@[...]`)
/// is an acceptable IP address literal.
pub trait IpLiteralValidator: Send + Sync {
    fn is_valid_ip(&self, text: &str) -> bool;
}

/// Accepts IPv4 dotted quads and IPv6 textual addresses.
///
/// An IPv6 address may carry a non-empty zone identifier (`fe80::1%eth0`).
///
/// # Examples
/// ```
/// use domain_validator::validation::inet::{InetAddressValidator, IpLiteralValidator};
///
/// let validator = InetAddressValidator;
/// assert!(validator.is_valid_ip("192.168.1.1"));
/// assert!(validator.is_valid_ip("2001:db8::1"));
/// assert!(!validator.is_valid_ip("192.168.1.256"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InetAddressValidator;

impl InetAddressValidator {
    pub fn is_valid_inet4_address(&self, text: &str) -> bool {
        text.parse::<Ipv4Addr>().is_ok()
    }

    pub fn is_valid_inet6_address(&self, text: &str) -> bool {
        let address = match text.split_once('%') {
            Some((_, zone)) if zone.is_empty() => return false,
            Some((address, _)) => address,
            None => text,
        };
        address.parse::<Ipv6Addr>().is_ok()
    }
}

impl IpLiteralValidator for InetAddressValidator {
    fn is_valid_ip(&self, text: &str) -> bool {
        self.is_valid_inet4_address(text) || self.is_valid_inet6_address(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4() {
        let validator = InetAddressValidator;
        assert!(validator.is_valid_ip("192.168.0.1"));
        assert!(validator.is_valid_ip("0.0.0.0"));
        assert!(validator.is_valid_ip("255.255.255.255"));
        assert!(!validator.is_valid_ip("192.168.0.256"));
        assert!(!validator.is_valid_ip("192.168.0"));
        assert!(!validator.is_valid_ip("192.168.0.1.1"));
        assert!(!validator.is_valid_ip("invalid.ip"));
    }

    #[test]
    fn test_ipv6() {
        let validator = InetAddressValidator;
        assert!(validator.is_valid_ip("2001:db8::1"));
        assert!(validator.is_valid_ip("2001:0db8:85a3:0000:0000:ac1f:8001:1234"));
        assert!(validator.is_valid_ip("::ffff:192.168.1.1"));
        assert!(validator.is_valid_ip("fe80::1%eth0"));
        assert!(!validator.is_valid_ip("fe80::1%"));
        assert!(!validator.is_valid_ip("2001:db8:::1"));
        assert!(!validator.is_valid_ip("IPv6:2001:db8::1"));
    }

    #[test]
    fn test_empty() {
        assert!(!InetAddressValidator.is_valid_ip(""));
    }
}
