closed_enum! {
    /// BOOTP message op code (RFC 951)
    pub enum BootpMessageType in "BOOTPMessageType" {
        BootRequest = 1 => "BOOTPREQUEST",
        BootReply = 2 => "BOOTPREPLY",
    }
}

closed_enum! {
    /// DHCP message types as defined in RFC 2132 (option 53)
    pub enum MessageType in "DHCPMessageType" {
        Discover = 1 => "DHCPDISCOVER",
        Offer = 2 => "DHCPOFFER",
        Request = 3 => "DHCPREQUEST",
        Decline = 4 => "DHCPDECLINE",
        Ack = 5 => "DHCPACK",
        Nak = 6 => "DHCPNAK",
        Release = 7 => "DHCPRELEASE",
        Inform = 8 => "DHCPINFORM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Enumeration;

    #[test]
    fn test_message_type_to_u8() {
        assert_eq!(MessageType::Discover.value(), 1);
        assert_eq!(MessageType::Offer.value(), 2);
        assert_eq!(MessageType::Request.value(), 3);
        assert_eq!(MessageType::Ack.value(), 5);
    }

    #[test]
    fn test_message_type_from_u8() {
        assert_eq!(MessageType::lookup_by_value(1), Some(MessageType::Discover));
        assert_eq!(MessageType::lookup_by_value(2), Some(MessageType::Offer));
        assert_eq!(MessageType::lookup_by_value(5), Some(MessageType::Ack));
        assert_eq!(MessageType::lookup_by_value(0), None);
        assert_eq!(MessageType::lookup_by_value(99), None);
    }

    #[test]
    fn test_bootp_message_type() {
        assert_eq!(
            BootpMessageType::try_from(2),
            Ok(BootpMessageType::BootReply)
        );
        assert!(BootpMessageType::try_from(0).is_err());
    }
}
