//! Argument and parameter types used by Internet protocol transport layer Commands and Responses

/// `<type>` of +NSOCR, the module only offers datagram sockets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocketType {
    Dgram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocketProtocol {
    UDP = 17,
}

/// `<flag>` of +NSOSTF, tells the network the RRC connection can be released
/// early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleaseIndicator {
    /// 0x200: release after this message
    AfterNextMessage = 0x200,
    /// 0x400: release after the first reply to this message
    AfterNextReply = 0x400,
}
