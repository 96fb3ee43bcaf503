//! Responses for Mobile equipment control and status Commands

/// Signal quality +CSQ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalQuality {
    /// 0..=31 in 2 dBm steps from -113 dBm, 99 when not detectable
    pub rssi: u8,
    /// Channel bit error rate, 99 when not known
    pub ber: u8,
}
